use anyhow::Context as _;
use statline_analysis::report;

use crate::{command::GlobalArgs, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayersArg {
    /// Only list records of this season
    #[arg(long)]
    season: Option<String>,
}

pub(crate) fn run(global: &GlobalArgs, arg: &PlayersArg) -> anyhow::Result<()> {
    let dataset = util::load_dataset(&global.data_dir)?;
    let players = report::roster(&dataset, arg.season.as_deref())
        .context("Failed to list players")?;
    util::Output::save_json(&players, global.output.clone())
}
