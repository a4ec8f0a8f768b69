use anyhow::Context as _;
use statline_analysis::source::{JsonDirSource, RecordSource as _};

use crate::{command::GlobalArgs, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SeasonsArg {}

pub(crate) fn run(global: &GlobalArgs, _arg: &SeasonsArg) -> anyhow::Result<()> {
    let source = JsonDirSource::new(&global.data_dir);
    let seasons = source
        .seasons()
        .with_context(|| format!("Failed to list seasons in {}", source.dir().display()))?;
    Output::save_json(&seasons, global.output.clone())
}
