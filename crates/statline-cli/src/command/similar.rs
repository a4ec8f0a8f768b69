use anyhow::Context as _;
use statline_analysis::report::{DEFAULT_NUM_SIMILAR, DEFAULT_SEASON, SimilarityQuery};

use crate::{command::GlobalArgs, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimilarArg {
    /// Player name (case-insensitive match if no exact match)
    player: String,
    /// Season of the query player
    #[arg(long, default_value = DEFAULT_SEASON)]
    season: String,
    /// Number of similar players to return
    #[arg(long, default_value_t = DEFAULT_NUM_SIMILAR)]
    count: usize,
}

pub(crate) fn run(global: &GlobalArgs, arg: &SimilarArg) -> anyhow::Result<()> {
    let dataset = util::load_dataset(&global.data_dir)?;
    let query = SimilarityQuery {
        player_name: arg.player.clone(),
        season: arg.season.clone(),
        num_similar: arg.count,
    };
    let response = query
        .run(&dataset)
        .with_context(|| format!("Failed to find players similar to {}", arg.player))?;
    util::Output::save_json(&response, global.output.clone())
}
