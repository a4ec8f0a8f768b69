use anyhow::Context as _;
use statline_analysis::report::DEFAULT_SEASON;
use statline_cluster::{
    engine::DEFAULT_MAX_ITERATIONS,
    report::{ClusterQuery, DEFAULT_NUM_CLUSTERS},
    seed::ClusterSeed,
};

use crate::{command::GlobalArgs, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ClusterArg {
    /// Season to cluster
    #[arg(long, default_value = DEFAULT_SEASON)]
    season: String,
    /// Number of clusters (2 to 20)
    #[arg(long, default_value_t = DEFAULT_NUM_CLUSTERS)]
    clusters: usize,
    /// Maximum number of assignment/update rounds
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,
    /// 32-digit hex seed for reproducible results (random if omitted)
    #[arg(long)]
    seed: Option<ClusterSeed>,
    /// Only output the cluster with this id
    #[arg(long)]
    cluster_id: Option<usize>,
}

pub(crate) fn run(global: &GlobalArgs, arg: &ClusterArg) -> anyhow::Result<()> {
    let dataset = util::load_dataset(&global.data_dir)?;
    let query = ClusterQuery {
        season: arg.season.clone(),
        num_clusters: arg.clusters,
        max_iterations: arg.max_iterations,
        seed: arg.seed,
    };
    let result = query
        .run(&dataset)
        .with_context(|| format!("Failed to cluster season {}", arg.season))?;
    match arg.cluster_id {
        Some(cluster_id) => {
            let cluster = result.cluster(cluster_id)?;
            util::Output::save_json(cluster, global.output.clone())
        }
        None => util::Output::save_json(&result, global.output.clone()),
    }
}
