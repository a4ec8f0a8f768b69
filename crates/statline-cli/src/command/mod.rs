use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use self::{
    cluster::ClusterArg, players::PlayersArg, seasons::SeasonsArg, similar::SimilarArg,
};

mod cluster;
mod players;
mod seasons;
mod similar;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(flatten)]
    global: GlobalArgs,
    /// What to compute
    #[command(subcommand)]
    mode: Mode,
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GlobalArgs {
    /// Directory holding one `<season>.json` file per season
    #[arg(long, global = true, default_value = "data")]
    pub(crate) data_dir: PathBuf,
    /// Output file path (stdout if omitted)
    #[arg(long, global = true)]
    pub(crate) output: Option<PathBuf>,
    /// Log more detail (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// List the seasons present in the data directory
    Seasons(#[clap(flatten)] SeasonsArg),
    /// List aggregated season records
    Players(#[clap(flatten)] PlayersArg),
    /// Find the seasons most similar to a player's season
    Similar(#[clap(flatten)] SimilarArg),
    /// Group a season's players into clusters
    Cluster(#[clap(flatten)] ClusterArg),
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.global.verbose);
    match &args.mode {
        Mode::Seasons(arg) => seasons::run(&args.global, arg)?,
        Mode::Players(arg) => players::run(&args.global, arg)?,
        Mode::Similar(arg) => similar::run(&args.global, arg)?,
        Mode::Cluster(arg) => cluster::run(&args.global, arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = CommandArgs::parse_from([
            "statline",
            "similar",
            "LeBron James",
            "--data-dir",
            "/tmp/nba",
            "-v",
        ]);
        assert_eq!(args.global.data_dir, PathBuf::from("/tmp/nba"));
        assert_eq!(args.global.verbose, 1);
        assert!(matches!(args.mode, Mode::Similar(_)));
    }
}
