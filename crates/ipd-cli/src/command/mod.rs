use clap::{ArgAction, Parser, Subcommand};
use ipd_analysis::sample::{EntityId, PlayerId};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use self::{add::AddArg, distances::DistancesArg, generate::GenerateArg, insights::InsightsArg};

mod add;
mod distances;
mod generate;
mod insights;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v: info, -vv: debug, -vvv: trace)
    ///
    /// `RUST_LOG` takes precedence when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Compute per-entity statistics, zone crossings and neighbors of a player
    Insights(#[clap(flatten)] InsightsArg),
    /// List a player's recorded distances, one page at a time
    Distances(#[clap(flatten)] DistancesArg),
    /// Append one sample to a dataset
    Add(#[clap(flatten)] AddArg),
    /// Generate the reference dataset, optionally with random players
    Generate(#[clap(flatten)] GenerateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose);
    match args.mode {
        Mode::Insights(arg) => insights::run(&arg)?,
        Mode::Distances(arg) => distances::run(&arg)?,
        Mode::Add(arg) => add::run(&arg)?,
        Mode::Generate(arg) => generate::run(&arg)?,
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_player_id(s: &str) -> Result<PlayerId, String> {
    s.parse::<u32>()
        .ok()
        .and_then(PlayerId::new)
        .ok_or_else(|| format!("`{s}` is not a positive integer"))
}

fn parse_entity_id(s: &str) -> Result<EntityId, String> {
    s.parse::<u32>()
        .ok()
        .and_then(EntityId::new)
        .ok_or_else(|| format!("`{s}` is not a positive integer"))
}

fn parse_positive(s: &str) -> Result<usize, String> {
    s.parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| format!("`{s}` is not a positive integer"))
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
    fn test_id_parsers() {
        assert_eq!(parse_player_id("7"), Ok(PlayerId::new(7).unwrap()));
        assert!(parse_player_id("0").is_err());
        assert!(parse_player_id("-3").is_err());
        assert!(parse_entity_id("x").is_err());
        assert_eq!(parse_positive("200"), Ok(200));
        assert!(parse_positive("0").is_err());
    }

    #[test]
    fn test_verbosity_is_global() {
        let args =
            CommandArgs::try_parse_from(["ipd", "distances", "data.json", "--player", "1", "-vv"])
                .unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.mode, Mode::Distances(_)));
    }
}
