use std::path::PathBuf;

use anyhow::Context;
use ipd_analysis::{config::EngineConfig, orchestrator::InsightsOrchestrator, sample::PlayerId};

use crate::{
    schema::insights::InsightsResponse,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct InsightsArg {
    /// Path to the dataset JSON file
    dataset: PathBuf,
    /// Player to compute insights for
    #[arg(long, value_parser = super::parse_player_id)]
    player: PlayerId,
    /// Engine configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum number of neighbors, overriding the configuration
    #[arg(long)]
    neighbors: Option<usize>,
    /// Compute entities in parallel, overriding the configuration
    #[arg(long)]
    parallel: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl InsightsArg {
    fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_engine_config_file(path)?,
            None => EngineConfig::default(),
        };
        if let Some(limit) = self.neighbors {
            config.neighbor_limit = limit;
        }
        if self.parallel {
            config.parallel = true;
        }
        config.validate().context("Invalid engine configuration")?;
        Ok(config)
    }
}

pub(crate) fn run(arg: &InsightsArg) -> anyhow::Result<()> {
    let config = arg.engine_config()?;
    let store = util::read_dataset_file(&arg.dataset)?.to_store()?;

    tracing::info!(player = %arg.player, parallel = config.parallel, "computing insights");
    let orchestrator = InsightsOrchestrator::new(config);
    let result = orchestrator
        .compute_insights(&store, arg.player, None)
        .with_context(|| format!("Failed to compute insights for player {}", arg.player))?;
    tracing::info!(
        entities = result.stats.len(),
        neighbors = result.neighbors.len(),
        "insights computed"
    );

    Output::save_json(&InsightsResponse::from(result), arg.output.clone())
}
