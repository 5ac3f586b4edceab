use std::path::PathBuf;

use anyhow::Context;
use clap::ArgGroup;
use ipd_analysis::{
    distance::{Position, interpersonal_distance},
    sample::{EntityId, PlayerId, Sample},
};

use crate::{
    schema::dataset::Dataset,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
#[command(group(
    ArgGroup::new("measurement")
        .required(true)
        .args(["distance", "from"])
))]
pub(crate) struct AddArg {
    /// Path to the dataset JSON file, created if missing
    dataset: PathBuf,
    /// Subject player
    #[arg(long, value_parser = super::parse_player_id)]
    player: PlayerId,
    /// Observed entity
    #[arg(long, value_parser = super::parse_entity_id)]
    entity: EntityId,
    /// Distance in centimeters
    #[arg(long, allow_negative_numbers = true)]
    distance: Option<i64>,
    /// Player position `x,y,z` in centimeters
    #[arg(long, requires = "to", allow_hyphen_values = true)]
    from: Option<Position>,
    /// Entity position `x,y,z` in centimeters
    #[arg(long, requires = "from", allow_hyphen_values = true)]
    to: Option<Position>,
}

impl AddArg {
    fn sample(&self) -> anyhow::Result<Sample> {
        let distance = match (self.distance, &self.from, &self.to) {
            (Some(distance), _, _) => distance,
            (None, Some(from), Some(to)) => interpersonal_distance(from, to)
                .context("Failed to compute distance between positions")?
                .into(),
            _ => anyhow::bail!("Either --distance or both --from and --to are required"),
        };
        let sample = Sample::new(
            self.player.get().into(),
            self.entity.get().into(),
            distance,
        )?;
        Ok(sample)
    }
}

pub(crate) fn run(arg: &AddArg) -> anyhow::Result<()> {
    let sample = arg.sample()?;

    let mut dataset = if arg.dataset.exists() {
        let dataset = util::read_dataset_file(&arg.dataset)?;
        dataset.to_store().with_context(|| {
            format!("Refusing to append to invalid dataset: {}", arg.dataset.display())
        })?;
        dataset
    } else {
        tracing::info!(path = %arg.dataset.display(), "creating new dataset");
        Dataset::default()
    };
    dataset.push(sample);

    tracing::info!(
        player = %sample.player,
        entity = %sample.entity,
        distance = sample.distance,
        "sample added"
    );
    Output::save_json(&dataset, Some(arg.dataset.clone()))
}
