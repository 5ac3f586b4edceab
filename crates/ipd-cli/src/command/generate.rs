use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use ipd_analysis::sample::Sample;
use rand::{Rng, SeedableRng as _};
use rand_distr::{Distribution as _, Normal};
use rand_pcg::Pcg32;

use crate::{schema::dataset::Dataset, util::Output};

/// Number of entities observed by the two small reference players.
const REFERENCE_ENTITIES: i64 = 200;
/// Number of entities observed by the large reference player.
const LARGE_REFERENCE_ENTITIES: i64 = 10_000;
/// Each reference measurement is recorded twice.
const REFERENCE_REPEATS: usize = 2;
/// First ID handed to random players.
const FIRST_RANDOM_PLAYER: i64 = 4;

/// Range of the per-player preferred distance of random players.
const PREFERRED_DISTANCE: std::ops::Range<f64> = 20.0..600.0;
/// Standard deviation of a random player's distances, relative to their
/// preferred distance.
const RELATIVE_SPREAD: f64 = 0.3;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Number of random players added after the reference players
    #[arg(long, default_value_t = 0)]
    random_players: u32,
    /// Entities observed by each random player
    #[arg(long, default_value_t = 100)]
    random_entities: u32,
    /// Samples recorded per entity for random players
    #[arg(long, default_value_t = 5)]
    samples_per_entity: u32,
    /// Seed of the random number generator
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let mut samples = reference_samples()?;
    tracing::info!(samples = samples.len(), "reference players generated");

    let mut rng = Pcg32::seed_from_u64(arg.seed);
    for offset in 0..arg.random_players {
        let player = FIRST_RANDOM_PLAYER + i64::from(offset);
        random_player_samples(
            &mut rng,
            player,
            arg.random_entities,
            arg.samples_per_entity,
            &mut samples,
        )?;
    }
    if arg.random_players > 0 {
        tracing::info!(
            players = arg.random_players,
            seed = arg.seed,
            "random players generated"
        );
    }

    let dataset = Dataset {
        generated_at: Some(Utc::now()),
        samples: samples.into_iter().map(Into::into).collect(),
    };
    tracing::info!(samples = dataset.samples.len(), "writing dataset");
    Output::save_json(&dataset, arg.output.clone())
}

/// Players 1 to 3: one always 10 cm away, one on a linear ramp, one with
/// many entities.
fn reference_samples() -> anyhow::Result<Vec<Sample>> {
    let players: [(i64, i64, fn(i64) -> i64); 3] = [
        (1, REFERENCE_ENTITIES, |_| 10),
        (2, REFERENCE_ENTITIES, |i| 10 * i),
        (3, LARGE_REFERENCE_ENTITIES, |i| 10 * i),
    ];

    let mut samples = vec![];
    for (player, entities, distance) in players {
        for entity in 1..=entities {
            let sample = Sample::new(player, entity, distance(entity))?;
            samples.extend(std::iter::repeat_n(sample, REFERENCE_REPEATS));
        }
    }
    Ok(samples)
}

#[expect(clippy::cast_possible_truncation)]
fn random_player_samples<R>(
    rng: &mut R,
    player: i64,
    entities: u32,
    samples_per_entity: u32,
    samples: &mut Vec<Sample>,
) -> anyhow::Result<()>
where
    R: Rng,
{
    let preferred = rng.random_range(PREFERRED_DISTANCE);
    let normal = Normal::new(preferred, preferred * RELATIVE_SPREAD)
        .context("Failed to build distance distribution")?;

    for entity in 1..=i64::from(entities) {
        for _ in 0..samples_per_entity {
            let distance = normal.sample(rng).max(0.0).round() as i64;
            samples.push(Sample::new(player, entity, distance)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use ipd_analysis::{
        config::EngineConfig,
        orchestrator::InsightsOrchestrator,
        sample::{EntityId, PlayerId},
        store::InMemorySampleStore,
        zone::Zone,
    };

    use super::*;

    fn player(id: u32) -> PlayerId {
        PlayerId::new(id).unwrap()
    }

    #[test]
    fn test_reference_dataset_shape() {
        let samples = reference_samples().unwrap();
        assert_eq!(samples.len(), 2 * (200 + 200 + 10_000));
        assert!(
            samples
                .iter()
                .filter(|s| s.player == player(1))
                .all(|s| s.distance == 10)
        );
        let last = samples.last().unwrap();
        assert_eq!(last.player, player(3));
        assert_eq!(last.entity.get(), 10_000);
        assert_eq!(last.distance, 100_000);
    }

    #[test]
    fn test_reference_insights() {
        let store = reference_samples()
            .unwrap()
            .into_iter()
            .collect::<InMemorySampleStore>();
        let orchestrator = InsightsOrchestrator::new(EngineConfig::default());

        let result = orchestrator.compute_insights(&store, player(1), None).unwrap();
        assert_eq!(result.stats.len(), 200);
        for insight in result.stats.values() {
            assert_eq!((insight.min, insight.max, insight.count), (10, 10, 2));
            assert_eq!(insight.variance.value(), Some(0.0));
            assert_eq!(insight.crossings.len(), 1);
            assert_eq!(insight.crossings[0].zone, Zone::Intimate);
        }
        let neighbor_ids = result
            .neighbors
            .iter()
            .map(|n| n.player.get())
            .collect::<Vec<_>>();
        assert_eq!(neighbor_ids, [2, 3]);

        let result = orchestrator.compute_insights(&store, player(2), None).unwrap();
        let entity_200 = &result.stats[&EntityId::new(200).unwrap()];
        assert_eq!(entity_200.min, 2000);
        assert_eq!(entity_200.crossings[0].zone, Zone::Public);
    }

    #[test]
    fn test_random_players_are_deterministic() {
        let generate = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut samples = vec![];
            random_player_samples(&mut rng, 4, 10, 3, &mut samples).unwrap();
            samples
        };
        let first = generate(7);
        assert_eq!(first.len(), 30);
        assert_eq!(first, generate(7));
        assert!(first.iter().all(|s| s.player == player(4)));
    }
}
