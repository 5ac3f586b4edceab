//! Player-level insights
//!
//! [`InsightsOrchestrator`] fans a player's samples out per entity to the
//! [`EntityInsightComputer`], ranks neighbors with the [`NeighborRanker`] and
//! assembles an [`InsightsResult`].
//!
//! ```text
//! SampleSource
//!   ├─ samples_by_entity ──▶ EntityInsightComputer (per entity) ──▶ stats
//!   │                                                           └─▶ overview
//!   └─ player aggregates ──▶ NeighborRanker ──────────────────────▶ neighbors
//! ```
//!
//! Entities are independent, so with [`EngineConfig::parallel`] set they are
//! processed on the rayon thread pool. Results are keyed by entity in a
//! `BTreeMap`, so both paths produce identical output.

use std::collections::{BTreeMap, BTreeSet};

use ipd_stats::online::{OnlineStats, Summary};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    cancel::CancellationToken,
    config::EngineConfig,
    insight::{EntityInsight, EntityInsightComputer, EntityScan, InsightError},
    neighbor::{NeighborEntry, NeighborRanker, PlayerAggregate},
    sample::{EntityId, PlayerId, Sample},
    store::{SampleSource, StorageError},
    zone::Zone,
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum InsightsError {
    #[display("failed to fetch samples")]
    Storage(StorageError),
    #[display("failed to compute insights")]
    Insight(InsightError),
}

/// Player-wide view derived from the per-entity passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerOverview {
    /// Statistics over every sample of the player.
    pub overall: Summary<u32>,
    /// Entities with at least one sample in each zone.
    pub zone_entities: BTreeMap<Zone, BTreeSet<EntityId>>,
}

/// Everything the engine reports for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsResult {
    /// One insight per entity observed by the player.
    pub stats: BTreeMap<EntityId, EntityInsight>,
    /// Most similar players, closest signed delta first.
    pub neighbors: Vec<NeighborEntry>,
    /// `None` only if no entity had any sample.
    pub overview: Option<PlayerOverview>,
}

/// Computes [`InsightsResult`]s.
///
/// Holds no state besides its configuration; one orchestrator can serve
/// concurrent requests.
///
/// # Examples
///
/// ```
/// use ipd_analysis::{
///     config::EngineConfig,
///     orchestrator::InsightsOrchestrator,
///     sample::{PlayerId, Sample},
///     store::InMemorySampleStore,
/// };
///
/// let store = [(1, 1, 10), (1, 1, 10), (1, 2, 500), (2, 1, 40)]
///     .into_iter()
///     .map(|(p, e, d)| Sample::new(p, e, d).unwrap())
///     .collect::<InMemorySampleStore>();
///
/// let orchestrator = InsightsOrchestrator::new(EngineConfig::default());
/// let result = orchestrator
///     .compute_insights(&store, PlayerId::new(1).unwrap(), None)
///     .unwrap();
///
/// assert_eq!(result.stats.len(), 2);
/// assert_eq!(result.neighbors.len(), 1);
/// let expected_delta = 40.0 - 520.0 / 3.0;
/// assert!((result.neighbors[0].delta - expected_delta).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct InsightsOrchestrator {
    parallel: bool,
    computer: EntityInsightComputer,
    ranker: NeighborRanker,
}

impl InsightsOrchestrator {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            parallel: config.parallel,
            computer: EntityInsightComputer::new(&config),
            ranker: NeighborRanker::new(config.neighbor_limit),
        }
    }

    /// Fetches `player`'s data from `source` and computes their insights.
    pub fn compute_insights<S>(
        &self,
        source: &S,
        player: PlayerId,
        cancel: Option<&CancellationToken>,
    ) -> Result<InsightsResult, InsightsError>
    where
        S: SampleSource + ?Sized,
    {
        let groups = source.samples_by_entity(player)?;
        let target = source.player_aggregate(player)?;
        let others = source.player_aggregates_excluding(player)?;
        Ok(self.build_insights(player, &groups, &target, &others, cancel)?)
    }

    /// Computes insights from already-fetched data.
    ///
    /// Empty entity groups are skipped and do not appear in `stats`. Every
    /// sample must belong to `player` and to the entity it is grouped under.
    /// On error no partial result is returned.
    pub fn build_insights(
        &self,
        player: PlayerId,
        groups: &BTreeMap<EntityId, Vec<Sample>>,
        target: &PlayerAggregate,
        others: &[PlayerAggregate],
        cancel: Option<&CancellationToken>,
    ) -> Result<InsightsResult, InsightError> {
        let groups = groups
            .iter()
            .filter(|(_, samples)| !samples.is_empty())
            .collect::<Vec<_>>();

        tracing::debug!(
            %player,
            entities = groups.len(),
            others = others.len(),
            parallel = self.parallel,
            "computing insights"
        );

        let scan = |&(entity, samples): &(&EntityId, &Vec<Sample>)| {
            self.computer
                .scan(Some(player), *entity, samples, cancel)
                .map(|scan| (*entity, scan))
        };
        let scans = if self.parallel {
            groups.par_iter().map(scan).collect::<Result<Vec<_>, _>>()?
        } else {
            groups.iter().map(scan).collect::<Result<Vec<_>, _>>()?
        };

        let overview = overview(&scans);
        let stats = scans
            .into_iter()
            .map(|(entity, scan)| Ok((entity, scan.into_insight(entity)?)))
            .collect::<Result<BTreeMap<_, _>, InsightError>>()?;
        let neighbors = self.ranker.rank(target, others);

        tracing::debug!(
            %player,
            entities = stats.len(),
            neighbors = neighbors.len(),
            "insights computed"
        );

        Ok(InsightsResult {
            stats,
            neighbors,
            overview,
        })
    }
}

fn overview(scans: &[(EntityId, EntityScan)]) -> Option<PlayerOverview> {
    let mut overall = OnlineStats::new();
    let mut zone_entities = Zone::ALL
        .into_iter()
        .map(|zone| (zone, BTreeSet::new()))
        .collect::<BTreeMap<_, _>>();

    for (entity, scan) in scans {
        overall.merge(&scan.stats);
        for zone in scan.crossings.zones() {
            zone_entities.entry(zone).or_default().insert(*entity);
        }
    }

    Some(PlayerOverview {
        overall: overall.summary()?,
        zone_entities,
    })
}
