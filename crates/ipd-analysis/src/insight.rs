//! Per-entity insights
//!
//! [`EntityInsightComputer`] walks one entity's samples once, feeding each
//! distance to both an [`OnlineStats`] accumulator and a [`CrossingTracker`].
//! The two units are independent and separately tested; the computer only
//! owns the traversal, the sample validation and the cancellation polling.
//!
//! # Invariants of the result
//!
//! - `crossings` is never empty and its run lengths sum to `count`
//! - `variance` is undefined exactly when `count == 1`
//! - `min <= mean <= max`

use ipd_stats::{online::OnlineStats, variance::SampleVariance};
use serde::{Deserialize, Serialize};

use crate::{
    cancel::CancellationToken,
    config::EngineConfig,
    crossing::{CrossingTracker, ZoneRun},
    sample::{EntityId, InvalidSampleError, PlayerId, Sample},
    zone::{Zone, ZoneClassifier},
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum InsightError {
    #[display("invalid sample")]
    #[from]
    InvalidSample(InvalidSampleError),
    #[display("no samples for entity {entity}")]
    EmptyGroup { entity: EntityId },
    #[display("insight computation was cancelled")]
    Cancelled,
}

/// Statistics and zone history of one player's distances to one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityInsight {
    pub min: u32,
    pub max: u32,
    pub mean: f64,
    pub count: usize,
    pub variance: SampleVariance,
    pub crossings: Vec<ZoneRun>,
}

impl EntityInsight {
    /// Number of zone changes in the history.
    #[must_use]
    pub fn num_crossings(&self) -> usize {
        self.crossings.len().saturating_sub(1)
    }

    /// Returns `true` if at least one sample fell into `zone`.
    #[must_use]
    pub fn visited(&self, zone: Zone) -> bool {
        self.crossings.iter().any(|run| run.zone == zone)
    }
}

/// Accumulators after a completed pass over one entity's samples.
#[derive(Debug, Clone)]
pub(crate) struct EntityScan {
    pub(crate) stats: OnlineStats<u32>,
    pub(crate) crossings: CrossingTracker,
}

impl EntityScan {
    pub(crate) fn into_insight(self, entity: EntityId) -> Result<EntityInsight, InsightError> {
        let summary = self
            .stats
            .summary()
            .ok_or(InsightError::EmptyGroup { entity })?;
        Ok(EntityInsight {
            min: summary.min,
            max: summary.max,
            mean: summary.mean,
            count: summary.count,
            variance: summary.variance,
            crossings: self.crossings.finish(),
        })
    }
}

/// Computes an [`EntityInsight`] from one entity's ordered samples.
///
/// # Examples
///
/// ```
/// use ipd_analysis::{
///     config::EngineConfig,
///     insight::EntityInsightComputer,
///     sample::{EntityId, Sample},
///     zone::Zone,
/// };
///
/// let computer = EntityInsightComputer::new(&EngineConfig::default());
/// let samples = [10, 20, 60]
///     .map(|d| Sample::new(1, 5, d).unwrap());
/// let insight = computer
///     .compute(EntityId::new(5).unwrap(), &samples, None)
///     .unwrap();
///
/// assert_eq!(insight.count, 3);
/// assert_eq!(insight.min, 10);
/// assert_eq!(insight.max, 60);
/// assert_eq!(insight.crossings.len(), 2);
/// assert_eq!(insight.crossings[1].zone, Zone::Personal);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EntityInsightComputer {
    classifier: ZoneClassifier,
    cancel_check_interval: usize,
}

impl EntityInsightComputer {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            classifier: config.zones,
            cancel_check_interval: config.cancel_check_interval.max(1),
        }
    }

    /// Computes the insight for `entity`.
    ///
    /// Every sample must belong to `entity`, and `samples` must be non-empty.
    /// Samples are consumed in the given order and never reordered.
    pub fn compute(
        &self,
        entity: EntityId,
        samples: &[Sample],
        cancel: Option<&CancellationToken>,
    ) -> Result<EntityInsight, InsightError> {
        self.scan(None, entity, samples, cancel)?
            .into_insight(entity)
    }

    /// Like [`compute`](Self::compute), additionally requiring every sample to
    /// belong to `player`.
    pub fn compute_for_player(
        &self,
        player: PlayerId,
        entity: EntityId,
        samples: &[Sample],
        cancel: Option<&CancellationToken>,
    ) -> Result<EntityInsight, InsightError> {
        self.scan(Some(player), entity, samples, cancel)?
            .into_insight(entity)
    }

    pub(crate) fn scan(
        &self,
        player: Option<PlayerId>,
        entity: EntityId,
        samples: &[Sample],
        cancel: Option<&CancellationToken>,
    ) -> Result<EntityScan, InsightError> {
        if samples.is_empty() {
            return Err(InsightError::EmptyGroup { entity });
        }

        let mut stats = OnlineStats::new();
        let mut crossings = CrossingTracker::new(self.classifier);
        for (index, sample) in samples.iter().enumerate() {
            if index % self.cancel_check_interval == 0
                && cancel.is_some_and(CancellationToken::is_cancelled)
            {
                return Err(InsightError::Cancelled);
            }
            if sample.entity != entity {
                return Err(InvalidSampleError::WrongEntity {
                    index,
                    expected: entity,
                    found: sample.entity,
                }
                .into());
            }
            if let Some(player) = player
                && sample.player != player
            {
                return Err(InvalidSampleError::WrongPlayer {
                    index,
                    expected: player,
                    found: sample.player,
                }
                .into());
            }

            stats.push(sample.distance);
            crossings.push(sample.distance);
        }

        tracing::trace!(
            %entity,
            count = stats.count(),
            runs = crossings.num_crossings() + 1,
            "scanned entity samples"
        );

        Ok(EntityScan { stats, crossings })
    }
}
