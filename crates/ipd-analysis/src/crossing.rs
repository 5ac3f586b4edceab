//! Zone crossing history
//!
//! [`CrossingTracker`] classifies each distance of an ordered sample stream
//! and run-length encodes the resulting zones. Every change of zone between
//! two consecutive samples closes one [`ZoneRun`] and opens the next, so the
//! number of crossings is always one less than the number of runs.
//!
//! The history depends on sample order: reordering the same samples leaves
//! the statistics unchanged but may produce different runs.

use ipd_stats::runs::{Run, RunLengthEncoder};
use serde::{Deserialize, Serialize};

use crate::zone::{Zone, ZoneClassifier};

/// A maximal stretch of consecutive samples in the same zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneRun {
    pub zone: Zone,
    /// Number of samples in the run (at least one).
    pub length: usize,
}

impl From<Run<Zone>> for ZoneRun {
    fn from(run: Run<Zone>) -> Self {
        Self {
            zone: run.value,
            length: run.length,
        }
    }
}

/// Streaming zone run tracker.
///
/// # Examples
///
/// ```
/// use ipd_analysis::{
///     crossing::{CrossingTracker, ZoneRun},
///     zone::{Zone, ZoneClassifier},
/// };
///
/// let mut tracker = CrossingTracker::new(ZoneClassifier::default());
/// for d in [10, 20, 50, 30] {
///     tracker.push(d);
/// }
/// assert_eq!(tracker.num_crossings(), 2);
/// assert_eq!(
///     tracker.finish(),
///     vec![
///         ZoneRun { zone: Zone::Intimate, length: 2 },
///         ZoneRun { zone: Zone::Personal, length: 1 },
///         ZoneRun { zone: Zone::Intimate, length: 1 },
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CrossingTracker {
    classifier: ZoneClassifier,
    encoder: RunLengthEncoder<Zone>,
}

impl CrossingTracker {
    #[must_use]
    pub fn new(classifier: ZoneClassifier) -> Self {
        Self {
            classifier,
            encoder: RunLengthEncoder::new(),
        }
    }

    /// Classifies one distance and extends the history; returns its zone.
    pub fn push(&mut self, distance: u32) -> Zone {
        let zone = self.classifier.classify(distance);
        self.encoder.push(zone);
        zone
    }

    /// Zone of the most recent sample.
    #[must_use]
    pub fn current_zone(&self) -> Option<Zone> {
        self.encoder.current().map(|run| run.value)
    }

    /// Zone of each run so far, in order; a zone appears once per visit.
    pub fn zones(&self) -> impl Iterator<Item = Zone> {
        self.encoder.runs().iter().map(|run| run.value)
    }

    /// Number of zone changes seen so far.
    #[must_use]
    pub fn num_crossings(&self) -> usize {
        self.encoder.num_runs().saturating_sub(1)
    }

    /// Returns the runs in sample order, including the still-open last run.
    #[must_use]
    pub fn finish(self) -> Vec<ZoneRun> {
        self.encoder
            .finish()
            .into_iter()
            .map(ZoneRun::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn track<I>(distances: I) -> Vec<ZoneRun>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut tracker = CrossingTracker::new(ZoneClassifier::default());
        for d in distances {
            tracker.push(d);
        }
        tracker.finish()
    }

    #[test]
    fn test_single_sample() {
        assert_eq!(
            track([400]),
            vec![ZoneRun {
                zone: Zone::Public,
                length: 1
            }]
        );
    }

    #[test]
    fn test_monotonic_sweep() {
        let runs = track((1..=200).map(|i| i * 10));
        assert_eq!(
            runs,
            vec![
                ZoneRun { zone: Zone::Intimate, length: 4 },
                ZoneRun { zone: Zone::Personal, length: 7 },
                ZoneRun { zone: Zone::Social, length: 24 },
                ZoneRun { zone: Zone::Public, length: 165 },
            ]
        );
    }

    #[test]
    fn test_boundary_oscillation() {
        let runs = track([44, 45, 44, 45]);
        assert_eq!(runs.len(), 4);
        assert!(runs.iter().all(|run| run.length == 1));
    }

    #[test]
    fn test_order_sensitivity() {
        let forward = track([10, 10, 400, 400]);
        let shuffled = track([10, 400, 10, 400]);
        assert_eq!(forward.len(), 2);
        assert_eq!(shuffled.len(), 4);
    }

    proptest! {
        #[test]
        fn prop_lengths_sum_to_count(distances in proptest::collection::vec(0_u32..1000, 1..400)) {
            let runs = track(distances.iter().copied());
            prop_assert!(!runs.is_empty());
            prop_assert_eq!(runs.iter().map(|run| run.length).sum::<usize>(), distances.len());
            for pair in runs.windows(2) {
                prop_assert_ne!(pair[0].zone, pair[1].zone);
            }
        }
    }
}
