//! Behavioral neighbor ranking
//!
//! Players are compared through their average recorded distance. For a
//! target player, every other player gets a signed
//! `delta = other.average_distance - target.average_distance` and the list is
//! sorted ascending by that delta.
//!
//! The delta is *signed*: a player who keeps on average closer to everything
//! than the target ranks before one who keeps farther away, even when the
//! farther player's absolute deviation is smaller.
//!
//! Equal deltas are ordered by ascending player ID so that the ranking never
//! depends on input order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::sample::PlayerId;

/// Average distance of one player over all their samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerAggregate {
    pub player: PlayerId,
    pub average_distance: f64,
}

/// One ranked neighbor of a target player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeighborEntry {
    pub player: PlayerId,
    /// `average_distance(neighbor) - average_distance(target)`, may be negative.
    pub delta: f64,
}

fn by_delta_then_player(a: &NeighborEntry, b: &NeighborEntry) -> Ordering {
    a.delta
        .total_cmp(&b.delta)
        .then_with(|| a.player.cmp(&b.player))
}

/// Ranks other players by similarity of their average distance.
///
/// # Examples
///
/// ```
/// use ipd_analysis::{
///     neighbor::{NeighborRanker, PlayerAggregate},
///     sample::PlayerId,
/// };
///
/// let aggregate = |id, average_distance| PlayerAggregate {
///     player: PlayerId::new(id).unwrap(),
///     average_distance,
/// };
/// let target = aggregate(1, 10.0);
/// let others = [aggregate(2, 20.0), aggregate(3, 30.0), aggregate(4, 5.0)];
///
/// let neighbors = NeighborRanker::new(10).rank(&target, &others);
/// let deltas = neighbors.iter().map(|n| n.delta).collect::<Vec<_>>();
/// assert_eq!(deltas, [-5.0, 10.0, 20.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborRanker {
    limit: usize,
}

impl NeighborRanker {
    pub const DEFAULT_LIMIT: usize = 10;

    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns at most `limit` neighbors of `target`, closest delta first.
    ///
    /// An entry of `others` for the target player itself is ignored.
    #[must_use]
    pub fn rank(&self, target: &PlayerAggregate, others: &[PlayerAggregate]) -> Vec<NeighborEntry> {
        if self.limit == 0 {
            return vec![];
        }

        let mut entries = others
            .iter()
            .filter(|other| other.player != target.player)
            .map(|other| NeighborEntry {
                player: other.player,
                delta: other.average_distance - target.average_distance,
            })
            .collect::<Vec<_>>();

        if entries.len() > self.limit {
            entries.select_nth_unstable_by(self.limit - 1, by_delta_then_player);
            entries.truncate(self.limit);
        }
        entries.sort_unstable_by(by_delta_then_player);
        entries
    }
}

impl Default for NeighborRanker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT)
    }
}
