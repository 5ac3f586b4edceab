//! Storage collaborator interface and an in-memory implementation
//!
//! The engine never reads or writes storage itself. [`SampleSource`] is the
//! seam through which [`InsightsOrchestrator::compute_insights`] obtains
//! already-fetched data; a database-backed source would implement the same
//! trait.
//!
//! [`InMemorySampleStore`] keeps samples in insertion order, which is the
//! order the engine sees within each entity group.
//!
//! [`InsightsOrchestrator::compute_insights`]: crate::orchestrator::InsightsOrchestrator::compute_insights

use std::collections::BTreeMap;

use ipd_stats::online::OnlineStats;

use crate::{
    neighbor::PlayerAggregate,
    sample::{EntityId, PlayerId, Sample},
};

/// Default number of rows per page of [`InMemorySampleStore::distances`].
pub const DEFAULT_PAGE_SIZE: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StorageError {
    #[display("no samples recorded for player {player}")]
    UnknownPlayer { player: PlayerId },
}

/// Read access to recorded samples, as needed by the insights engine.
pub trait SampleSource {
    /// All samples of `player`, grouped by entity, each group in insertion order.
    fn samples_by_entity(
        &self,
        player: PlayerId,
    ) -> Result<BTreeMap<EntityId, Vec<Sample>>, StorageError>;

    /// Average distance of `player` over all their samples.
    fn player_aggregate(&self, player: PlayerId) -> Result<PlayerAggregate, StorageError>;

    /// Average distance of every player except `excluding`.
    fn player_aggregates_excluding(
        &self,
        excluding: PlayerId,
    ) -> Result<Vec<PlayerAggregate>, StorageError>;
}

/// Column to sort a distance listing by.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Distance,
    Entity,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Paged listing of a player's raw distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceQuery {
    pub sort: SortKey,
    pub order: SortOrder,
    /// 1-based page number; 0 is treated as 1.
    pub page: usize,
    pub page_size: usize,
}

impl Default for DistanceQuery {
    fn default() -> Self {
        Self {
            sort: SortKey::default(),
            order: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One row of a distance listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceRow {
    pub entity: EntityId,
    pub distance: u32,
}

/// Samples held in memory, in insertion order.
///
/// # Examples
///
/// ```
/// use ipd_analysis::{
///     sample::{PlayerId, Sample},
///     store::{InMemorySampleStore, SampleSource},
/// };
///
/// let store = [(1, 1, 10), (1, 2, 30), (2, 1, 100)]
///     .into_iter()
///     .map(|(p, e, d)| Sample::new(p, e, d).unwrap())
///     .collect::<InMemorySampleStore>();
///
/// let player = PlayerId::new(1).unwrap();
/// assert_eq!(store.samples_by_entity(player).unwrap().len(), 2);
/// assert_eq!(store.player_aggregate(player).unwrap().average_distance, 20.0);
/// assert_eq!(store.player_aggregates_excluding(player).unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySampleStore {
    samples: Vec<Sample>,
}

impl InMemorySampleStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sample. Duplicate samples are kept.
    pub fn insert(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    fn samples_of(&self, player: PlayerId) -> impl Iterator<Item = &Sample> {
        self.samples.iter().filter(move |s| s.player == player)
    }

    fn distance_stats_by_player(&self) -> BTreeMap<PlayerId, OnlineStats<u32>> {
        let mut by_player = BTreeMap::<PlayerId, OnlineStats<u32>>::new();
        for sample in &self.samples {
            by_player
                .entry(sample.player)
                .or_default()
                .push(sample.distance);
        }
        by_player
    }

    /// Lists one page of `player`'s distances.
    ///
    /// Sorting is stable: rows with equal keys keep insertion order.
    #[must_use]
    pub fn distances(&self, player: PlayerId, query: &DistanceQuery) -> Vec<DistanceRow> {
        let mut rows = self
            .samples_of(player)
            .map(|s| DistanceRow {
                entity: s.entity,
                distance: s.distance,
            })
            .collect::<Vec<_>>();

        match (query.sort, query.order) {
            (SortKey::Distance, SortOrder::Ascending) => rows.sort_by_key(|r| r.distance),
            (SortKey::Distance, SortOrder::Descending) => {
                rows.sort_by(|a, b| b.distance.cmp(&a.distance));
            }
            (SortKey::Entity, SortOrder::Ascending) => rows.sort_by_key(|r| r.entity),
            (SortKey::Entity, SortOrder::Descending) => rows.sort_by(|a, b| b.entity.cmp(&a.entity)),
        }

        let skip = query.page.saturating_sub(1).saturating_mul(query.page_size);
        rows.into_iter().skip(skip).take(query.page_size).collect()
    }
}

impl SampleSource for InMemorySampleStore {
    fn samples_by_entity(
        &self,
        player: PlayerId,
    ) -> Result<BTreeMap<EntityId, Vec<Sample>>, StorageError> {
        let mut groups = BTreeMap::<EntityId, Vec<Sample>>::new();
        for sample in self.samples_of(player) {
            groups.entry(sample.entity).or_default().push(*sample);
        }
        if groups.is_empty() {
            return Err(StorageError::UnknownPlayer { player });
        }
        Ok(groups)
    }

    fn player_aggregate(&self, player: PlayerId) -> Result<PlayerAggregate, StorageError> {
        let stats = self
            .samples_of(player)
            .map(|s| s.distance)
            .collect::<OnlineStats<_>>();
        let average_distance = stats.mean().ok_or(StorageError::UnknownPlayer { player })?;
        Ok(PlayerAggregate {
            player,
            average_distance,
        })
    }

    fn player_aggregates_excluding(
        &self,
        excluding: PlayerId,
    ) -> Result<Vec<PlayerAggregate>, StorageError> {
        Ok(self
            .distance_stats_by_player()
            .into_iter()
            .filter(|(player, _)| *player != excluding)
            .filter_map(|(player, stats)| {
                stats.mean().map(|average_distance| PlayerAggregate {
                    player,
                    average_distance,
                })
            })
            .collect())
    }
}

impl Extend<Sample> for InMemorySampleStore {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = Sample>,
    {
        self.samples.extend(iter);
    }
}

impl FromIterator<Sample> for InMemorySampleStore {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Sample>,
    {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u32) -> PlayerId {
        PlayerId::new(id).unwrap()
    }

    fn store(rows: &[(i64, i64, i64)]) -> InMemorySampleStore {
        rows.iter()
            .map(|&(p, e, d)| Sample::new(p, e, d).unwrap())
            .collect()
    }

    #[test]
    fn test_groups_keep_insertion_order() {
        let store = store(&[(1, 2, 30), (1, 1, 10), (2, 1, 99), (1, 2, 5), (1, 1, 400)]);
        let groups = store.samples_by_entity(player(1)).unwrap();
        let distances = |entity: u32| {
            groups[&EntityId::new(entity).unwrap()]
                .iter()
                .map(|s| s.distance)
                .collect::<Vec<_>>()
        };
        assert_eq!(groups.len(), 2);
        assert_eq!(distances(1), [10, 400]);
        assert_eq!(distances(2), [30, 5]);
    }

    #[test]
    fn test_unknown_player() {
        let store = store(&[(1, 1, 10)]);
        assert_eq!(
            store.samples_by_entity(player(5)),
            Err(StorageError::UnknownPlayer { player: player(5) })
        );
        assert_eq!(
            store.player_aggregate(player(5)),
            Err(StorageError::UnknownPlayer { player: player(5) })
        );
    }

    #[test]
    fn test_aggregates() {
        let store = store(&[(1, 1, 10), (1, 2, 20), (2, 1, 5), (3, 1, 7), (3, 1, 9)]);
        let target = store.player_aggregate(player(1)).unwrap();
        assert_eq!(target.average_distance, 15.0);

        let others = store.player_aggregates_excluding(player(1)).unwrap();
        assert_eq!(
            others,
            vec![
                PlayerAggregate {
                    player: player(2),
                    average_distance: 5.0
                },
                PlayerAggregate {
                    player: player(3),
                    average_distance: 8.0
                },
            ]
        );
    }

    #[test]
    fn test_distance_listing() {
        let mut store = store(&[(1, 3, 30), (1, 1, 10), (1, 2, 30), (2, 1, 1)]);
        store.insert(Sample::new(1, 4, 20).unwrap());
        assert_eq!(store.len(), 5);

        let rows = |sort, order, page, page_size| {
            store
                .distances(
                    player(1),
                    &DistanceQuery {
                        sort,
                        order,
                        page,
                        page_size,
                    },
                )
                .into_iter()
                .map(|r| (r.entity.get(), r.distance))
                .collect::<Vec<_>>()
        };

        assert_eq!(
            rows(SortKey::Distance, SortOrder::Ascending, 1, 10),
            [(1, 10), (4, 20), (3, 30), (2, 30)]
        );
        assert_eq!(
            rows(SortKey::Distance, SortOrder::Descending, 1, 10),
            [(3, 30), (2, 30), (4, 20), (1, 10)]
        );
        assert_eq!(
            rows(SortKey::Entity, SortOrder::Descending, 1, 10),
            [(4, 20), (3, 30), (2, 30), (1, 10)]
        );
        assert_eq!(
            rows(SortKey::Entity, SortOrder::Ascending, 2, 3),
            [(4, 20)]
        );
        assert!(rows(SortKey::Entity, SortOrder::Ascending, 3, 3).is_empty());
        assert_eq!(rows(SortKey::Entity, SortOrder::Ascending, 0, 1), [(1, 10)]);
    }
}
