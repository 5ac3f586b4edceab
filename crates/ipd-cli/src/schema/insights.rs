use std::collections::BTreeMap;

use ipd_analysis::{
    insight::EntityInsight,
    neighbor::NeighborEntry,
    orchestrator::{InsightsResult, PlayerOverview},
    sample::{EntityId, PlayerId},
    zone::Zone,
};
use serde::Serialize;

/// Response body of the insights query
///
/// `stats` is keyed by entity ID, which JSON renders as a string.
#[derive(Debug, Clone, Serialize)]
pub struct InsightsResponse {
    pub stats: BTreeMap<EntityId, EntityInsight>,
    pub neighbors: Vec<Neighbor>,
    /// Player-wide statistics, `null` when the player has no samples
    pub overall: Option<OverallStats>,
    pub intimate_space: Vec<EntityId>,
    pub personal_space: Vec<EntityId>,
    pub social_space: Vec<EntityId>,
    pub public_space: Vec<EntityId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neighbor {
    pub id: PlayerId,
    /// Signed difference of average distance, neighbor minus target
    pub neighbor_dist: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverallStats {
    pub min: u32,
    pub max: u32,
    pub average: f64,
    pub count: usize,
}

impl From<NeighborEntry> for Neighbor {
    fn from(entry: NeighborEntry) -> Self {
        Self {
            id: entry.player,
            neighbor_dist: entry.delta,
        }
    }
}

impl From<InsightsResult> for InsightsResponse {
    fn from(result: InsightsResult) -> Self {
        let InsightsResult {
            stats,
            neighbors,
            overview,
        } = result;

        let (overall, mut zone_entities) = match overview {
            Some(PlayerOverview {
                overall,
                zone_entities,
            }) => (
                Some(OverallStats {
                    min: overall.min,
                    max: overall.max,
                    average: overall.mean,
                    count: overall.count,
                }),
                zone_entities,
            ),
            None => (None, BTreeMap::new()),
        };
        let mut space = |zone: Zone| -> Vec<EntityId> {
            zone_entities
                .remove(&zone)
                .unwrap_or_default()
                .into_iter()
                .collect()
        };

        Self {
            stats,
            neighbors: neighbors.into_iter().map(Neighbor::from).collect(),
            overall,
            intimate_space: space(Zone::Intimate),
            personal_space: space(Zone::Personal),
            social_space: space(Zone::Social),
            public_space: space(Zone::Public),
        }
    }
}

#[cfg(test)]
mod tests {
    use ipd_analysis::{
        config::EngineConfig, orchestrator::InsightsOrchestrator, sample::Sample,
        store::InMemorySampleStore,
    };
    use serde_json::json;

    use super::*;

    fn response(rows: &[(i64, i64, i64)], player: u32) -> serde_json::Value {
        let store = rows
            .iter()
            .map(|&(p, e, d)| Sample::new(p, e, d).unwrap())
            .collect::<InMemorySampleStore>();
        let result = InsightsOrchestrator::new(EngineConfig::default())
            .compute_insights(&store, PlayerId::new(player).unwrap(), None)
            .unwrap();
        serde_json::to_value(InsightsResponse::from(result)).unwrap()
    }

    #[test]
    fn test_wire_format() {
        let value = response(&[(1, 1, 10), (1, 1, 10), (1, 2, 400), (2, 1, 30)], 1);
        assert_eq!(
            value,
            json!({
                "stats": {
                    "1": {
                        "min": 10,
                        "max": 10,
                        "mean": 10.0,
                        "count": 2,
                        "variance": 0.0,
                        "crossings": [{ "zone": "intimate", "length": 2 }]
                    },
                    "2": {
                        "min": 400,
                        "max": 400,
                        "mean": 400.0,
                        "count": 1,
                        "variance": null,
                        "crossings": [{ "zone": "public", "length": 1 }]
                    }
                },
                "neighbors": [{ "id": 2, "neighbor_dist": -110.0 }],
                "overall": { "min": 10, "max": 400, "average": 140.0, "count": 3 },
                "intimate_space": [1],
                "personal_space": [],
                "social_space": [],
                "public_space": [2]
            })
        );
    }

    #[test]
    fn test_stats_keys_sort_numerically() {
        let store = [(1, 10, 50), (1, 9, 50), (1, 100, 50)]
            .into_iter()
            .map(|(p, e, d)| Sample::new(p, e, d).unwrap())
            .collect::<InMemorySampleStore>();
        let result = InsightsOrchestrator::new(EngineConfig::default())
            .compute_insights(&store, PlayerId::new(1).unwrap(), None)
            .unwrap();
        let text = serde_json::to_string(&InsightsResponse::from(result)).unwrap();

        let position = |key: &str| text.find(&format!("\"{key}\":{{")).unwrap();
        assert!(position("9") < position("10"));
        assert!(position("10") < position("100"));
        assert!(text.contains(r#""personal_space":[9,10,100]"#));
        assert!(text.contains(r#""neighbors":[]"#));
    }
}
