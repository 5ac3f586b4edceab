use ipd_analysis::{sample::EntityId, store::DistanceRow};
use serde::Serialize;

/// Response body of the distance listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistancesResponse {
    pub distances: Vec<DistanceEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DistanceEntry {
    /// Entity ID
    pub id: EntityId,
    /// Distance in centimeters
    pub d: u32,
}

impl From<DistanceRow> for DistanceEntry {
    fn from(row: DistanceRow) -> Self {
        Self {
            id: row.entity,
            d: row.distance,
        }
    }
}

impl FromIterator<DistanceRow> for DistancesResponse {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = DistanceRow>,
    {
        Self {
            distances: iter.into_iter().map(DistanceEntry::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let response = [(3, 25), (1, 400)]
            .into_iter()
            .map(|(entity, distance)| DistanceRow {
                entity: EntityId::new(entity).unwrap(),
                distance,
            })
            .collect::<DistancesResponse>();
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"distances":[{"id":3,"d":25},{"id":1,"d":400}]}"#
        );
    }
}
