use anyhow::Context;
use chrono::{DateTime, Utc};
use ipd_analysis::{sample::Sample, store::InMemorySampleStore};
use serde::{Deserialize, Serialize};

/// Recorded IPD samples, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Timestamp when the dataset was generated (ISO 8601 format)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    /// Samples in the order they were recorded
    pub samples: Vec<SampleRecord>,
}

/// A single sample as stored on disk.
///
/// Fields are signed so that malformed records survive parsing and are
/// rejected by [`Sample::new`] with a precise message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub player_id: i64,
    pub entity_id: i64,
    /// Distance in centimeters
    pub distance: i64,
}

impl From<Sample> for SampleRecord {
    fn from(sample: Sample) -> Self {
        Self {
            player_id: sample.player.get().into(),
            entity_id: sample.entity.get().into(),
            distance: sample.distance.into(),
        }
    }
}

impl Dataset {
    /// Validates every record and loads them into a store.
    pub fn to_store(&self) -> anyhow::Result<InMemorySampleStore> {
        self.samples
            .iter()
            .enumerate()
            .map(|(index, record)| {
                Sample::new(record.player_id, record.entity_id, record.distance)
                    .with_context(|| format!("Invalid sample #{index}: {record:?}"))
            })
            .collect()
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_timestamp() {
        let json = r#"{"samples":[{"player_id":1,"entity_id":2,"distance":30}]}"#;
        let dataset: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.generated_at, None);
        assert_eq!(
            dataset.samples,
            [SampleRecord {
                player_id: 1,
                entity_id: 2,
                distance: 30
            }]
        );

        let store = dataset.to_store().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.samples()[0].distance, 30);
    }

    #[test]
    fn test_invalid_record_is_reported() {
        let dataset = Dataset {
            generated_at: None,
            samples: vec![
                SampleRecord {
                    player_id: 1,
                    entity_id: 1,
                    distance: 10,
                },
                SampleRecord {
                    player_id: 1,
                    entity_id: 1,
                    distance: -4,
                },
            ],
        };
        let err = dataset.to_store().unwrap_err();
        assert!(err.to_string().contains("#1"));
    }

    #[test]
    fn test_push_round_trips_through_store() {
        let mut dataset = Dataset::default();
        dataset.push(Sample::new(3, 9, 120).unwrap());
        let json = serde_json::to_string(&dataset).unwrap();
        assert!(!json.contains("generated_at"));
        let parsed: Dataset = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.to_store().unwrap().samples(), dataset.to_store().unwrap().samples());
    }
}
