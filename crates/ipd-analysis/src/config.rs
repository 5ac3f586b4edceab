//! Engine configuration
//!
//! All tunable constants of the engine live in [`EngineConfig`]. It
//! deserializes from JSON with every field optional:
//!
//! ```json
//! {
//!   "zones": { "personal_from": 45, "social_from": 120, "public_from": 360 },
//!   "neighbor_limit": 10,
//!   "cancel_check_interval": 4096,
//!   "parallel": false
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{neighbor::NeighborRanker, zone::ZoneClassifier};

/// Default number of samples processed between cancellation checks.
pub const DEFAULT_CANCEL_CHECK_INTERVAL: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display(
        "zone thresholds must be strictly increasing \
         (personal_from={personal_from}, social_from={social_from}, public_from={public_from})"
    )]
    UnorderedZoneThresholds {
        personal_from: u32,
        social_from: u32,
        public_from: u32,
    },
    #[display("neighbor_limit must be at least 1")]
    ZeroNeighborLimit,
    #[display("cancel_check_interval must be at least 1")]
    ZeroCancelCheckInterval,
}

/// Tunable parameters of the insights engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Zone boundaries.
    pub zones: ZoneClassifier,
    /// Maximum number of neighbors returned.
    pub neighbor_limit: usize,
    /// Samples processed between two checks of the cancellation token.
    pub cancel_check_interval: usize,
    /// Compute per-entity insights on the rayon thread pool.
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zones: ZoneClassifier::default(),
            neighbor_limit: NeighborRanker::DEFAULT_LIMIT,
            cancel_check_interval: DEFAULT_CANCEL_CHECK_INTERVAL,
            parallel: false,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.zones.validate()?;
        if self.neighbor_limit == 0 {
            return Err(ConfigError::ZeroNeighborLimit);
        }
        if self.cancel_check_interval == 0 {
            return Err(ConfigError::ZeroCancelCheckInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.neighbor_limit, 10);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_partial_json() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"neighbor_limit": 3, "parallel": true}"#).unwrap();
        assert_eq!(config.neighbor_limit, 3);
        assert!(config.parallel);
        assert_eq!(config.zones, ZoneClassifier::default());
        assert_eq!(config.cancel_check_interval, DEFAULT_CANCEL_CHECK_INTERVAL);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(serde_json::from_str::<EngineConfig>(r#"{"neighbours": 3}"#).is_err());
    }

    #[test]
    fn test_validation_errors() {
        let config = EngineConfig {
            neighbor_limit: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroNeighborLimit));

        let config = EngineConfig {
            cancel_check_interval: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCancelCheckInterval));

        let config = EngineConfig {
            zones: ZoneClassifier {
                personal_from: 200,
                social_from: 120,
                public_from: 360,
            },
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnorderedZoneThresholds { .. })
        ));
    }
}
