//! Proximity zones
//!
//! Distances are bucketed into four ordered bands, from closest to farthest:
//!
//! ```text
//!  0 ──── 45 ──── 120 ──── 360 ────▶ cm
//!  Intimate  Personal  Social  Public
//! ```
//!
//! Each zone includes its lower bound: a distance of exactly 45 cm is
//! [`Zone::Personal`], not [`Zone::Intimate`].

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Lower bound (inclusive) of the personal zone, in centimeters.
pub const PERSONAL_FROM: u32 = 45;
/// Lower bound (inclusive) of the social zone, in centimeters.
pub const SOCIAL_FROM: u32 = 120;
/// Lower bound (inclusive) of the public zone, in centimeters.
pub const PUBLIC_FROM: u32 = 360;

/// Proximity band, ordered by increasing distance.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    #[display("intimate")]
    Intimate,
    #[display("personal")]
    Personal,
    #[display("social")]
    Social,
    #[display("public")]
    Public,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::Intimate, Zone::Personal, Zone::Social, Zone::Public];
}

/// Maps a distance to its [`Zone`] using configurable thresholds.
///
/// The default thresholds are [`PERSONAL_FROM`], [`SOCIAL_FROM`] and
/// [`PUBLIC_FROM`].
///
/// # Examples
///
/// ```
/// use ipd_analysis::zone::{Zone, ZoneClassifier};
///
/// let classifier = ZoneClassifier::default();
/// assert_eq!(classifier.classify(44), Zone::Intimate);
/// assert_eq!(classifier.classify(45), Zone::Personal);
/// assert_eq!(classifier.classify(360), Zone::Public);
///
/// let tight = ZoneClassifier::new(10, 20, 30).unwrap();
/// assert_eq!(tight.classify(25), Zone::Social);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoneClassifier {
    pub personal_from: u32,
    pub social_from: u32,
    pub public_from: u32,
}

impl Default for ZoneClassifier {
    fn default() -> Self {
        Self {
            personal_from: PERSONAL_FROM,
            social_from: SOCIAL_FROM,
            public_from: PUBLIC_FROM,
        }
    }
}

impl ZoneClassifier {
    /// Creates a classifier from zone lower bounds.
    ///
    /// The bounds must be strictly increasing.
    pub fn new(personal_from: u32, social_from: u32, public_from: u32) -> Result<Self, ConfigError> {
        let classifier = Self {
            personal_from,
            social_from,
            public_from,
        };
        classifier.validate()?;
        Ok(classifier)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.personal_from < self.social_from && self.social_from < self.public_from {
            Ok(())
        } else {
            Err(ConfigError::UnorderedZoneThresholds {
                personal_from: self.personal_from,
                social_from: self.social_from,
                public_from: self.public_from,
            })
        }
    }

    #[must_use]
    pub fn classify(&self, distance: u32) -> Zone {
        if distance < self.personal_from {
            Zone::Intimate
        } else if distance < self.social_from {
            Zone::Personal
        } else if distance < self.public_from {
            Zone::Social
        } else {
            Zone::Public
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_are_lower_inclusive() {
        let c = ZoneClassifier::default();
        assert_eq!(c.classify(0), Zone::Intimate);
        assert_eq!(c.classify(44), Zone::Intimate);
        assert_eq!(c.classify(45), Zone::Personal);
        assert_eq!(c.classify(119), Zone::Personal);
        assert_eq!(c.classify(120), Zone::Social);
        assert_eq!(c.classify(359), Zone::Social);
        assert_eq!(c.classify(360), Zone::Public);
        assert_eq!(c.classify(u32::MAX), Zone::Public);
    }

    #[test]
    fn test_zone_order() {
        assert!(Zone::Intimate < Zone::Personal);
        assert!(Zone::Personal < Zone::Social);
        assert!(Zone::Social < Zone::Public);
        assert!(Zone::ALL.is_sorted());
    }

    #[test]
    fn test_rejects_unordered_thresholds() {
        assert!(ZoneClassifier::new(45, 45, 360).is_err());
        assert!(ZoneClassifier::new(120, 45, 360).is_err());
        assert!(ZoneClassifier::new(0, 1, 2).is_ok());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Zone::Intimate).unwrap(), r#""intimate""#);
        assert_eq!(Zone::Public.to_string(), "public");

        let c: ZoneClassifier = serde_json::from_str(r#"{"public_from": 400}"#).unwrap();
        assert_eq!(c.personal_from, PERSONAL_FROM);
        assert_eq!(c.public_from, 400);
    }
}
