//! Identifiers and distance samples
//!
//! A [`Sample`] is one recorded inter-personal distance between a subject
//! player and an observed entity. Samples are produced by the storage layer in
//! a stable order (insertion order) and are only ever read by the engine.
//!
//! Raw input from outside the engine (JSON files, command-line arguments)
//! goes through [`Sample::new`], which rejects negative distances and
//! non-positive identifiers. Past that point the distance is a `u32`, so
//! a negative distance cannot reach the statistics code.

use serde::{Deserialize, Serialize};

/// Identifier of a subject player (always positive).
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
#[serde(into = "u32", try_from = "i64")]
pub struct PlayerId(u32);

/// Identifier of an observed entity (always positive).
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
#[serde(into = "u32", try_from = "i64")]
pub struct EntityId(u32);

impl PlayerId {
    /// Returns `None` for zero.
    #[must_use]
    pub const fn new(id: u32) -> Option<Self> {
        if id == 0 { None } else { Some(Self(id)) }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl EntityId {
    /// Returns `None` for zero.
    #[must_use]
    pub const fn new(id: u32) -> Option<Self> {
        if id == 0 { None } else { Some(Self(id)) }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

fn positive_id(kind: &'static str, value: i64) -> Result<u32, InvalidSampleError> {
    u32::try_from(value)
        .ok()
        .filter(|id| *id > 0)
        .ok_or(InvalidSampleError::InvalidId { kind, value })
}

impl TryFrom<i64> for PlayerId {
    type Error = InvalidSampleError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        positive_id("player", value).map(Self)
    }
}

impl TryFrom<i64> for EntityId {
    type Error = InvalidSampleError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        positive_id("entity", value).map(Self)
    }
}

impl From<PlayerId> for u32 {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// A malformed sample.
///
/// Signals an upstream data-integrity problem; the computation that saw it is
/// abandoned rather than skipping or zeroing the sample.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidSampleError {
    #[display("{kind} ID must be a positive 32-bit integer, got {value}")]
    InvalidId { kind: &'static str, value: i64 },
    #[display("distance must be a natural number, got {distance}")]
    NegativeDistance { distance: i64 },
    #[display("distance {distance} is too large")]
    DistanceOutOfRange { distance: i64 },
    #[display("sample #{index} belongs to entity {found}, expected entity {expected}")]
    WrongEntity {
        index: usize,
        expected: EntityId,
        found: EntityId,
    },
    #[display("sample #{index} belongs to player {found}, expected player {expected}")]
    WrongPlayer {
        index: usize,
        expected: PlayerId,
        found: PlayerId,
    },
}

/// One recorded inter-personal distance, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sample {
    pub player: PlayerId,
    pub entity: EntityId,
    pub distance: u32,
}

impl Sample {
    /// Validates raw values and builds a sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use ipd_analysis::sample::{InvalidSampleError, Sample};
    ///
    /// let sample = Sample::new(1, 7, 120).unwrap();
    /// assert_eq!(sample.entity.get(), 7);
    ///
    /// assert_eq!(
    ///     Sample::new(1, 7, -5),
    ///     Err(InvalidSampleError::NegativeDistance { distance: -5 })
    /// );
    /// assert!(Sample::new(0, 7, 5).is_err());
    /// ```
    pub fn new(player: i64, entity: i64, distance: i64) -> Result<Self, InvalidSampleError> {
        let player = PlayerId::try_from(player)?;
        let entity = EntityId::try_from(entity)?;
        if distance < 0 {
            return Err(InvalidSampleError::NegativeDistance { distance });
        }
        let distance = u32::try_from(distance)
            .map_err(|_| InvalidSampleError::DistanceOutOfRange { distance })?;
        Ok(Self {
            player,
            entity,
            distance,
        })
    }
}
