//! Positional inter-personal distance
//!
//! Converts two world-space positions (centimeters) into the integer
//! distance that samples record.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PositionError {
    #[display("position must be three comma-separated numbers `x,y,z`, got `{input}`")]
    Parse { input: String },
    #[display("position coordinates must be finite")]
    NonFinite,
    #[display("distance between positions is too large")]
    OutOfRange,
}

/// A point in world space, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = || PositionError::Parse {
            input: s.to_owned(),
        };
        let coords = s
            .split(',')
            .map(|part| part.trim().parse::<f64>().map_err(|_| parse_error()))
            .collect::<Result<Vec<_>, _>>()?;
        let [x, y, z] = coords[..] else {
            return Err(parse_error());
        };
        Ok(Self { x, y, z })
    }
}

/// Euclidean distance between `a` and `b`, rounded to the nearest centimeter.
///
/// # Examples
///
/// ```
/// use ipd_analysis::distance::{Position, interpersonal_distance};
///
/// let a = Position::new(0.0, 0.0, 0.0);
/// let b = Position::new(30.0, 40.0, 0.0);
/// assert_eq!(interpersonal_distance(&a, &b), Ok(50));
///
/// let c = Position::new(0.0, 0.0, 44.5);
/// assert_eq!(interpersonal_distance(&a, &c), Ok(45));
/// ```
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn interpersonal_distance(a: &Position, b: &Position) -> Result<u32, PositionError> {
    if !a.is_finite() || !b.is_finite() {
        return Err(PositionError::NonFinite);
    }
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    let distance = (dx * dx + dy * dy + dz * dz).sqrt().round();
    if !distance.is_finite() || distance > f64::from(u32::MAX) {
        return Err(PositionError::OutOfRange);
    }
    Ok(distance as u32)
}
