use serde::{Deserialize, Serialize};

/// Unbiased sample variance of a dataset.
///
/// A single observation carries no dispersion information, so the variance of a
/// one-element dataset is [`SampleVariance::Undefined`] rather than zero. Keeping
/// this as a distinct variant (instead of `NaN`) stops an undefined value from
/// silently flowing into later arithmetic.
///
/// Serializes as `null` when undefined and as a plain number otherwise.
///
/// # Examples
///
/// ```
/// use ipd_stats::variance::SampleVariance;
///
/// let v = SampleVariance::from_sum_of_squares(8.0, 5);
/// assert_eq!(v.value(), Some(2.0));
///
/// let single = SampleVariance::from_sum_of_squares(0.0, 1);
/// assert!(single.is_undefined());
/// assert_eq!(single.value(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, derive_more::IsVariant, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum SampleVariance {
    /// Fewer than two observations were seen.
    Undefined,
    /// Bessel-corrected variance of two or more observations.
    Value(f64),
}

impl SampleVariance {
    /// Builds the sample variance from the accumulated sum of squared
    /// deviations from the mean (`M2`) and the number of observations.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sum_of_squares(sum_sq_diff: f64, count: usize) -> Self {
        if count < 2 {
            Self::Undefined
        } else {
            Self::Value(sum_sq_diff / (count - 1) as f64)
        }
    }

    /// Returns the numeric variance, or `None` if undefined.
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Undefined => None,
            Self::Value(v) => Some(v),
        }
    }

    /// Returns the sample standard deviation, or `None` if undefined.
    #[must_use]
    pub fn std_dev(self) -> Option<f64> {
        self.value().map(f64::sqrt)
    }
}

impl From<Option<f64>> for SampleVariance {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Undefined, Self::Value)
    }
}

impl From<SampleVariance> for Option<f64> {
    fn from(value: SampleVariance) -> Self {
        value.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_below_two_observations() {
        assert!(SampleVariance::from_sum_of_squares(0.0, 0).is_undefined());
        assert!(SampleVariance::from_sum_of_squares(0.0, 1).is_undefined());
        assert_eq!(
            SampleVariance::from_sum_of_squares(0.0, 2),
            SampleVariance::Value(0.0)
        );
    }

    #[test]
    fn test_undefined_is_not_zero() {
        assert_ne!(SampleVariance::Undefined, SampleVariance::Value(0.0));
        assert_eq!(SampleVariance::Undefined.std_dev(), None);
        assert_eq!(SampleVariance::Value(4.0).std_dev(), Some(2.0));
    }

    #[test]
    fn test_serde_null_sentinel() {
        let json = serde_json::to_string(&SampleVariance::Undefined).unwrap();
        assert_eq!(json, "null");
        let json = serde_json::to_string(&SampleVariance::Value(0.0)).unwrap();
        assert_eq!(json, "0.0");

        let v: SampleVariance = serde_json::from_str("null").unwrap();
        assert!(v.is_undefined());
        let v: SampleVariance = serde_json::from_str("2.5").unwrap();
        assert_eq!(v, SampleVariance::Value(2.5));
    }
}
