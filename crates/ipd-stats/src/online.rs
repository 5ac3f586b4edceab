use serde::{Deserialize, Serialize};

use crate::variance::SampleVariance;

/// Single-pass accumulator for count, extrema, mean and variance.
///
/// Values are consumed one at a time and never buffered, so memory use is
/// constant regardless of the number of observations. Mean and variance use
/// Welford's update, which avoids the catastrophic cancellation of the naive
/// sum-of-squares formula when values are large and close together.
///
/// Extrema are tracked in the input type `T`, so integer inputs keep integer
/// `min`/`max`; the mean and variance are always `f64`.
///
/// # Examples
///
/// ```
/// use ipd_stats::{online::OnlineStats, variance::SampleVariance};
///
/// let stats = [3_u32, 1, 5, 2, 4].into_iter().collect::<OnlineStats<_>>();
/// let summary = stats.summary().unwrap();
/// assert_eq!(summary.count, 5);
/// assert_eq!(summary.min, 1);
/// assert_eq!(summary.max, 5);
/// assert_eq!(summary.mean, 3.0);
/// assert_eq!(summary.variance, SampleVariance::Value(2.5));
/// ```
#[derive(Debug, Clone)]
pub struct OnlineStats<T> {
    count: usize,
    range: Option<(T, T)>,
    mean: f64,
    /// Sum of squared deviations from the running mean (`M2`).
    sum_sq_diff: f64,
}

/// Snapshot of the statistics accumulated by [`OnlineStats`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary<T> {
    /// Number of observations (always at least one).
    pub count: usize,
    /// Smallest observation.
    pub min: T,
    /// Largest observation.
    pub max: T,
    /// Arithmetic mean.
    pub mean: f64,
    /// Bessel-corrected variance, undefined for a single observation.
    pub variance: SampleVariance,
}

impl<T> Default for OnlineStats<T> {
    fn default() -> Self {
        Self {
            count: 0,
            range: None,
            mean: 0.0,
            sum_sq_diff: 0.0,
        }
    }
}

impl<T> OnlineStats<T>
where
    T: Copy + PartialOrd + Into<f64>,
{
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one observation.
    #[expect(clippy::cast_precision_loss)]
    pub fn push(&mut self, value: T) {
        self.range = Some(match self.range {
            None => (value, value),
            Some((min, max)) => (
                if value < min { value } else { min },
                if value > max { value } else { max },
            ),
        });

        self.count += 1;
        let x = value.into();
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = x - self.mean;
        self.sum_sq_diff += delta * delta2;
    }

    /// Folds another accumulator into this one.
    ///
    /// The result is the same (up to floating point rounding) as if every
    /// observation of `other` had been pushed into `self`. Uses the pairwise
    /// update of Chan, Golub and LeVeque.
    ///
    /// ```
    /// use ipd_stats::online::OnlineStats;
    ///
    /// let mut a = [1_u32, 2, 3].into_iter().collect::<OnlineStats<_>>();
    /// let b = [4_u32, 5].into_iter().collect::<OnlineStats<_>>();
    /// a.merge(&b);
    /// assert_eq!(a.count(), 5);
    /// assert_eq!(a.mean(), Some(3.0));
    /// assert_eq!(a.min(), Some(1));
    /// assert_eq!(a.max(), Some(5));
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn merge(&mut self, other: &Self) {
        let Some((other_min, other_max)) = other.range else {
            return;
        };
        let Some((min, max)) = self.range else {
            *self = other.clone();
            return;
        };

        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let n = n_a + n_b;
        let delta = other.mean - self.mean;

        self.mean += delta * n_b / n;
        self.sum_sq_diff += other.sum_sq_diff + delta * delta * n_a * n_b / n;
        self.count += other.count;
        self.range = Some((
            if other_min < min { other_min } else { min },
            if other_max > max { other_max } else { max },
        ));
    }

    /// Number of observations seen so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[must_use]
    pub fn min(&self) -> Option<T> {
        self.range.map(|(min, _)| min)
    }

    #[must_use]
    pub fn max(&self) -> Option<T> {
        self.range.map(|(_, max)| max)
    }

    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        self.range.map(|_| self.mean)
    }

    #[must_use]
    pub fn variance(&self) -> SampleVariance {
        SampleVariance::from_sum_of_squares(self.sum_sq_diff, self.count)
    }

    /// Returns the accumulated statistics, or `None` if nothing was pushed.
    #[must_use]
    pub fn summary(&self) -> Option<Summary<T>> {
        let (min, max) = self.range?;
        Some(Summary {
            count: self.count,
            min,
            max,
            mean: self.mean,
            variance: self.variance(),
        })
    }
}

impl<T> Extend<T> for OnlineStats<T>
where
    T: Copy + PartialOrd + Into<f64>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for OnlineStats<T>
where
    T: Copy + PartialOrd + Into<f64>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut stats = Self::new();
        stats.extend(iter);
        stats
    }
}
