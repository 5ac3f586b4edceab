use serde::{Deserialize, Serialize};

/// A maximal stretch of consecutive equal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Run<T> {
    /// The value repeated throughout the run.
    pub value: T,
    /// Number of consecutive observations (always at least one).
    pub length: usize,
}

/// Streaming run-length encoder.
///
/// Consecutive equal values are collapsed into a single [`Run`]. Memory grows
/// with the number of runs, not the number of observations. The final run is
/// kept open until [`RunLengthEncoder::finish`] is called.
///
/// # Examples
///
/// ```
/// use ipd_stats::runs::{Run, RunLengthEncoder};
///
/// let mut encoder = RunLengthEncoder::new();
/// for c in "aaabcc".chars() {
///     encoder.push(c);
/// }
/// assert_eq!(
///     encoder.finish(),
///     vec![
///         Run { value: 'a', length: 3 },
///         Run { value: 'b', length: 1 },
///         Run { value: 'c', length: 2 },
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RunLengthEncoder<T> {
    runs: Vec<Run<T>>,
}

impl<T> Default for RunLengthEncoder<T> {
    fn default() -> Self {
        Self { runs: vec![] }
    }
}

impl<T> RunLengthEncoder<T>
where
    T: PartialEq,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one observation, extending the current run or opening a new one.
    pub fn push(&mut self, value: T) {
        match self.runs.last_mut() {
            Some(run) if run.value == value => run.length += 1,
            _ => self.runs.push(Run { value, length: 1 }),
        }
    }

    /// The run currently being extended, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Run<T>> {
        self.runs.last()
    }

    /// Runs so far, the last one still open.
    #[must_use]
    pub fn runs(&self) -> &[Run<T>] {
        &self.runs
    }

    /// Number of runs so far, including the open one.
    #[must_use]
    pub fn num_runs(&self) -> usize {
        self.runs.len()
    }

    /// Total number of observations pushed.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.runs.iter().map(|run| run.length).sum()
    }

    /// Closes the open run and returns every run in push order.
    #[must_use]
    pub fn finish(self) -> Vec<Run<T>> {
        self.runs
    }
}
