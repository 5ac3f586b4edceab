//! Streaming statistics utilities for the IPD analytics engine.
//!
//! This crate provides single-pass building blocks that never buffer their input:
//!
//! - **Online statistics**: count, extrema, mean and variance via Welford's update,
//!   with pairwise merging of partial results
//! - **Sample variance**: an explicit "undefined" value for datasets too small
//!   to estimate dispersion
//! - **Run-length encoding**: collapse consecutive equal observations into runs
//!
//! # Modules
//!
//! - [`online`]: Single-pass accumulator for descriptive statistics
//! - [`variance`]: Sample variance with an undefined sentinel
//! - [`runs`]: Streaming run-length encoder
//!
//! # Examples
//!
//! ## Accumulating statistics
//!
//! ```
//! use ipd_stats::online::OnlineStats;
//!
//! let mut stats = OnlineStats::new();
//! for d in [10_u32, 20, 30] {
//!     stats.push(d);
//! }
//! let summary = stats.summary().unwrap();
//! assert_eq!(summary.mean, 20.0);
//! assert_eq!(summary.variance.value(), Some(100.0));
//! ```
//!
//! ## Encoding runs
//!
//! ```
//! use ipd_stats::runs::RunLengthEncoder;
//!
//! let mut encoder = RunLengthEncoder::new();
//! for v in [1, 1, 2] {
//!     encoder.push(v);
//! }
//! let runs = encoder.finish();
//! assert_eq!(runs.len(), 2);
//! assert_eq!(runs[0].length, 2);
//! ```

pub mod online;
pub mod runs;
pub mod variance;
