//! Inter-personal distance (IPD) analytics engine
//!
//! This crate turns the distance samples recorded between a subject player and
//! the entities around them into per-entity statistics, proximity zone
//! histories and a ranking of behaviorally similar players.
//!
//! # Overview
//!
//! The engine is a deterministic function of its inputs. Samples arrive
//! already fetched through a [`store::SampleSource`]; nothing is persisted or
//! shared between invocations.
//!
//! ## Per-Entity Pipeline
//!
//! One pass over an entity's ordered samples feeds two independent units:
//!
//! 1. **Statistics** ([`ipd_stats::online::OnlineStats`]): count, min, max,
//!    mean and sample variance via Welford's update
//! 2. **Zone History** ([`crossing::CrossingTracker`]): each distance is
//!    classified by the [`zone::ZoneClassifier`] and consecutive equal zones
//!    are run-length encoded
//!
//! [`insight::EntityInsightComputer`] drives both and produces an
//! [`insight::EntityInsight`].
//!
//! ## Player Pipeline
//!
//! 1. **Fetch** ([`store::SampleSource`]): samples grouped by entity, plus the
//!    average distance of the target and of every other player
//! 2. **Fan Out** ([`orchestrator::InsightsOrchestrator`]): one insight per
//!    non-empty entity group, optionally in parallel
//! 3. **Rank** ([`neighbor::NeighborRanker`]): other players by signed
//!    difference of average distance
//!
//! # Examples
//!
//! ```
//! use ipd_analysis::{
//!     config::EngineConfig,
//!     orchestrator::InsightsOrchestrator,
//!     sample::{EntityId, PlayerId, Sample},
//!     store::InMemorySampleStore,
//!     zone::Zone,
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let mut store = InMemorySampleStore::new();
//! for distance in [30, 60, 200, 500, 40] {
//!     store.insert(Sample::new(1, 7, distance)?);
//! }
//! store.insert(Sample::new(2, 7, 100)?);
//!
//! let config = EngineConfig::default();
//! config.validate()?;
//! let orchestrator = InsightsOrchestrator::new(config);
//! let result = orchestrator.compute_insights(&store, PlayerId::new(1).unwrap(), None)?;
//!
//! let insight = &result.stats[&EntityId::new(7).unwrap()];
//! assert_eq!(insight.count, 5);
//! assert_eq!(insight.min, 30);
//! assert_eq!(insight.max, 500);
//! assert_eq!(insight.num_crossings(), 4);
//! assert!(insight.visited(Zone::Public));
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`sample`] - Identifiers and validated samples
//! - [`zone`] - Proximity zones and their thresholds
//! - [`crossing`] - Zone run history
//! - [`insight`] - Per-entity insight computation
//! - [`neighbor`] - Similar-player ranking
//! - [`orchestrator`] - Player-level entry point
//! - [`store`] - Storage collaborator trait and in-memory store
//! - [`config`] - Engine configuration
//! - [`cancel`] - Cooperative cancellation
//! - [`distance`] - Distance between two world-space positions

pub mod cancel;
pub mod config;
pub mod crossing;
pub mod distance;
pub mod insight;
pub mod neighbor;
pub mod orchestrator;
pub mod sample;
pub mod store;
pub mod zone;
