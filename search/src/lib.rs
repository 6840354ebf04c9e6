//! Lodestar Search: a generic, deterministic state-space search engine.
//!
//! Users describe a problem by implementing [`SearchState`]; the engine
//! explores it depth-first, breadth-first or best-first, as a tree or as a
//! graph with duplicate suppression, under explicit depth, move and
//! wall-clock bounds. It does NOT depend on `lodestar_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! lodestar_search  ←  lodestar_harness  ←  lock_tests / lodestar_benchmarks
//! (engine core)       (worlds, DOT, runner)
//! ```
//!
//! # Key types
//!
//! - [`SearchState`]: the user capability contract
//! - [`SearchPolicy`]: exploration strategy, search mode and bounds
//! - [`Explorer`]: the driver; [`Explorer::explore`] runs one search
//! - [`SearchOutcome`]: termination reason, solution, path and counters
//! - [`TraceSink`]: observer of expansion events ([`TraceLog`] records them)

#![forbid(unsafe_code)]

pub mod closed;
pub mod contract;
pub mod decision;
pub mod digest;
pub mod error;
pub mod frontier;
pub mod node;
pub mod path;
pub mod policy;
pub mod search;
pub mod stats;
pub mod trace;

pub use contract::SearchState;
pub use digest::{canonical_hash, ContentHash, HashDomain};
pub use error::SearchError;
pub use node::{NodeArena, NodeId};
pub use path::{PathStep, SolutionPath};
pub use policy::{ExplorationType, PathOrder, SearchMode, SearchPolicy};
pub use search::{Explorer, Phase, SearchOutcome, TerminationReason};
pub use stats::SearchStats;
pub use trace::{EdgeTarget, NodeColor, NullSink, TraceEvent, TraceLog, TraceSink};
