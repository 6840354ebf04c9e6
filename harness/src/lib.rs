//! Lodestar Harness: sample worlds and run packaging for the search engine.
//!
//! Worlds implement [`lodestar_search::SearchState`] for three classic
//! problems. The runner drives one search, renders its trace as JSON and
//! Graphviz DOT, and writes a content-addressed report.
//!
//! The harness does NOT implement search logic; it delegates to
//! `lodestar_search`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

mod atomic;
pub mod dot;
pub mod runner;
pub mod worlds;
