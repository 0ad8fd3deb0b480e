//! Frontline warzone analysis library.
//!
//! Builds territory graphs, classifies every territory into an exposure tier
//! and scores how hard each defender territory would be to capture. The
//! binary entry point and the integration tests drive it through
//! `analysis::analyze`.

pub mod analysis;
pub mod classify;
pub mod config;
pub mod effort;
pub mod map;
pub mod report;
pub mod snapshot;
pub mod synth;
