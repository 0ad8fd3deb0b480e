//! Territory graph representation.
//!
//! Contains faction ids, the territory node type with its derived tier and
//! capture-effort attributes, and the validated undirected graph.

pub mod faction;
pub mod graph;
pub mod territory;

pub use faction::FactionId;
pub use graph::{GraphBuilder, GraphError, NodeIndex, TerritoryGraph};
pub use territory::{
    CaptureEffort, ContestStatus, EffortCategory, Momentum, Territory, TerritoryId, Tier,
    ALL_CATEGORIES, ALL_TIERS,
};
