//! Adjacency tier classification.
//!
//! Assigns every node exactly one tier from its controlling faction, its
//! neighbors and the permanent allow-list:
//!
//! 1. reset every node to rearguard;
//! 2. allow-listed (name, faction) pairs become frontline;
//! 3. claimed nodes bordering a different claimed faction become frontline;
//! 4. claimed non-frontline nodes next to a same-faction frontline become
//!    command operations.
//!
//! The frontline set is complete before step 4 starts, so the result does not
//! depend on node order.

pub mod permanent;
pub mod reasoning;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::map::{FactionId, NodeIndex, TerritoryGraph, Tier};

pub use permanent::PermanentFrontlines;
pub use reasoning::{audit, explain, Anomaly, NeighborInfo, TierExplanation, TierReason};

/// An allow-listed name that does not exist in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingTerritory {
    pub faction: FactionId,
    pub name: String,
}

/// Outcome of one classification pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationSummary {
    pub frontline: usize,
    pub command_operations: usize,
    pub rearguard: usize,
    /// Nodes made frontline by the allow-list.
    pub permanent: usize,
    pub missing_permanent: Vec<MissingTerritory>,
}

impl ClassificationSummary {
    pub fn count(&self, tier: Tier) -> usize {
        match tier {
            Tier::Frontline => self.frontline,
            Tier::CommandOperations => self.command_operations,
            Tier::Rearguard => self.rearguard,
        }
    }
}

/// Recomputes the tier of every node in `graph`.
pub fn classify(graph: &mut TerritoryGraph, permanent: &PermanentFrontlines) -> ClassificationSummary {
    let n = graph.len();
    let mut summary = ClassificationSummary::default();

    for t in graph.territories_mut() {
        t.tier = Tier::Rearguard;
        t.permanent_frontline = false;
    }

    for idx in 0..n {
        let t = graph.territory_mut(idx);
        if t.is_claimed() && permanent.contains(&t.name, t.controlling_faction) {
            t.permanent_frontline = true;
            t.tier = Tier::Frontline;
            summary.permanent += 1;
            debug!(territory = %t.name, faction = %t.controlling_faction, "permanent frontline");
        }
    }

    for (faction, name) in permanent.iter() {
        if graph.find_by_name(name).is_none() {
            warn!(territory = name, %faction, "permanent frontline not found in graph");
            summary.missing_permanent.push(MissingTerritory {
                faction,
                name: name.to_string(),
            });
        }
    }

    // Collect first, then apply, so neighbor checks see a stable frontline set.
    let bordering: Vec<NodeIndex> = (0..n)
        .filter(|&idx| graph.territory(idx).tier != Tier::Frontline && borders_enemy(graph, idx))
        .collect();
    for &idx in &bordering {
        let t = graph.territory_mut(idx);
        t.tier = Tier::Frontline;
        debug!(territory = %t.name, "frontline: borders enemy territory");
    }

    let staging: Vec<NodeIndex> = (0..n)
        .filter(|&idx| behind_friendly_frontline(graph, idx))
        .collect();
    for &idx in &staging {
        let t = graph.territory_mut(idx);
        t.tier = Tier::CommandOperations;
        debug!(territory = %t.name, "command operations: behind a friendly frontline");
    }

    for t in graph.territories() {
        match t.tier {
            Tier::Frontline => summary.frontline += 1,
            Tier::CommandOperations => summary.command_operations += 1,
            Tier::Rearguard => summary.rearguard += 1,
        }
    }

    info!(
        frontline = summary.frontline,
        command_operations = summary.command_operations,
        rearguard = summary.rearguard,
        permanent = summary.permanent,
        "classification complete"
    );
    summary
}

/// True if `idx` is claimed and any neighbor is held by a different claimed faction.
pub(crate) fn borders_enemy(graph: &TerritoryGraph, idx: NodeIndex) -> bool {
    let faction = graph.territory(idx).controlling_faction;
    graph
        .neighbors(idx)
        .iter()
        .any(|&j| faction.is_enemy_of(graph.territory(j).controlling_faction))
}

/// True if `idx` is a claimed non-frontline node next to a same-faction frontline.
fn behind_friendly_frontline(graph: &TerritoryGraph, idx: NodeIndex) -> bool {
    let t = graph.territory(idx);
    if !t.is_claimed() || t.tier == Tier::Frontline {
        return false;
    }
    graph.neighbors(idx).iter().any(|&j| {
        let nb = graph.territory(j);
        nb.tier == Tier::Frontline && nb.controlling_faction == t.controlling_faction
    })
}
