//! Per-faction control summary of an analysed warzone.

use serde::Serialize;

use crate::map::{FactionId, TerritoryGraph, Tier};

/// Territory counts per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub frontline: usize,
    pub command_operations: usize,
    pub rearguard: usize,
}

impl TierCounts {
    fn add(&mut self, tier: Tier) {
        match tier {
            Tier::Frontline => self.frontline += 1,
            Tier::CommandOperations => self.command_operations += 1,
            Tier::Rearguard => self.rearguard += 1,
        }
    }

    pub fn get(&self, tier: Tier) -> usize {
        match tier {
            Tier::Frontline => self.frontline,
            Tier::CommandOperations => self.command_operations,
            Tier::Rearguard => self.rearguard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactionStatus {
    pub faction: FactionId,
    pub controlled: usize,
    /// Controlled territories that are currently contested.
    pub contested: usize,
    /// Share of the territories held by the warzone's factions, in percent.
    pub control_percent: f64,
    pub tiers: TierCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarzoneStatus {
    /// Territories held by one of the warzone's factions.
    pub total: usize,
    /// Territories held by nobody or by a third faction.
    pub other: usize,
    pub factions: Vec<FactionStatus>,
}

impl WarzoneStatus {
    /// Tallies control, contest state and tiers for each of `factions`.
    pub fn from_graph(graph: &TerritoryGraph, factions: &[FactionId]) -> Self {
        let mut rows: Vec<FactionStatus> = factions
            .iter()
            .map(|&faction| FactionStatus {
                faction,
                controlled: 0,
                contested: 0,
                control_percent: 0.0,
                tiers: TierCounts::default(),
            })
            .collect();

        let mut other = 0;
        for t in graph.territories() {
            match rows.iter_mut().find(|r| r.faction == t.controlling_faction) {
                Some(row) => {
                    row.controlled += 1;
                    if t.contested.is_contested() {
                        row.contested += 1;
                    }
                    row.tiers.add(t.tier());
                }
                None => other += 1,
            }
        }

        let total: usize = rows.iter().map(|r| r.controlled).sum();
        if total > 0 {
            for row in &mut rows {
                row.control_percent = row.controlled as f64 / total as f64 * 100.0;
            }
        }

        WarzoneStatus {
            total,
            other,
            factions: rows,
        }
    }

    pub fn faction(&self, faction: FactionId) -> Option<&FactionStatus> {
        self.factions.iter().find(|r| r.faction == faction)
    }
}
