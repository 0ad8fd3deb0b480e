//! Explanations and consistency checks for a classified graph.
//!
//! The classifier only records the final tier. `explain` reconstructs why
//! each node ended where it did, listing every enemy or frontline neighbor
//! rather than the first one found. `audit` looks for nodes whose tier
//! disagrees with the rules, which should only happen if a graph was
//! modified after classification.

use serde::Serialize;
use tracing::{info, warn};

use super::{borders_enemy, PermanentFrontlines};
use crate::map::{FactionId, NodeIndex, Territory, TerritoryGraph, TerritoryId, Tier};

/// Why a node has its tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TierReason {
    PermanentFrontline,
    BordersEnemy { enemies: Vec<String> },
    BehindFrontline { frontlines: Vec<String> },
    /// Claimed, but neither bordering an enemy nor behind a frontline.
    Interior,
    Unclaimed,
}

/// A neighbor as seen from the explained node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighborInfo {
    pub id: TerritoryId,
    pub name: String,
    pub faction: FactionId,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierExplanation {
    pub id: TerritoryId,
    pub name: String,
    pub faction: FactionId,
    pub tier: Tier,
    pub reason: TierReason,
    pub neighbors: Vec<NeighborInfo>,
}

/// A disagreement between a node's tier and the classification rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// Allow-listed and held by the listing faction, yet not frontline.
    PermanentNotFrontline { name: String, faction: FactionId },
    /// Borders an enemy, yet not frontline.
    UnmarkedFrontline { name: String, enemies: Vec<String> },
    /// Allow-listed for a faction that does not hold it right now.
    PermanentHeldByOther {
        name: String,
        listed_for: FactionId,
        held_by: FactionId,
    },
}

impl Anomaly {
    /// Informational anomalies describe the map, not a classification fault.
    pub fn is_informational(&self) -> bool {
        matches!(self, Anomaly::PermanentHeldByOther { .. })
    }
}

/// Explains the tier of every node, sorted by name.
pub fn explain(graph: &TerritoryGraph, permanent: &PermanentFrontlines) -> Vec<TierExplanation> {
    let mut out: Vec<TierExplanation> = graph
        .iter()
        .map(|(idx, t)| TierExplanation {
            id: t.id,
            name: t.name.clone(),
            faction: t.controlling_faction,
            tier: t.tier(),
            reason: reason_for(graph, idx, permanent),
            neighbors: graph
                .neighbors(idx)
                .iter()
                .map(|&j| {
                    let nb = graph.territory(j);
                    NeighborInfo {
                        id: nb.id,
                        name: nb.name.clone(),
                        faction: nb.controlling_faction,
                        tier: nb.tier(),
                    }
                })
                .collect(),
        })
        .collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

fn reason_for(graph: &TerritoryGraph, idx: NodeIndex, permanent: &PermanentFrontlines) -> TierReason {
    let t = graph.territory(idx);
    if !t.is_claimed() {
        return TierReason::Unclaimed;
    }
    match t.tier() {
        Tier::Frontline if permanent.contains(&t.name, t.controlling_faction) => {
            TierReason::PermanentFrontline
        }
        Tier::Frontline => TierReason::BordersEnemy {
            enemies: enemy_neighbors(graph, idx),
        },
        Tier::CommandOperations => TierReason::BehindFrontline {
            frontlines: neighbor_names(graph, idx, |nb| {
                nb.tier() == Tier::Frontline && nb.controlling_faction == t.controlling_faction
            }),
        },
        Tier::Rearguard => TierReason::Interior,
    }
}

fn enemy_neighbors(graph: &TerritoryGraph, idx: NodeIndex) -> Vec<String> {
    let faction = graph.territory(idx).controlling_faction;
    neighbor_names(graph, idx, |nb| faction.is_enemy_of(nb.controlling_faction))
}

fn neighbor_names(
    graph: &TerritoryGraph,
    idx: NodeIndex,
    keep: impl Fn(&Territory) -> bool,
) -> Vec<String> {
    let mut names: Vec<String> = graph
        .neighbors(idx)
        .iter()
        .map(|&j| graph.territory(j))
        .filter(|nb| keep(nb))
        .map(|nb| nb.name.clone())
        .collect();
    names.sort();
    names
}

/// Checks a classified graph against the rules and logs what it finds.
pub fn audit(graph: &TerritoryGraph, permanent: &PermanentFrontlines) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    for (faction, name) in permanent.iter() {
        if faction.is_none() {
            continue;
        }
        let Some(idx) = graph.find_by_name(name) else {
            continue;
        };
        let t = graph.territory(idx);
        if t.controlling_faction != faction {
            anomalies.push(Anomaly::PermanentHeldByOther {
                name: name.to_string(),
                listed_for: faction,
                held_by: t.controlling_faction,
            });
        } else if t.tier() != Tier::Frontline {
            anomalies.push(Anomaly::PermanentNotFrontline {
                name: name.to_string(),
                faction,
            });
        }
    }

    for (idx, t) in graph.iter() {
        if t.tier() != Tier::Frontline && borders_enemy(graph, idx) {
            anomalies.push(Anomaly::UnmarkedFrontline {
                name: t.name.clone(),
                enemies: enemy_neighbors(graph, idx),
            });
        }
    }

    for a in &anomalies {
        if a.is_informational() {
            info!(anomaly = ?a, "classification note");
        } else {
            warn!(anomaly = ?a, "classification anomaly");
        }
    }
    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::map::GraphBuilder;

    const F1: FactionId = FactionId(1);
    const F2: FactionId = FactionId(2);

    fn sample() -> TerritoryGraph {
        // Gate(F1) - Front(F2) - Rear(F2) - Deep(F2),  Gate - Hub(F1),  Void isolated
        let mut b = GraphBuilder::new();
        for (id, name, f) in [
            (1, "Gate", F1),
            (2, "Front", F2),
            (3, "Rear", F2),
            (4, "Deep", F2),
            (5, "Hub", F1),
            (6, "Void", FactionId::NONE),
        ] {
            b.add_territory(Territory::new(TerritoryId(id), name, f)).unwrap();
        }
        for (a, c) in [(1, 2), (2, 3), (3, 4), (1, 5)] {
            b.connect(TerritoryId(a), TerritoryId(c)).unwrap();
        }
        b.build()
    }

    fn reason<'a>(ex: &'a [TierExplanation], name: &str) -> &'a TierReason {
        &ex.iter().find(|e| e.name == name).unwrap().reason
    }

    #[test]
    fn explains_each_rule() {
        let mut g = sample();
        let list = PermanentFrontlines::new().with(F1, ["Gate"]);
        classify(&mut g, &list);
        let ex = explain(&g, &list);

        assert_eq!(ex.len(), 6);
        assert!(ex.windows(2).all(|w| w[0].name <= w[1].name));
        assert_eq!(reason(&ex, "Gate"), &TierReason::PermanentFrontline);
        assert_eq!(
            reason(&ex, "Front"),
            &TierReason::BordersEnemy { enemies: vec!["Gate".to_string()] }
        );
        assert_eq!(
            reason(&ex, "Rear"),
            &TierReason::BehindFrontline { frontlines: vec!["Front".to_string()] }
        );
        assert_eq!(
            reason(&ex, "Hub"),
            &TierReason::BehindFrontline { frontlines: vec!["Gate".to_string()] }
        );
        assert_eq!(reason(&ex, "Deep"), &TierReason::Interior);
        assert_eq!(reason(&ex, "Void"), &TierReason::Unclaimed);

        let gate = ex.iter().find(|e| e.name == "Gate").unwrap();
        assert_eq!(gate.neighbors.len(), 2);
    }

    #[test]
    fn classified_graph_audits_clean() {
        let mut g = sample();
        let list = PermanentFrontlines::new().with(F1, ["Gate", "Hub"]);
        classify(&mut g, &list);
        assert!(audit(&g, &list).is_empty());
    }

    #[test]
    fn audit_flags_stale_tiers() {
        let mut g = sample();
        let list = PermanentFrontlines::new().with(F1, ["Gate"]);
        classify(&mut g, &list);
        // Hub flips to F2 after classification: Gate now has a second enemy
        // and Hub itself borders Gate without being frontline.
        g.territory_mut(4).controlling_faction = F2;
        let anomalies = audit(&g, &list);
        assert!(anomalies.contains(&Anomaly::UnmarkedFrontline {
            name: "Hub".to_string(),
            enemies: vec!["Gate".to_string()],
        }));
    }

    #[test]
    fn audit_reports_permanent_held_by_other() {
        let mut g = sample();
        let list = PermanentFrontlines::new().with(F2, ["Gate"]);
        classify(&mut g, &list);
        let anomalies = audit(&g, &list);
        assert_eq!(
            anomalies,
            vec![Anomaly::PermanentHeldByOther {
                name: "Gate".to_string(),
                listed_for: F2,
                held_by: F1,
            }]
        );
        assert!(anomalies[0].is_informational());
    }

    #[test]
    fn audit_reports_permanent_not_frontline() {
        let mut g = sample();
        let list = PermanentFrontlines::new().with(F2, ["Deep"]);
        classify(&mut g, &PermanentFrontlines::new());
        let anomalies = audit(&g, &list);
        assert_eq!(
            anomalies,
            vec![Anomaly::PermanentNotFrontline { name: "Deep".to_string(), faction: F2 }]
        );
    }
}
