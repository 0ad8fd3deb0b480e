//! Capture-effort scoring.
//!
//! Scores every territory held by the defender on a 0-100 scale of how hard
//! it would be for the attacker to take:
//!
//! `clamp(base + distance + momentum + progress + tier, 0, 100)`
//!
//! Distances are BFS hop counts from a reference node, computed once per
//! pass. No term can fail: an unreachable node gets the maximum distance
//! term and a missing reference gets the mid value.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::weights::ScoringWeights;
use crate::map::{CaptureEffort, FactionId, NodeIndex, Territory, TerritoryGraph};

/// Inputs of a scoring pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringParams {
    /// Faction whose territories are scored.
    pub defender: FactionId,
    /// Faction attempting the capture; its territory is the reference fallback.
    pub attacker: FactionId,
    /// Name of the attacker's staging territory.
    pub reference_name: Option<String>,
    pub weights: ScoringWeights,
}

/// How the reference node was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceResolution {
    Named,
    AttackerFallback,
    Missing,
}

/// Reference node chosen for a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub index: Option<NodeIndex>,
    pub resolution: ReferenceResolution,
}

/// Graph distance of a territory from the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distance {
    Hops(u32),
    Unreachable,
    NoReference,
}

/// The four terms of a score and their clamped total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffortBreakdown {
    pub distance: f64,
    pub momentum: f64,
    pub progress: f64,
    pub tier: f64,
    pub total: f64,
}

/// Outcome of one scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringSummary {
    pub scored: usize,
    pub unreachable: usize,
    pub reference: Option<String>,
    pub resolution: ReferenceResolution,
}

/// Distance term: grows linearly to `distance_weight` at `max_distance_hops`.
pub fn distance_term(distance: Distance, w: &ScoringWeights) -> f64 {
    match distance {
        Distance::Hops(hops) => {
            let max = w.max_distance_hops.max(1) as f64;
            (hops as f64 * w.distance_weight / max).min(w.distance_weight)
        }
        Distance::Unreachable => w.distance_weight,
        Distance::NoReference => w.unknown_distance(),
    }
}

/// Momentum term: `(own - enemy + 1) * momentum_weight`.
pub fn momentum_term(t: &Territory, w: &ScoringWeights) -> f64 {
    (t.effective_momentum().net() + 1.0) * w.momentum_weight
}

/// Progress term: banked progress makes capture easier.
pub fn progress_term(t: &Territory, w: &ScoringWeights) -> f64 {
    let Some(mut fraction) = t.progress_fraction() else {
        return 0.0;
    };
    if fraction > 1.0 {
        debug!(territory = %t.name, fraction, "progress past threshold");
    }
    if w.clamp_progress {
        fraction = fraction.clamp(0.0, 1.0);
    }
    -w.progress_weight * fraction
}

/// Tier term from the last classification.
pub fn tier_term(t: &Territory, w: &ScoringWeights) -> f64 {
    w.tier_weight(t.tier())
}

/// Scores defender territories in a graph.
#[derive(Debug, Clone)]
pub struct CaptureEffortScorer {
    params: ScoringParams,
}

impl CaptureEffortScorer {
    pub fn new(params: ScoringParams) -> Self {
        CaptureEffortScorer { params }
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    /// Finds the reference node: by name, else the attacker's first territory.
    pub fn resolve_reference(&self, graph: &TerritoryGraph) -> Reference {
        if let Some(name) = &self.params.reference_name {
            if let Some(idx) = graph.find_by_name(name) {
                return Reference {
                    index: Some(idx),
                    resolution: ReferenceResolution::Named,
                };
            }
            warn!(reference = %name, "reference territory not found in graph");
        }

        let attacker = self.params.attacker;
        let fallback = if attacker.is_claimed() {
            graph
                .iter()
                .find(|(_, t)| t.controlling_faction == attacker)
                .map(|(idx, _)| idx)
        } else {
            None
        };
        match fallback {
            Some(idx) => {
                warn!(
                    fallback = %graph.territory(idx).name,
                    "using first attacker territory as reference"
                );
                Reference {
                    index: Some(idx),
                    resolution: ReferenceResolution::AttackerFallback,
                }
            }
            None => {
                if !graph.is_empty() {
                    warn!(%attacker, "no attacker territory; distance term set to mid value");
                }
                Reference {
                    index: None,
                    resolution: ReferenceResolution::Missing,
                }
            }
        }
    }

    /// Computes the score of one territory at a given distance.
    pub fn breakdown(&self, t: &Territory, distance: Distance) -> EffortBreakdown {
        let w = &self.params.weights;
        let distance = distance_term(distance, w);
        let momentum = momentum_term(t, w);
        let progress = progress_term(t, w);
        let tier = tier_term(t, w);
        let total = (w.base + distance + momentum + progress + tier).clamp(0.0, 100.0);
        EffortBreakdown {
            distance,
            momentum,
            progress,
            tier,
            total,
        }
    }

    /// Scores every defender territory; clears the score of every other node.
    pub fn score(&self, graph: &mut TerritoryGraph) -> ScoringSummary {
        let defender = self.params.defender;
        let reference = self.resolve_reference(graph);
        let hops = reference.index.map(|r| graph.hop_distances(r));

        let mut summary = ScoringSummary {
            scored: 0,
            unreachable: 0,
            reference: reference.index.map(|r| graph.territory(r).name.clone()),
            resolution: reference.resolution,
        };

        for idx in 0..graph.len() {
            let t = graph.territory(idx);
            if !defender.is_claimed() || t.controlling_faction != defender {
                graph.territory_mut(idx).capture_effort = None;
                continue;
            }

            let distance = match &hops {
                Some(h) => match h[idx] {
                    Some(d) => Distance::Hops(d),
                    None => {
                        warn!(territory = %t.name, "no path from reference; using maximum distance");
                        summary.unreachable += 1;
                        Distance::Unreachable
                    }
                },
                None => Distance::NoReference,
            };

            let b = self.breakdown(t, distance);
            debug!(
                territory = %t.name,
                distance = b.distance,
                momentum = b.momentum,
                progress = b.progress,
                tier = b.tier,
                total = b.total,
                "capture effort"
            );
            graph.territory_mut(idx).capture_effort = Some(CaptureEffort::new(b.total));
            summary.scored += 1;
        }

        info!(
            scored = summary.scored,
            unreachable = summary.unreachable,
            reference = ?summary.reference,
            "capture effort scoring complete"
        );
        summary
    }
}
