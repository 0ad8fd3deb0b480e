//! Warzone analysis: classification followed by capture-effort scoring.
//!
//! Each warzone runs both passes sequentially on its own graph. Independent
//! warzones may be analysed in parallel with `analyze_all`.

pub mod publish;
pub mod status;

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::classify::{classify, ClassificationSummary};
use crate::config::AnalysisConfig;
use crate::effort::{CaptureEffortScorer, ScoringSummary};
use crate::map::{EffortCategory, FactionId, Territory, TerritoryGraph, ALL_CATEGORIES};

pub use publish::SnapshotCell;
pub use status::{FactionStatus, TierCounts, WarzoneStatus};

/// One independent conflict map and its two opposing factions.
#[derive(Debug, Clone)]
pub struct Warzone {
    pub name: String,
    /// `(defender, attacker)`: the defender's territories are scored.
    pub factions: (FactionId, FactionId),
    pub graph: TerritoryGraph,
}

impl Warzone {
    pub fn new(name: impl Into<String>, factions: (FactionId, FactionId), graph: TerritoryGraph) -> Self {
        Warzone {
            name: name.into(),
            factions,
            graph,
        }
    }
}

/// A warzone after both passes.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzedWarzone {
    pub name: String,
    pub defender: FactionId,
    pub attacker: FactionId,
    #[serde(skip)]
    pub graph: TerritoryGraph,
    pub classification: ClassificationSummary,
    pub scoring: ScoringSummary,
    pub status: WarzoneStatus,
}

impl AnalyzedWarzone {
    /// Scored territories, easiest to capture first; ties by name.
    pub fn capture_targets(&self) -> Vec<&Territory> {
        let mut targets: Vec<&Territory> = self
            .graph
            .territories()
            .iter()
            .filter(|t| t.capture_effort().is_some())
            .collect();
        targets.sort_by(|a, b| {
            let sa = a.capture_effort().map_or(0.0, |e| e.score);
            let sb = b.capture_effort().map_or(0.0, |e| e.score);
            sa.total_cmp(&sb).then_with(|| a.name.cmp(&b.name))
        });
        targets
    }

    /// Number of scored territories per category, easiest first.
    pub fn category_histogram(&self) -> Vec<(EffortCategory, usize)> {
        let mut counts: Vec<(EffortCategory, usize)> =
            ALL_CATEGORIES.iter().map(|&c| (c, 0)).collect();
        for t in self.graph.territories() {
            if let Some(effort) = t.capture_effort() {
                if let Some(slot) = counts.iter_mut().find(|(c, _)| *c == effort.category) {
                    slot.1 += 1;
                }
            }
        }
        counts
    }
}

/// Runs classification then scoring on `warzone`.
///
/// The warzone's own faction pair decides who is scored; `config` supplies
/// the reference name, weights and permanent frontlines.
pub fn analyze(warzone: Warzone, config: &AnalysisConfig) -> AnalyzedWarzone {
    let Warzone {
        name,
        factions,
        mut graph,
    } = warzone;

    let (defender, attacker) = factions;
    let classification = classify(&mut graph, &config.permanent_frontlines);
    let params = config.scoring_params_for(defender, attacker);
    let scoring = CaptureEffortScorer::new(params).score(&mut graph);
    let status = WarzoneStatus::from_graph(&graph, &[defender, attacker]);

    info!(
        warzone = %name,
        territories = graph.len(),
        connections = graph.edge_count(),
        scored = scoring.scored,
        "warzone analysed"
    );

    AnalyzedWarzone {
        name,
        defender,
        attacker,
        graph,
        classification,
        scoring,
        status,
    }
}

/// Analyses independent warzones in parallel; output order matches input.
pub fn analyze_all(warzones: Vec<Warzone>, config: &AnalysisConfig) -> Vec<AnalyzedWarzone> {
    warzones
        .into_par_iter()
        .map(|wz| analyze(wz, config))
        .collect()
}
