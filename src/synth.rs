//! Seeded synthetic warzones for demos, tests and benchmarks.
//!
//! The generator lays territories out on a chain, adds random cross links,
//! and splits control along the chain: the attacker holds the head (starting
//! with its staging territory at node 0) and the defender holds the tail.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::Warzone;
use crate::config::DEFAULT_REFERENCE;
use crate::map::{ContestStatus, FactionId, GraphBuilder, GraphError, Territory, TerritoryId};

/// Progress threshold given to every generated territory.
pub const SYNTHETIC_THRESHOLD: i64 = 3000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticWarzone {
    /// Random seed (0 = use entropy).
    pub seed: u64,
    pub territories: usize,
    /// Random links added on top of the chain.
    pub extra_links: usize,
    /// Probability that a territory is contested.
    pub contested_ratio: f64,
    pub defender: FactionId,
    pub attacker: FactionId,
    /// Name of node 0, the attacker's staging territory.
    pub reference_name: String,
}

impl Default for SyntheticWarzone {
    fn default() -> Self {
        SyntheticWarzone {
            seed: 0,
            territories: 60,
            extra_links: 20,
            contested_ratio: 0.3,
            defender: FactionId::AMARR_EMPIRE,
            attacker: FactionId::MINMATAR_REPUBLIC,
            reference_name: DEFAULT_REFERENCE.to_string(),
        }
    }
}

impl SyntheticWarzone {
    pub fn with_size(seed: u64, territories: usize) -> Self {
        SyntheticWarzone {
            seed,
            territories,
            extra_links: territories / 3,
            ..SyntheticWarzone::default()
        }
    }

    pub fn generate(&self) -> Result<Warzone, GraphError> {
        let mut rng = if self.seed != 0 {
            SmallRng::seed_from_u64(self.seed)
        } else {
            SmallRng::from_entropy()
        };

        let n = self.territories;
        let split = if n >= 2 { rng.gen_range(1..n) } else { n };
        let ratio = self.contested_ratio.clamp(0.0, 1.0);

        let mut builder = GraphBuilder::new();
        for i in 0..n {
            let faction = if i < split { self.attacker } else { self.defender };
            let name = if i == 0 {
                self.reference_name.clone()
            } else {
                format!("System {i}")
            };
            let mut t = Territory::new(TerritoryId(i as u32 + 1), name, faction);

            if rng.gen_bool(ratio) {
                let status = if rng.gen_bool(0.25) {
                    ContestStatus::Vulnerable
                } else {
                    ContestStatus::Contested
                };
                let points = rng.gen_range(0..=SYNTHETIC_THRESHOLD);
                t = t
                    .with_contest(status)
                    .with_progress(points, SYNTHETIC_THRESHOLD)
                    .with_momentum(rng.gen::<f64>(), rng.gen::<f64>());
            } else {
                t = t.with_progress(0, SYNTHETIC_THRESHOLD);
            }
            builder.add_territory(t)?;
        }

        for i in 1..n {
            builder.connect(TerritoryId(i as u32), TerritoryId(i as u32 + 1))?;
        }

        let mut added = 0;
        if n >= 3 {
            for _ in 0..self.extra_links {
                let a = rng.gen_range(1..=n as u32);
                let b = rng.gen_range(1..=n as u32);
                if a != b && builder.connect(TerritoryId(a), TerritoryId(b))? {
                    added += 1;
                }
            }
        }

        let graph = builder.build();
        debug!(
            seed = self.seed,
            territories = graph.len(),
            connections = graph.edge_count(),
            extra_links = added,
            split,
            "synthetic warzone generated"
        );
        Ok(Warzone::new(
            format!("synthetic-{}", self.seed),
            (self.defender, self.attacker),
            graph,
        ))
    }
}
