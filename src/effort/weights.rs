//! Scoring constants for capture effort.

use serde::{Deserialize, Serialize};

use crate::map::Tier;

/// Weights of the four capture-effort terms.
///
/// The defaults give the standard ranges: distance [0, 30], momentum [0, 30],
/// progress [-20, 0], tier {0, 20, 40}, on top of a base of 50.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub base: f64,
    /// Hop count at which the distance term saturates.
    pub max_distance_hops: u32,
    /// Upper bound of the distance term; also used when no path exists.
    pub distance_weight: f64,
    /// Momentum term is `(net + 1) * momentum_weight`.
    pub momentum_weight: f64,
    /// Progress term is `-progress_weight * points / threshold`.
    pub progress_weight: f64,
    pub frontline: f64,
    pub command_operations: f64,
    pub rearguard: f64,
    /// Clamp the progress fraction to [0, 1] before weighting.
    pub clamp_progress: bool,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            base: 50.0,
            max_distance_hops: 15,
            distance_weight: 30.0,
            momentum_weight: 15.0,
            progress_weight: 20.0,
            frontline: 0.0,
            command_operations: 20.0,
            rearguard: 40.0,
            clamp_progress: false,
        }
    }
}

impl ScoringWeights {
    /// Tier term for `tier`.
    pub fn tier_weight(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Frontline => self.frontline,
            Tier::CommandOperations => self.command_operations,
            Tier::Rearguard => self.rearguard,
        }
    }

    /// Distance term used when there is no reference node at all.
    pub fn unknown_distance(&self) -> f64 {
        self.distance_weight / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let w = ScoringWeights::default();
        assert_eq!(w.tier_weight(Tier::Frontline), 0.0);
        assert_eq!(w.tier_weight(Tier::CommandOperations), 20.0);
        assert_eq!(w.tier_weight(Tier::Rearguard), 40.0);
        assert_eq!(w.unknown_distance(), 15.0);
        assert!(!w.clamp_progress);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let w: ScoringWeights = serde_json::from_str(r#"{"clamp_progress": true, "base": 40}"#).unwrap();
        assert!(w.clamp_progress);
        assert_eq!(w.base, 40.0);
        assert_eq!(w.max_distance_hops, 15);
        assert_eq!(w.rearguard, 40.0);
    }
}
