//! Capture-effort scoring for defender territories.

pub mod scorer;
pub mod weights;

pub use scorer::{
    distance_term, momentum_term, progress_term, tier_term, CaptureEffortScorer, Distance,
    EffortBreakdown, Reference, ReferenceResolution, ScoringParams, ScoringSummary,
};
pub use weights::ScoringWeights;
