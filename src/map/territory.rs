//! Territory nodes.
//!
//! A `Territory` carries the attributes supplied by the data feed (control,
//! progress, contest state, momentum) plus two derived attributes: the tier
//! assigned by the classifier and the capture effort assigned by the scorer.
//! The derived fields are crate-private so only those two passes write them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::faction::FactionId;

/// Stable identifier of a territory, fixed at the graph-construction boundary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TerritoryId(pub u32);

impl fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contest state reported by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContestStatus {
    #[default]
    Uncontested,
    Contested,
    Vulnerable,
    Captured,
}

impl ContestStatus {
    /// Anything other than `Uncontested` counts as contested.
    pub const fn is_contested(self) -> bool {
        !matches!(self, ContestStatus::Uncontested)
    }

    /// Returns the lowercase feed name.
    pub const fn name(self) -> &'static str {
        match self {
            ContestStatus::Uncontested => "uncontested",
            ContestStatus::Contested => "contested",
            ContestStatus::Vulnerable => "vulnerable",
            ContestStatus::Captured => "captured",
        }
    }
}

/// Per-territory tempo of the holder (`own`) and its opponent (`enemy`), each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Momentum {
    pub own: f64,
    pub enemy: f64,
}

impl Momentum {
    /// Assumed momentum for an uncontested territory with no data.
    pub const QUIET: Momentum = Momentum { own: 0.0, enemy: 0.0 };
    /// Assumed momentum for a contested territory with no data.
    pub const EVEN: Momentum = Momentum { own: 0.5, enemy: 0.5 };

    pub const fn new(own: f64, enemy: f64) -> Self {
        Momentum { own, enemy }
    }

    /// Holder momentum minus opponent momentum, in [-1, 1] for well-formed input.
    pub fn net(self) -> f64 {
        self.own - self.enemy
    }

    pub fn is_finite(self) -> bool {
        self.own.is_finite() && self.enemy.is_finite()
    }

    /// Both sides clamped to [0, 1].
    pub fn clamped(self) -> Momentum {
        Momentum {
            own: self.own.clamp(0.0, 1.0),
            enemy: self.enemy.clamp(0.0, 1.0),
        }
    }
}

/// Exposure tier of a territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Borders enemy territory, or is on the permanent list.
    Frontline,
    /// One hop behind a friendly frontline.
    CommandOperations,
    /// Interior.
    #[default]
    Rearguard,
}

/// All tiers, most exposed first.
pub const ALL_TIERS: [Tier; 3] = [Tier::Frontline, Tier::CommandOperations, Tier::Rearguard];

impl Tier {
    /// Returns the snake_case name used in serialized output.
    pub const fn name(self) -> &'static str {
        match self {
            Tier::Frontline => "frontline",
            Tier::CommandOperations => "command_operations",
            Tier::Rearguard => "rearguard",
        }
    }

    /// Short human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Tier::Frontline => "Frontline",
            Tier::CommandOperations => "Command Ops",
            Tier::Rearguard => "Rearguard",
        }
    }
}

/// Bucketed capture effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EffortCategory {
    #[serde(rename = "Very Easy")]
    VeryEasy,
    #[serde(rename = "Easy")]
    Easy,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "Hard")]
    Hard,
    #[serde(rename = "Very Hard")]
    VeryHard,
}

/// All categories, easiest first.
pub const ALL_CATEGORIES: [EffortCategory; 5] = [
    EffortCategory::VeryEasy,
    EffortCategory::Easy,
    EffortCategory::Moderate,
    EffortCategory::Hard,
    EffortCategory::VeryHard,
];

impl EffortCategory {
    /// Buckets a score: <20, <40, <60, <80, else.
    pub fn from_score(score: f64) -> Self {
        if score < 20.0 {
            EffortCategory::VeryEasy
        } else if score < 40.0 {
            EffortCategory::Easy
        } else if score < 60.0 {
            EffortCategory::Moderate
        } else if score < 80.0 {
            EffortCategory::Hard
        } else {
            EffortCategory::VeryHard
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EffortCategory::VeryEasy => "Very Easy",
            EffortCategory::Easy => "Easy",
            EffortCategory::Moderate => "Moderate",
            EffortCategory::Hard => "Hard",
            EffortCategory::VeryHard => "Very Hard",
        }
    }
}

impl fmt::Display for EffortCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Capture-effort score in [0, 100] together with its category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CaptureEffort {
    pub score: f64,
    pub category: EffortCategory,
}

impl CaptureEffort {
    pub fn new(score: f64) -> Self {
        CaptureEffort {
            score,
            category: EffortCategory::from_score(score),
        }
    }
}

/// A territory node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Territory {
    pub id: TerritoryId,
    pub name: String,
    pub controlling_faction: FactionId,
    pub progress_points: i64,
    pub progress_threshold: i64,
    pub contested: ContestStatus,
    /// Feed-supplied momentum; `None` when the feed had nothing for this node.
    pub momentum: Option<Momentum>,
    pub(crate) permanent_frontline: bool,
    pub(crate) tier: Tier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) capture_effort: Option<CaptureEffort>,
}

impl Territory {
    /// Creates an uncontested territory with no progress and no momentum data.
    pub fn new(id: TerritoryId, name: impl Into<String>, controlling_faction: FactionId) -> Self {
        Territory {
            id,
            name: name.into(),
            controlling_faction,
            progress_points: 0,
            progress_threshold: 0,
            contested: ContestStatus::Uncontested,
            momentum: None,
            permanent_frontline: false,
            tier: Tier::Rearguard,
            capture_effort: None,
        }
    }

    pub fn with_progress(mut self, points: i64, threshold: i64) -> Self {
        self.progress_points = points;
        self.progress_threshold = threshold;
        self
    }

    pub fn with_contest(mut self, contested: ContestStatus) -> Self {
        self.contested = contested;
        self
    }

    pub fn with_momentum(mut self, own: f64, enemy: f64) -> Self {
        self.momentum = Some(Momentum::new(own, enemy));
        self
    }

    pub const fn is_claimed(&self) -> bool {
        self.controlling_faction.is_claimed()
    }

    /// Feed momentum clamped to [0, 1], or the contest-based default when the
    /// feed had none. Non-finite feed values count as none.
    pub fn effective_momentum(&self) -> Momentum {
        match self.momentum {
            Some(m) if m.is_finite() => m.clamped(),
            _ if self.contested.is_contested() => Momentum::EVEN,
            _ => Momentum::QUIET,
        }
    }

    /// `points / threshold`, or `None` when the threshold is not positive.
    ///
    /// Not clamped: a feed may report points past the threshold.
    pub fn progress_fraction(&self) -> Option<f64> {
        if self.progress_threshold <= 0 {
            return None;
        }
        Some(self.progress_points as f64 / self.progress_threshold as f64)
    }

    /// Tier from the most recent classification pass.
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    /// True if the last classification applied the permanent allow-list.
    pub const fn is_permanent_frontline(&self) -> bool {
        self.permanent_frontline
    }

    /// Score from the most recent scoring pass; absent for unscored nodes.
    pub const fn capture_effort(&self) -> Option<CaptureEffort> {
        self.capture_effort
    }
}
