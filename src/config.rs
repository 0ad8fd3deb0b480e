//! Analysis configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes. The defaults describe the Amarr/Minmatar warzone: Amarr defends,
//! Minmatar attacks from Vard, and both sides carry their standing list of
//! permanent frontlines.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::PermanentFrontlines;
use crate::effort::{ScoringParams, ScoringWeights};
use crate::map::FactionId;

/// Territories Amarr treats as frontline whatever their neighbors.
pub const AMARR_PERMANENT_FRONTLINES: [&str; 6] =
    ["Amamake", "Bosboger", "Auner", "Resbroko", "Evati", "Arnstur"];

/// Territories Minmatar treats as frontline whatever their neighbors.
pub const MINMATAR_PERMANENT_FRONTLINES: [&str; 9] = [
    "Raa", "Kamela", "Sosala", "Huola", "Anka", "Iesa", "Uusanen", "Saikamon", "Halmah",
];

/// Default attacker staging territory.
pub const DEFAULT_REFERENCE: &str = "Vard";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Faction whose territories are scored.
    pub defender: FactionId,
    pub attacker: FactionId,
    /// Attacker staging territory; `None` falls back to the attacker's first territory.
    pub reference_name: Option<String>,
    pub permanent_frontlines: PermanentFrontlines,
    pub weights: ScoringWeights,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            defender: FactionId::AMARR_EMPIRE,
            attacker: FactionId::MINMATAR_REPUBLIC,
            reference_name: Some(DEFAULT_REFERENCE.to_string()),
            permanent_frontlines: builtin_permanent_frontlines(),
            weights: ScoringWeights::default(),
        }
    }
}

/// The standing Amarr and Minmatar allow-lists.
pub fn builtin_permanent_frontlines() -> PermanentFrontlines {
    PermanentFrontlines::new()
        .with(FactionId::AMARR_EMPIRE, AMARR_PERMANENT_FRONTLINES)
        .with(FactionId::MINMATAR_REPUBLIC, MINMATAR_PERMANENT_FRONTLINES)
}

impl AnalysisConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.defender.is_none() || self.attacker.is_none() {
            return Err(ConfigError::Invalid(
                "defender and attacker must be claimed factions".to_string(),
            ));
        }
        if self.defender == self.attacker {
            return Err(ConfigError::Invalid(format!(
                "defender and attacker are both {}",
                self.defender
            )));
        }
        if self.weights.max_distance_hops == 0 {
            return Err(ConfigError::Invalid(
                "weights.max_distance_hops must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Scorer inputs for the configured defender and attacker.
    pub fn scoring_params(&self) -> ScoringParams {
        self.scoring_params_for(self.defender, self.attacker)
    }

    /// Scorer inputs for another faction pair, keeping the reference and weights.
    pub fn scoring_params_for(&self, defender: FactionId, attacker: FactionId) -> ScoringParams {
        ScoringParams {
            defender,
            attacker,
            reference_name: self.reference_name.clone(),
            weights: self.weights.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_amarr_minmatar() {
        let c = AnalysisConfig::default();
        assert_eq!(c.defender, FactionId(500003));
        assert_eq!(c.attacker, FactionId(500002));
        assert_eq!(c.reference_name.as_deref(), Some("Vard"));
        assert!(c.permanent_frontlines.contains("Amamake", FactionId::AMARR_EMPIRE));
        assert!(c.permanent_frontlines.contains("Huola", FactionId::MINMATAR_REPUBLIC));
        assert!(!c.permanent_frontlines.contains("Huola", FactionId::AMARR_EMPIRE));
        assert_eq!(c.permanent_frontlines.len(), 15);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_object_is_default() {
        let c = AnalysisConfig::from_json_str("{}").unwrap();
        assert_eq!(c, AnalysisConfig::default());
    }

    #[test]
    fn overrides_keep_other_defaults() {
        let json = r#"{
            "defender": 500002,
            "attacker": 500003,
            "reference_name": null,
            "permanent_frontlines": {"500002": ["Huola"]},
            "weights": {"clamp_progress": true}
        }"#;
        let c = AnalysisConfig::from_json_str(json).unwrap();
        assert_eq!(c.defender, FactionId::MINMATAR_REPUBLIC);
        assert_eq!(c.reference_name, None);
        assert_eq!(c.permanent_frontlines.len(), 1);
        assert!(c.weights.clamp_progress);
        assert_eq!(c.weights.base, 50.0);

        let p = c.scoring_params();
        assert_eq!(p.defender, FactionId::MINMATAR_REPUBLIC);
        assert_eq!(p.attacker, FactionId::AMARR_EMPIRE);

        let p = c.scoring_params_for(FactionId::CALDARI_STATE, FactionId::GALLENTE_FEDERATION);
        assert_eq!(p.defender, FactionId::CALDARI_STATE);
        assert_eq!(p.attacker, FactionId::GALLENTE_FEDERATION);
        assert!(p.weights.clamp_progress);
    }

    #[test]
    fn round_trips_through_json() {
        let c = AnalysisConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(AnalysisConfig::from_json_str(&json).unwrap(), c);
    }

    #[test]
    fn rejects_bad_configs() {
        let same = r#"{"defender": 500002, "attacker": 500002}"#;
        assert!(matches!(AnalysisConfig::from_json_str(same), Err(ConfigError::Invalid(_))));

        let unclaimed = r#"{"attacker": 0}"#;
        assert!(matches!(
            AnalysisConfig::from_json_str(unclaimed),
            Err(ConfigError::Invalid(_))
        ));

        let hops = r#"{"weights": {"max_distance_hops": 0}}"#;
        assert!(matches!(AnalysisConfig::from_json_str(hops), Err(ConfigError::Invalid(_))));

        assert!(matches!(
            AnalysisConfig::from_json_str("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AnalysisConfig::load(Path::new("/nonexistent/frontline.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/frontline.json"));
    }
}
