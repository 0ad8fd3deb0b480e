//! Text and JSON reports of analysed warzones.

use std::io::{self, Write};

use serde::Serialize;

use crate::analysis::AnalyzedWarzone;
use crate::classify::{Anomaly, TierExplanation, TierReason};
use crate::map::{EffortCategory, FactionId, TerritoryId, Tier, ALL_TIERS};

/// One scored territory in a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetRow {
    pub id: TerritoryId,
    pub name: String,
    pub tier: Tier,
    pub score: f64,
    pub category: EffortCategory,
}

/// One territory's tier in a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierRow {
    pub id: TerritoryId,
    pub name: String,
    pub faction: FactionId,
    pub tier: Tier,
    pub permanent: bool,
}

/// Serializable view of an analysed warzone.
#[derive(Debug, Serialize)]
pub struct WarzoneReport<'a> {
    #[serde(flatten)]
    pub warzone: &'a AnalyzedWarzone,
    pub tiers: Vec<TierRow>,
    pub targets: Vec<TargetRow>,
    pub categories: Vec<(EffortCategory, usize)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanations: Option<Vec<TierExplanation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomalies: Option<Vec<Anomaly>>,
}

impl<'a> WarzoneReport<'a> {
    pub fn new(warzone: &'a AnalyzedWarzone) -> Self {
        let mut tiers: Vec<TierRow> = warzone
            .graph
            .territories()
            .iter()
            .map(|t| TierRow {
                id: t.id,
                name: t.name.clone(),
                faction: t.controlling_faction,
                tier: t.tier(),
                permanent: t.is_permanent_frontline(),
            })
            .collect();
        tiers.sort_by(|a, b| a.name.cmp(&b.name));

        let targets = warzone
            .capture_targets()
            .into_iter()
            .filter_map(|t| {
                t.capture_effort().map(|e| TargetRow {
                    id: t.id,
                    name: t.name.clone(),
                    tier: t.tier(),
                    score: e.score,
                    category: e.category,
                })
            })
            .collect();

        WarzoneReport {
            warzone,
            tiers,
            targets,
            categories: warzone.category_histogram(),
            explanations: None,
            anomalies: None,
        }
    }

    pub fn with_explanations(mut self, explanations: Vec<TierExplanation>) -> Self {
        self.explanations = Some(explanations);
        self
    }

    pub fn with_anomalies(mut self, anomalies: Vec<Anomaly>) -> Self {
        self.anomalies = Some(anomalies);
        self
    }

    pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let wz = self.warzone;
        writeln!(out, "== {} ==", wz.name)?;
        writeln!(out, "defender: {}  attacker: {}", wz.defender, wz.attacker)?;
        match &wz.scoring.reference {
            Some(name) => writeln!(out, "reference: {} ({:?})", name, wz.scoring.resolution)?,
            None => writeln!(out, "reference: none")?,
        }
        writeln!(out)?;

        writeln!(
            out,
            "{:<24} {:>10} {:>10} {:>9} {:>9} {:>11} {:>9}",
            "faction",
            "controlled",
            "contested",
            "control%",
            "frontline",
            "command ops",
            "rearguard",
        )?;
        for row in &wz.status.factions {
            writeln!(
                out,
                "{:<24} {:>10} {:>10} {:>8.1}% {:>9} {:>11} {:>9}",
                row.faction.to_string(),
                row.controlled,
                row.contested,
                row.control_percent,
                row.tiers.frontline,
                row.tiers.command_operations,
                row.tiers.rearguard,
            )?;
        }
        writeln!(out)?;

        write!(out, "tiers:")?;
        for tier in ALL_TIERS {
            write!(out, " {}={}", tier.label(), wz.classification.count(tier))?;
        }
        writeln!(out, " (permanent {})", wz.classification.permanent)?;
        for missing in &wz.classification.missing_permanent {
            writeln!(out, "  missing permanent frontline: {} ({})", missing.name, missing.faction)?;
        }
        writeln!(out)?;

        writeln!(out, "capture targets (easiest first):")?;
        writeln!(out, "{:<24} {:<12} {:>6}  category", "territory", "tier", "score")?;
        for row in &self.targets {
            writeln!(
                out,
                "{:<24} {:<12} {:>6.1}  {}",
                row.name,
                row.tier.label(),
                row.score,
                row.category
            )?;
        }
        if wz.scoring.unreachable > 0 {
            writeln!(out, "({} unreachable from reference)", wz.scoring.unreachable)?;
        }
        writeln!(out)?;

        write!(out, "categories:")?;
        for (category, count) in &self.categories {
            write!(out, " {}={}", category, count)?;
        }
        writeln!(out)?;

        if let Some(explanations) = &self.explanations {
            writeln!(out)?;
            writeln!(out, "explanations:")?;
            for ex in explanations {
                writeln!(out, "  {:<24} {:<12} {}", ex.name, ex.tier.label(), describe(&ex.reason))?;
            }
        }

        if let Some(anomalies) = &self.anomalies {
            writeln!(out)?;
            if anomalies.is_empty() {
                writeln!(out, "audit: clean")?;
            } else {
                writeln!(out, "audit: {} finding(s)", anomalies.len())?;
                for a in anomalies {
                    writeln!(out, "  {}", describe_anomaly(a))?;
                }
            }
        }
        Ok(())
    }
}

fn describe(reason: &TierReason) -> String {
    match reason {
        TierReason::PermanentFrontline => "permanent frontline".to_string(),
        TierReason::BordersEnemy { enemies } => format!("borders {}", enemies.join(", ")),
        TierReason::BehindFrontline { frontlines } => format!("behind {}", frontlines.join(", ")),
        TierReason::Interior => "interior".to_string(),
        TierReason::Unclaimed => "unclaimed".to_string(),
    }
}

fn describe_anomaly(anomaly: &Anomaly) -> String {
    match anomaly {
        Anomaly::PermanentNotFrontline { name, faction } => {
            format!("{name}: permanent frontline for {faction} but not frontline")
        }
        Anomaly::UnmarkedFrontline { name, enemies } => {
            format!("{name}: borders {} but not frontline", enemies.join(", "))
        }
        Anomaly::PermanentHeldByOther {
            name,
            listed_for,
            held_by,
        } => format!("{name}: listed for {listed_for}, held by {held_by}"),
    }
}
