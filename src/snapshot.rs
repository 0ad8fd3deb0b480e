//! JSON warzone snapshots.
//!
//! A snapshot lists territories with their feed attributes and the
//! connections between them. Connections may be given as a top-level pair
//! list, as per-territory `adjacent` lists, or both; they are merged and
//! duplicates are dropped. Connections naming a territory outside the
//! snapshot are skipped with a warning.
//!
//! ```json
//! {
//!   "name": "Amarr-Minmatar",
//!   "factions": [500003, 500002],
//!   "territories": [
//!     { "id": 1, "name": "Huola", "controlling_faction": 500003,
//!       "progress_points": 1200, "progress_threshold": 3000,
//!       "contested": "contested", "momentum": { "own": 0.3, "enemy": 0.6 },
//!       "adjacent": [2] }
//!   ],
//!   "connections": [[1, 2]]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::Warzone;
use crate::map::{
    ContestStatus, FactionId, GraphBuilder, GraphError, Momentum, Territory, TerritoryGraph,
    TerritoryId,
};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid snapshot graph: {0}")]
    Graph(#[from] GraphError),
}

/// One territory as it appears in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerritoryRecord {
    pub id: TerritoryId,
    pub name: String,
    #[serde(default)]
    pub controlling_faction: FactionId,
    #[serde(default)]
    pub progress_points: i64,
    #[serde(default)]
    pub progress_threshold: i64,
    #[serde(default)]
    pub contested: ContestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub momentum: Option<Momentum>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adjacent: Vec<TerritoryId>,
}

impl TerritoryRecord {
    fn to_territory(&self) -> Territory {
        Territory {
            momentum: self.momentum,
            ..Territory::new(self.id, self.name.clone(), self.controlling_faction)
                .with_progress(self.progress_points, self.progress_threshold)
                .with_contest(self.contested)
        }
    }
}

/// A whole snapshot document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDoc {
    #[serde(default = "default_name")]
    pub name: String,
    /// `(defender, attacker)`; absent means "use the configured pair".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factions: Option<(FactionId, FactionId)>,
    pub territories: Vec<TerritoryRecord>,
    #[serde(default)]
    pub connections: Vec<(TerritoryId, TerritoryId)>,
}

fn default_name() -> String {
    "warzone".to_string()
}

impl SnapshotDoc {
    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the territory graph described by this snapshot.
    pub fn build_graph(&self) -> Result<TerritoryGraph, SnapshotError> {
        let mut builder = GraphBuilder::new();
        for record in &self.territories {
            builder.add_territory(record.to_territory())?;
        }

        let listed = self
            .territories
            .iter()
            .flat_map(|r| r.adjacent.iter().map(move |&other| (r.id, other)));
        let mut skipped = 0usize;
        for (a, b) in self.connections.iter().copied().chain(listed) {
            if !builder.contains(a) || !builder.contains(b) {
                warn!(from = %a, to = %b, "skipping connection to a territory outside the snapshot");
                skipped += 1;
                continue;
            }
            builder.connect(a, b)?;
        }

        let graph = builder.build();
        debug!(
            territories = graph.len(),
            connections = graph.edge_count(),
            skipped,
            "snapshot graph built"
        );
        Ok(graph)
    }

    /// Builds a warzone, using `fallback` when the snapshot names no factions.
    pub fn into_warzone(self, fallback: (FactionId, FactionId)) -> Result<Warzone, SnapshotError> {
        let graph = self.build_graph()?;
        let factions = self.factions.unwrap_or(fallback);
        Ok(Warzone::new(self.name, factions, graph))
    }
}

/// Reads a snapshot document from disk.
pub fn load_snapshot(path: &Path) -> Result<SnapshotDoc, SnapshotError> {
    let data = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.display().to_string(),
        source,
    })?;
    SnapshotDoc::from_json_str(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "name": "Test",
        "factions": [500003, 500002],
        "territories": [
            {"id": 1, "name": "Vard", "controlling_faction": 500002, "adjacent": [2]},
            {"id": 2, "name": "Amamake", "controlling_faction": 500003,
             "progress_points": 1500, "progress_threshold": 3000,
             "contested": "contested", "momentum": {"own": 0.2, "enemy": 0.7},
             "adjacent": [1, 3, 99]},
            {"id": 3, "name": "Kourmonen", "controlling_faction": 500003},
            {"id": 4, "name": "Empty"}
        ],
        "connections": [[3, 2], [4, 42]]
    }"#;

    #[test]
    fn parses_and_builds() {
        let doc = SnapshotDoc::from_json_str(DOC).unwrap();
        assert_eq!(doc.territories.len(), 4);
        let g = doc.build_graph().unwrap();
        assert_eq!(g.len(), 4);
        // 1-2 from both adjacency lists, 2-3 from connections and adjacency.
        assert_eq!(g.edge_count(), 2);

        let amamake = g.get(TerritoryId(2)).unwrap();
        assert_eq!(amamake.contested, ContestStatus::Contested);
        assert_eq!(amamake.momentum, Some(Momentum::new(0.2, 0.7)));
        assert_eq!(amamake.progress_fraction(), Some(0.5));

        let empty = g.get(TerritoryId(4)).unwrap();
        assert!(!empty.is_claimed());
        assert!(g.neighbors(g.index_of(TerritoryId(4)).unwrap()).is_empty());
    }

    #[test]
    fn factions_fall_back_to_configured_pair() {
        let doc = SnapshotDoc::from_json_str(r#"{"territories": []}"#).unwrap();
        assert_eq!(doc.name, "warzone");
        let wz = doc
            .into_warzone((FactionId::CALDARI_STATE, FactionId::GALLENTE_FEDERATION))
            .unwrap();
        assert_eq!(wz.factions, (FactionId::CALDARI_STATE, FactionId::GALLENTE_FEDERATION));

        let wz = SnapshotDoc::from_json_str(DOC)
            .unwrap()
            .into_warzone((FactionId(1), FactionId(2)))
            .unwrap();
        assert_eq!(wz.factions, (FactionId::AMARR_EMPIRE, FactionId::MINMATAR_REPUBLIC));
        assert_eq!(wz.name, "Test");
    }

    #[test]
    fn graph_errors_are_reported() {
        let dup = r#"{"territories": [{"id": 1, "name": "A"}, {"id": 1, "name": "B"}]}"#;
        let err = SnapshotDoc::from_json_str(dup).unwrap().build_graph().unwrap_err();
        assert!(matches!(err, SnapshotError::Graph(GraphError::DuplicateId(TerritoryId(1)))));

        let looped = r#"{"territories": [{"id": 1, "name": "A"}], "connections": [[1, 1]]}"#;
        let err = SnapshotDoc::from_json_str(looped).unwrap().build_graph().unwrap_err();
        assert!(matches!(err, SnapshotError::Graph(GraphError::SelfLoop(_))));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            SnapshotDoc::from_json_str(r#"{"territories": [{"name": "NoId"}]}"#),
            Err(SnapshotError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_snapshot(Path::new("/nonexistent/snapshot.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }
}
