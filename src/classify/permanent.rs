//! Per-faction allow-lists of territories that are always frontline.
//!
//! Lookup is by (name, holding faction): a name listed for one faction has no
//! effect while another faction holds the territory.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::map::FactionId;

/// Territory names that are frontline regardless of topology, keyed by faction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermanentFrontlines {
    by_faction: BTreeMap<FactionId, BTreeSet<String>>,
}

impl PermanentFrontlines {
    pub fn new() -> Self {
        PermanentFrontlines::default()
    }

    /// Adds `names` to the allow-list of `faction`.
    pub fn with<I, S>(mut self, faction: FactionId, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.insert(faction, name);
        }
        self
    }

    pub fn insert(&mut self, faction: FactionId, name: impl Into<String>) {
        self.by_faction.entry(faction).or_default().insert(name.into());
    }

    /// Returns true if `name` is on the allow-list of `faction`.
    pub fn contains(&self, name: &str, faction: FactionId) -> bool {
        self.by_faction
            .get(&faction)
            .is_some_and(|names| names.contains(name))
    }

    /// Names listed for `faction`.
    pub fn names_for(&self, faction: FactionId) -> impl Iterator<Item = &str> {
        self.by_faction
            .get(&faction)
            .into_iter()
            .flat_map(|names| names.iter().map(String::as_str))
    }

    /// Every (faction, name) entry, ordered by faction then name.
    pub fn iter(&self) -> impl Iterator<Item = (FactionId, &str)> {
        self.by_faction
            .iter()
            .flat_map(|(f, names)| names.iter().map(move |n| (*f, n.as_str())))
    }

    pub fn len(&self) -> usize {
        self.by_faction.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
