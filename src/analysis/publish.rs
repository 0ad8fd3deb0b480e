//! Publication of analysed warzones to concurrent readers.
//!
//! A refresh analyses a fresh graph to completion and then swaps it in.
//! Readers hold an `Arc` to whichever snapshot was current when they asked,
//! so they never observe a graph between passes.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::AnalyzedWarzone;

/// Holds the current analysed snapshot and its publish count.
#[derive(Debug)]
pub struct SnapshotCell {
    current: RwLock<(Arc<AnalyzedWarzone>, u64)>,
}

impl SnapshotCell {
    pub fn new(initial: AnalyzedWarzone) -> Self {
        SnapshotCell {
            current: RwLock::new((Arc::new(initial), 0)),
        }
    }

    /// The snapshot current at the time of the call.
    pub fn load(&self) -> Arc<AnalyzedWarzone> {
        self.load_with_generation().0
    }

    /// The current snapshot together with the generation that published it.
    pub fn load_with_generation(&self) -> (Arc<AnalyzedWarzone>, u64) {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        (Arc::clone(&guard.0), guard.1)
    }

    /// Replaces the current snapshot and returns the previous one.
    pub fn publish(&self, next: AnalyzedWarzone) -> Arc<AnalyzedWarzone> {
        let next = Arc::new(next);
        let (previous, generation) = {
            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            let generation = guard.1 + 1;
            let previous = std::mem::replace(&mut *guard, (next, generation)).0;
            (previous, generation)
        };
        info!(warzone = %previous.name, generation, "published new snapshot");
        previous
    }

    /// Number of publishes since creation.
    pub fn generation(&self) -> u64 {
        self.current.read().unwrap_or_else(PoisonError::into_inner).1
    }
}
