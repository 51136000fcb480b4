//! Last-request-wins sequencing for per-step suggestion calls
//!
//! Rapid edits can put several requests for the same step in flight at once.
//! The coordinator tags each issued request with a per-key generation number
//! and discards any result whose generation has been superseded, so only the
//! most recently issued request ever lands - even when an older one resolves
//! later. Underlying requests are not cancelled; their results are ignored.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

/// Per-step-key generation counters
///
/// Cloning shares the counters; the wizard and any helper tasks observe the
/// same generations. No lock is ever held across an await point.
#[derive(Debug, Clone, Default)]
pub struct RequestCoordinator {
    generations: Arc<Mutex<HashMap<String, u64>>>,
}

impl RequestCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        // A panic while holding this lock leaves plain counters behind;
        // recovering the inner map is always safe.
        self.generations.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Advance the generation for a key without issuing work.
    ///
    /// Any request issued under an earlier generation becomes stale.
    pub fn supersede(&self, step_key: &str) {
        let mut generations = self.lock();
        let counter = generations.entry(step_key.to_string()).or_insert(0);
        *counter += 1;
        debug!(step_key, generation = *counter, "supersede: advanced generation");
    }

    /// Advance every known key; used when the whole flow is abandoned.
    pub fn cancel_all(&self) {
        let mut generations = self.lock();
        for (step_key, counter) in generations.iter_mut() {
            *counter += 1;
            debug!(step_key, generation = *counter, "cancel_all: advanced generation");
        }
    }

    /// Current generation for a key (0 if never issued)
    pub fn generation(&self, step_key: &str) -> u64 {
        *self.lock().get(step_key).unwrap_or(&0)
    }

    /// Run `operation` under a fresh generation for `step_key`.
    ///
    /// Returns `None` when the key was superseded while the operation was in
    /// flight, meaning the result must not be applied.
    pub async fn issue<F, T>(&self, step_key: &str, operation: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let issued = {
            let mut generations = self.lock();
            let counter = generations.entry(step_key.to_string()).or_insert(0);
            *counter += 1;
            *counter
        };
        debug!(step_key, generation = issued, "issue: request issued");

        let result = operation.await;

        let current = self.generation(step_key);
        if current == issued {
            Some(result)
        } else {
            debug!(step_key, issued, current, "issue: stale result discarded");
            None
        }
    }
}
