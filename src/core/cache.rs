// src/core/cache.rs

use crate::models::OptionList;
use log::debug;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct CacheState {
    /// Bumped on every reset so results computed against an older snapshot
    /// are recognized and discarded instead of repopulating the fresh cache.
    generation: u64,
    entries: HashMap<String, OptionList>,
}

/// Memoizes computed option lists keyed by the selected primary value.
///
/// The cache starts empty and active. Sources run outside the lock, so one
/// slow command cannot stall lookups for other keys; the price is that two
/// concurrent misses on the same key may both run the source, with the first
/// stored result winning.
#[derive(Debug, Default)]
pub struct ResultCache {
    state: Mutex<CacheState>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drops every stored entry. Results still being computed when this runs
    /// will be handed to their caller but not stored.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.generation = state.generation.wrapping_add(1);
        state.entries.clear();
        debug!("Result cache cleared (generation {})", state.generation);
    }

    /// Returns the cached list for `key`, or runs `compute` and stores its
    /// answer. Errors from `compute` are passed through and never cached.
    pub fn get_or_compute<E, F>(&self, key: &str, compute: F) -> Result<OptionList, E>
    where
        F: FnOnce() -> Result<OptionList, E>,
    {
        let generation = {
            let state = self.lock();
            if let Some(hit) = state.entries.get(key) {
                debug!("Cache hit for '{key}'");
                return Ok(hit.clone());
            }
            state.generation
        };

        let computed = compute()?;

        let mut state = self.lock();
        if state.generation != generation {
            debug!("Cache was reset while computing '{key}', result not stored");
            return Ok(computed);
        }
        match state.entries.entry(key.to_string()) {
            // Another caller finished first; agree with what is stored.
            Entry::Occupied(existing) => Ok(existing.get().clone()),
            Entry::Vacant(slot) => {
                slot.insert(computed.clone());
                Ok(computed)
            }
        }
    }
}

// MARK: --- UNIT TESTS ---
