//! The shared in-process storage engine.
//!
//! A [`MemoryEngine`] plays the role the host persistence environment
//! plays for a real backend: it owns every named database in the process
//! and outlives individual store handles, so deletion and "does this store
//! exist" semantics can be observed across connections.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tickcache_core::{CacheError, DateRange, SeriesKey, TickerRecord};

/// Reserved ticker whose writes always fail, for exercising per-key write
/// failure paths deterministically in tests.
pub const FAILING_TICKER: &str = "FAIL";

/// In-process storage engine holding named databases.
///
/// Databases map (ticker, date) to records in a B-tree, giving the ordered
/// range scans the store contract requires. Each database counts its open
/// handles so deletion can refuse while a connection is live.
pub struct MemoryEngine {
    available: bool,
    inner: Mutex<EngineState>,
}

#[derive(Default)]
struct EngineState {
    databases: HashMap<String, Database>,
}

#[derive(Default)]
struct Database {
    rows: BTreeMap<(String, NaiveDate), TickerRecord>,
    open_handles: usize,
}

impl MemoryEngine {
    /// Create an engine with storage capability.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            available: true,
            inner: Mutex::new(EngineState::default()),
        })
    }

    /// Create an engine that refuses every connection, simulating a host
    /// environment without persistent-storage capability.
    #[must_use]
    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            available: false,
            inner: Mutex::new(EngineState::default()),
        })
    }

    /// Number of databases currently held by the engine. Test
    /// introspection only.
    ///
    /// # Panics
    /// Panics if the engine mutex is poisoned.
    #[must_use]
    pub fn database_count(&self) -> usize {
        self.inner.lock().expect("engine mutex poisoned").databases.len()
    }

    pub(crate) fn acquire(&self, name: &str, create: bool) -> Result<(), CacheError> {
        if !self.available {
            return Err(CacheError::store_unavailable(name));
        }
        let mut state = self.inner.lock().expect("engine mutex poisoned");
        let db = if create {
            state.databases.entry(name.to_string()).or_default()
        } else {
            state
                .databases
                .get_mut(name)
                .ok_or_else(|| CacheError::store_not_found(name))?
        };
        db.open_handles += 1;
        Ok(())
    }

    pub(crate) fn release(&self, name: &str) {
        let mut state = self.inner.lock().expect("engine mutex poisoned");
        if let Some(db) = state.databases.get_mut(name) {
            db.open_handles = db.open_handles.saturating_sub(1);
        }
    }

    /// Commit one record under its derived key. Keys commit independently;
    /// there is no cross-key transaction.
    pub(crate) fn write(
        &self,
        name: &str,
        record: TickerRecord,
        date_format: &str,
    ) -> Result<SeriesKey, CacheError> {
        let key = record.key();
        if record.ticker == FAILING_TICKER {
            return Err(CacheError::key_write(
                key.storage_key(date_format),
                "forced failure",
            ));
        }
        let mut state = self.inner.lock().expect("engine mutex poisoned");
        let db = state
            .databases
            .get_mut(name)
            .ok_or_else(|| CacheError::store_not_found(name))?;
        db.rows
            .insert((record.ticker.clone(), record.date), record);
        Ok(key)
    }

    pub(crate) fn scan(
        &self,
        name: &str,
        ticker: &str,
        range: DateRange,
    ) -> Result<Vec<TickerRecord>, CacheError> {
        let state = self.inner.lock().expect("engine mutex poisoned");
        let db = state
            .databases
            .get(name)
            .ok_or_else(|| CacheError::store_not_found(name))?;
        let lower = (ticker.to_string(), range.start());
        let upper = (ticker.to_string(), range.end());
        Ok(db.rows.range(lower..=upper).map(|(_, r)| r.clone()).collect())
    }

    pub(crate) fn delete(&self, name: &str) -> Result<(), CacheError> {
        let mut state = self.inner.lock().expect("engine mutex poisoned");
        if let Some(db) = state.databases.get(name) {
            if db.open_handles > 0 {
                return Err(CacheError::store_busy(name));
            }
            state.databases.remove(name);
        }
        // Deleting a store that never existed succeeds, as with the real
        // engines this models.
        Ok(())
    }
}
