//! `KeyedStore` implementation over the in-process engine.

use std::sync::Arc;

use async_trait::async_trait;
use tickcache_core::store::KeyedStore;
use tickcache_core::{CacheConfig, CacheError, DateRange, SeriesKey, TickerRecord};
use tracing::debug;

use crate::engine::MemoryEngine;

/// Store handle over a shared [`MemoryEngine`].
///
/// The handle owns its connection state explicitly: the first operation
/// opens the connection, and concurrent first operations coalesce behind
/// one async lock so only a single open attempt reaches the engine. A
/// handle is one logical connection; cloning the engine `Arc` into further
/// handles models further connections.
pub struct MemoryStore {
    engine: Arc<MemoryEngine>,
    config: CacheConfig,
    conn: tokio::sync::Mutex<ConnectionState>,
}

#[derive(Default)]
struct ConnectionState {
    opened: bool,
}

impl MemoryStore {
    /// Create a handle against `engine` with the given configuration.
    #[must_use]
    pub fn new(engine: Arc<MemoryEngine>, config: CacheConfig) -> Self {
        Self {
            engine,
            config,
            conn: tokio::sync::Mutex::new(ConnectionState::default()),
        }
    }

    /// The configuration this handle was built with.
    #[must_use]
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Lazily establish the connection, creating the store if absent.
    /// Holding the connection lock across the open attempt is what makes
    /// concurrent initializers coalesce.
    async fn ensure_open(&self) -> Result<(), CacheError> {
        let mut conn = self.conn.lock().await;
        if !conn.opened {
            self.engine.acquire(&self.config.store_name, true)?;
            conn.opened = true;
            debug!(store = %self.config.store_name, "opened store connection");
        }
        Ok(())
    }
}

#[async_trait]
impl KeyedStore for MemoryStore {
    async fn open(&self) -> Result<(), CacheError> {
        self.ensure_open().await
    }

    async fn connect_existing(&self) -> Result<(), CacheError> {
        // Probe connection: verify existence without creating, release
        // immediately so the probe never blocks deletion.
        self.engine.acquire(&self.config.store_name, false)?;
        self.engine.release(&self.config.store_name);
        Ok(())
    }

    async fn put(&self, records: Vec<TickerRecord>) -> Result<Vec<SeriesKey>, CacheError> {
        self.ensure_open().await?;

        let written = records.len();
        let writes = records.into_iter().map(|record| {
            let engine = Arc::clone(&self.engine);
            let name = self.config.store_name.clone();
            let fmt = self.config.date_format.clone();
            async move { engine.write(&name, record, &fmt) }
        });
        let mut keys = futures::future::try_join_all(writes).await?;

        keys.sort_by_cached_key(|k| k.storage_key(&self.config.date_format));
        debug!(store = %self.config.store_name, written, "committed put batch");
        Ok(keys)
    }

    async fn scan(
        &self,
        ticker: &str,
        range: DateRange,
    ) -> Result<Vec<TickerRecord>, CacheError> {
        self.ensure_open().await?;
        self.engine.scan(&self.config.store_name, ticker, range)
    }

    async fn close(&self) -> Result<(), CacheError> {
        let mut conn = self.conn.lock().await;
        if conn.opened {
            self.engine.release(&self.config.store_name);
            conn.opened = false;
            debug!(store = %self.config.store_name, "closed store connection");
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), CacheError> {
        // Quiesce this handle's own connection first; other handles still
        // block deletion.
        let mut conn = self.conn.lock().await;
        if conn.opened {
            self.engine.release(&self.config.store_name);
            conn.opened = false;
        }
        self.engine.delete(&self.config.store_name)?;
        debug!(store = %self.config.store_name, "deleted store");
        Ok(())
    }
}
