//! The abstract ordered keyed-store capability.
//!
//! The concrete persistence technology is not part of this contract; any
//! backend that can maintain a unique (ticker, date) index with ordered
//! range scans is substitutable. All operations are asynchronous and must
//! be safely callable concurrently from multiple logical callers.

use async_trait::async_trait;

use crate::error::CacheError;
use crate::types::{DateRange, SeriesKey, TickerRecord};

/// Durable mapping from (ticker, date) to an opaque record with ordered
/// range scans.
///
/// Connection lifecycle: the one logical connection is established lazily
/// and exactly once per store handle; concurrent initializers coalesce into
/// a single open attempt. There is no cancellation or timeout contract at
/// this layer; callers impose timeouts externally.
#[async_trait]
pub trait KeyedStore: Send + Sync {
    /// Idempotently establish the connection, creating the store and its
    /// (ticker, date) index if absent.
    ///
    /// # Errors
    /// Fails with [`CacheError::StoreUnavailable`] when the host
    /// environment lacks persistent-storage capability.
    async fn open(&self) -> Result<(), CacheError>;

    /// Connect only if the store already exists; never creates.
    ///
    /// Used to verify teardown in tests.
    ///
    /// # Errors
    /// Fails with [`CacheError::StoreNotFound`] when the store has never
    /// been created.
    async fn connect_existing(&self) -> Result<(), CacheError>;

    /// Write or overwrite each record under its derived key.
    ///
    /// The batch is fanned out as independent per-key writes and joined:
    /// it succeeds only if every write succeeds. Writes already committed
    /// for other keys are not rolled back on failure.
    ///
    /// Returns the keys actually written, sorted ascending by their
    /// rendered storage key.
    ///
    /// # Errors
    /// Fails with [`CacheError::KeyWrite`] naming the first offending key.
    async fn put(&self, records: Vec<TickerRecord>) -> Result<Vec<SeriesKey>, CacheError>;

    /// Inclusive bounded range scan on the (ticker, date) ordering.
    ///
    /// Returns records ascending by date. An empty result is valid, not an
    /// error. Scans may run concurrently with writes; no isolation beyond
    /// last-write-wins is guaranteed.
    async fn scan(
        &self,
        ticker: &str,
        range: DateRange,
    ) -> Result<Vec<TickerRecord>, CacheError>;

    /// Release this handle's connection. Idempotent.
    async fn close(&self) -> Result<(), CacheError>;

    /// Destroy the entire store.
    ///
    /// This handle's own connection is quiesced first.
    ///
    /// # Errors
    /// Fails with [`CacheError::StoreBusy`] when another open connection
    /// blocks deletion.
    async fn delete_all(&self) -> Result<(), CacheError>;
}
