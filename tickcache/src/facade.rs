//! The cache facade: composed operations over a keyed store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tickcache_core::store::KeyedStore;
use tickcache_core::{
    CacheConfig, CacheError, CacheStatus, DateRange, GetCacheStatus, PutRequest, PutTickerData,
    SeriesKey, TickerRecord, analyze,
};

use crate::builder::CacheBuilder;

/// Base "put" handler: delegates the batch straight to the store.
pub(crate) struct StorePut {
    pub(crate) store: Arc<dyn KeyedStore>,
}

#[async_trait]
impl PutTickerData for StorePut {
    async fn put_ticker_data(&self, req: PutRequest) -> Result<Vec<SeriesKey>, CacheError> {
        self.store.put(req.records).await
    }
}

/// Base "status" handler: bounded scan, then gap analysis.
pub(crate) struct StoreStatus {
    pub(crate) store: Arc<dyn KeyedStore>,
}

#[async_trait]
impl GetCacheStatus for StoreStatus {
    async fn cache_status(
        &self,
        ticker: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<CacheStatus, CacheError> {
        // Validate the range before touching the store.
        let range = DateRange::new(from, to)?;
        let records = self.store.scan(ticker, range).await?;
        analyze(ticker, from, to, records)
    }
}

/// Gap-aware time-series cache over an abstract keyed store.
///
/// A facade is a value: it holds `Arc`s to the store and to the composed
/// operation handlers, so cloning is cheap and a clone behaves identically
/// to the original. No shared mutable closure state is involved.
#[derive(Clone)]
pub struct TickerCache {
    pub(crate) store: Arc<dyn KeyedStore>,
    pub(crate) config: CacheConfig,
    pub(crate) put: Arc<dyn PutTickerData>,
    pub(crate) status: Arc<dyn GetCacheStatus>,
}

impl TickerCache {
    /// Start building a facade over `store`.
    #[must_use]
    pub fn builder(store: Arc<dyn KeyedStore>) -> CacheBuilder {
        CacheBuilder::new(store)
    }

    /// Write a batch through the composed "put" chain.
    ///
    /// `fill_range` is the explicit span the write covers; fill-style
    /// layers derive it from the batch when omitted.
    ///
    /// # Errors
    /// Propagates any layer or store failure unmodified.
    pub async fn put_ticker_data(
        &self,
        records: Vec<TickerRecord>,
        fill_range: Option<DateRange>,
    ) -> Result<Vec<SeriesKey>, CacheError> {
        let req = match fill_range {
            Some(range) => PutRequest::with_range(records, range),
            None => PutRequest::new(records),
        };
        self.put.put_ticker_data(req).await
    }

    /// Report how much of `[from, to]` is cached for `ticker`, through the
    /// composed "status" chain.
    ///
    /// # Errors
    /// Fails with [`CacheError::InvalidRange`] when `from > to`, before
    /// the store is consulted.
    pub async fn get_cached_ticker_data(
        &self,
        ticker: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<CacheStatus, CacheError> {
        self.status.cache_status(ticker, from, to).await
    }

    /// Release the facade's store connection.
    ///
    /// # Errors
    /// Propagates store failures.
    pub async fn close(&self) -> Result<(), CacheError> {
        self.store.close().await
    }

    /// Destroy the backing store entirely.
    ///
    /// # Errors
    /// Fails with [`CacheError::StoreBusy`] while another connection is
    /// open.
    pub async fn delete_all(&self) -> Result<(), CacheError> {
        self.store.delete_all().await
    }

    /// Start a builder seeded with this facade's already-composed
    /// handlers, so further layers stack around the existing ones.
    ///
    /// Composition is open; avoiding unwanted double-wrapping is the
    /// caller's responsibility. Build a fresh facade instead of
    /// rewrapping when stacking is not intended.
    #[must_use]
    pub fn rewrap(&self) -> CacheBuilder {
        CacheBuilder::rewrapping(self)
    }

    /// The configuration this facade was built with.
    ///
    /// Metadata only; storage behavior is governed by the configuration
    /// the backing store was constructed with.
    #[must_use]
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }
}
