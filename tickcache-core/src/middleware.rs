//! Operation-layer traits and composition for cache facades.
//!
//! Each named cache operation has a handler trait; layers wrap a handler
//! and return a replacement with the same signature. Composition applies a
//! layer list so that the first-registered layer is the outermost wrapper:
//! it sees the call first and the result last. A failing layer
//! short-circuits by returning the error instead of invoking its `next`
//! handler.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::CacheError;
use crate::types::{CacheStatus, DateRange, SeriesKey, TickerRecord};

/// Arguments of the "put" operation.
#[derive(Debug, Clone)]
pub struct PutRequest {
    /// Records to write, one series per batch for per-series layers.
    pub records: Vec<TickerRecord>,
    /// Explicit span the write is meant to cover. When absent, fill-style
    /// layers derive the span from the batch's min/max date.
    pub fill_range: Option<DateRange>,
}

impl PutRequest {
    /// Build a request covering exactly the days of the supplied records.
    #[must_use]
    pub const fn new(records: Vec<TickerRecord>) -> Self {
        Self {
            records,
            fill_range: None,
        }
    }

    /// Build a request with an explicit fill span.
    #[must_use]
    pub const fn with_range(records: Vec<TickerRecord>, fill_range: DateRange) -> Self {
        Self {
            records,
            fill_range: Some(fill_range),
        }
    }
}

/// Handler for the "put" operation.
#[async_trait]
pub trait PutTickerData: Send + Sync {
    /// Write a batch, returning the keys actually written, sorted
    /// ascending by rendered storage key.
    async fn put_ticker_data(&self, req: PutRequest) -> Result<Vec<SeriesKey>, CacheError>;
}

/// Handler for the "status" operation.
#[async_trait]
pub trait GetCacheStatus: Send + Sync {
    /// Report how much of `[from, to]` is cached for `ticker` and what is
    /// missing.
    async fn cache_status(
        &self,
        ticker: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<CacheStatus, CacheError>;
}

/// Layer on the "put" operation.
///
/// A layer consumes itself and the next handler (either the next layer
/// inward or the base operation) and returns the replacement handler.
pub trait PutLayer: Send + Sync {
    /// Wrap the next handler.
    fn wrap(self: Box<Self>, next: Arc<dyn PutTickerData>) -> Arc<dyn PutTickerData>;

    /// Human-readable layer name for introspection/logging.
    fn name(&self) -> &'static str;
}

/// Layer on the "status" operation.
pub trait StatusLayer: Send + Sync {
    /// Wrap the next handler.
    fn wrap(self: Box<Self>, next: Arc<dyn GetCacheStatus>) -> Arc<dyn GetCacheStatus>;

    /// Human-readable layer name for introspection/logging.
    fn name(&self) -> &'static str;
}

/// Compose "put" layers around a base handler.
///
/// `layers` is in registration order; application is reversed so that
/// `layers[0]` becomes the outermost wrapper. An empty list returns the
/// base handler unchanged. Composition is open: the result can itself be
/// used as the base of a further composition, and avoiding unwanted
/// stacking is the caller's responsibility.
#[must_use]
pub fn compose_put(
    base: Arc<dyn PutTickerData>,
    layers: Vec<Box<dyn PutLayer>>,
) -> Arc<dyn PutTickerData> {
    let mut acc = base;
    for layer in layers.into_iter().rev() {
        acc = layer.wrap(acc);
    }
    acc
}

/// Compose "status" layers around a base handler.
///
/// Same ordering convention as [`compose_put`].
#[must_use]
pub fn compose_status(
    base: Arc<dyn GetCacheStatus>,
    layers: Vec<Box<dyn StatusLayer>>,
) -> Arc<dyn GetCacheStatus> {
    let mut acc = base;
    for layer in layers.into_iter().rev() {
        acc = layer.wrap(acc);
    }
    acc
}
