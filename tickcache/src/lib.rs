//! tickcache answers, for a series and a date range, "how much of this
//! range do I already have, and what is missing?"
//!
//! Overview
//! - Stores one opaque record per (ticker, calendar day) in any backend
//!   implementing the `tickcache_core::KeyedStore` contract.
//! - Queries return cached rows plus a precise, positionally ordered list
//!   of missing sub-ranges, so a caller fetches only what it lacks.
//! - Named operations ("put", "status") can be wrapped by ordered layers;
//!   the standard placeholder pair densifies non-trading days on write and
//!   strips the synthetic filler on read.
//!
//! Examples
//! Building a facade over the in-memory backend:
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickcache::TickerCache;
//! use tickcache_memory::{MemoryEngine, MemoryStore};
//!
//! let engine = MemoryEngine::new();
//! let store = Arc::new(MemoryStore::new(engine, Default::default()));
//! let cache = TickerCache::builder(store)
//!     .with_placeholder_fill()
//!     .build();
//! ```
//!
//! Writing a sparse week and asking what is cached:
//! ```rust,ignore
//! use tickcache_core::{DateRange, parse_day};
//!
//! let span = DateRange::new(parse_day("20170104", "%Y%m%d")?, parse_day("20170108", "%Y%m%d")?)?;
//! cache.put_ticker_data(records, Some(span)).await?;
//! let status = cache
//!     .get_cached_ticker_data("GOOG", span.start(), span.end())
//!     .await?;
//! assert!(status.date_gaps.is_empty());
//! ```
#![warn(missing_docs)]

mod builder;
mod facade;

pub use builder::CacheBuilder;
pub use facade::TickerCache;

pub use tickcache_core::{
    CacheAvailability, CacheConfig, CacheError, CacheStatus, DateGap, DateRange, SeriesKey,
    TickerRecord,
};
