//! tickcache-core
//!
//! Core types, traits, and algorithms shared across the tickcache
//! ecosystem.
//!
//! - `types`: the data model (records, keys, ranges, gaps, status, config).
//! - `error`: the unified `CacheError` taxonomy.
//! - `store`: the abstract ordered `KeyedStore` capability.
//! - `analyzer`: the pure range-gap analysis algorithm.
//! - `middleware`: operation handler traits, layer traits, and their
//!   composition routines.
//!
//! Async runtime (Tokio)
//! ---------------------
//! This crate assumes the Tokio ecosystem as the async runtime. The
//! `KeyedStore` trait and operation handlers are `async_trait` contracts
//! expected to run under a Tokio 1.x runtime.
#![warn(missing_docs)]

/// Pure gap analysis over sorted record sequences.
pub mod analyzer;
/// Unified error taxonomy.
pub mod error;
/// Operation handlers, layers, and composition.
pub mod middleware;
/// The abstract ordered keyed-store capability.
pub mod store;
/// The shared data model.
pub mod types;

pub use analyzer::analyze;
pub use error::CacheError;
pub use middleware::{
    GetCacheStatus, PutLayer, PutRequest, PutTickerData, StatusLayer, compose_put,
    compose_status,
};
pub use store::KeyedStore;
pub use types::*;
