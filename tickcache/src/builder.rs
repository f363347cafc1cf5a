//! Builder for composing a cache facade with operation layers.
//!
//! # Layer Ordering Convention
//!
//! Layers form an "onion" around the base operation:
//!
//! ```text
//! Caller
//!     ↓
//! First-registered layer (sees the call first, the result last)
//!     ↓
//! Later layers
//!     ↓
//! Base operation (store put / scan + analyze)
//! ```
//!
//! The layer lists are stored in registration order and applied in reverse
//! during [`CacheBuilder::build`], so `layers[0]` becomes the outermost
//! wrapper. Registering zero layers yields the base operation unchanged.

use std::sync::Arc;

use tickcache_core::store::KeyedStore;
use tickcache_core::{
    CacheConfig, GetCacheStatus, PutLayer, PutTickerData, StatusLayer, compose_put,
    compose_status,
};
use tickcache_middleware::{PlaceholderFill, PlaceholderStrip};

use crate::facade::{StorePut, StoreStatus, TickerCache};

/// Builder for [`TickerCache`].
pub struct CacheBuilder {
    store: Arc<dyn KeyedStore>,
    config: CacheConfig,
    base_put: Option<Arc<dyn PutTickerData>>,
    base_status: Option<Arc<dyn GetCacheStatus>>,
    /// "put" layers in registration order (outermost first).
    put_layers: Vec<Box<dyn PutLayer>>,
    /// "status" layers in registration order (outermost first).
    status_layers: Vec<Box<dyn StatusLayer>>,
}

impl CacheBuilder {
    /// Create a builder over a raw store with default configuration.
    #[must_use]
    pub fn new(store: Arc<dyn KeyedStore>) -> Self {
        Self {
            store,
            config: CacheConfig::default(),
            base_put: None,
            base_status: None,
            put_layers: Vec::new(),
            status_layers: Vec::new(),
        }
    }

    /// Internal: seed a builder with an existing facade's composed
    /// handlers so further layers stack around them.
    pub(crate) fn rewrapping(facade: &TickerCache) -> Self {
        Self {
            store: Arc::clone(&facade.store),
            config: facade.config.clone(),
            base_put: Some(Arc::clone(&facade.put)),
            base_status: Some(Arc::clone(&facade.status)),
            put_layers: Vec::new(),
            status_layers: Vec::new(),
        }
    }

    /// Replace the configuration the facade reports.
    ///
    /// This is facade metadata only: the backing store keeps the
    /// configuration it was constructed with, so the store must be built
    /// with the same `CacheConfig` or the two will diverge.
    #[must_use]
    pub fn config(mut self, config: CacheConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a layer on the "put" operation. The first-registered
    /// layer is the outermost wrapper.
    #[must_use]
    pub fn put_layer(mut self, layer: Box<dyn PutLayer>) -> Self {
        self.put_layers.push(layer);
        self
    }

    /// Register a layer on the "status" operation. The first-registered
    /// layer is the outermost wrapper.
    #[must_use]
    pub fn status_layer(mut self, layer: Box<dyn StatusLayer>) -> Self {
        self.status_layers.push(layer);
        self
    }

    /// Install the standard placeholder pair: fill on "put", strip on
    /// "status".
    #[must_use]
    pub fn with_placeholder_fill(self) -> Self {
        self.put_layer(Box::new(PlaceholderFill))
            .status_layer(Box::new(PlaceholderStrip))
    }

    /// Compose the registered layers around the base operations and
    /// produce the facade.
    #[must_use]
    pub fn build(self) -> TickerCache {
        let base_put = self.base_put.unwrap_or_else(|| {
            Arc::new(StorePut {
                store: Arc::clone(&self.store),
            })
        });
        let base_status = self.base_status.unwrap_or_else(|| {
            Arc::new(StoreStatus {
                store: Arc::clone(&self.store),
            })
        });

        TickerCache {
            store: self.store,
            config: self.config,
            put: compose_put(base_put, self.put_layers),
            status: compose_status(base_status, self.status_layers),
        }
    }
}
