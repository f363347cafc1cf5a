use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;
use tickcache::{CacheAvailability, CacheError, CacheStatus, TickerCache, TickerRecord};
use tickcache_core::{GetCacheStatus, StatusLayer};
use tickcache_memory::{MemoryEngine, MemoryStore};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y%m%d").unwrap()
}

fn rec(ticker: &str, date: &str) -> TickerRecord {
    TickerRecord::new(ticker, day(date), json!({ "close": 1.0 }))
}

/// Status layer that counts how many calls pass through it.
struct CountingStatus {
    hits: Arc<AtomicUsize>,
}

struct CountingHandler {
    hits: Arc<AtomicUsize>,
    next: Arc<dyn GetCacheStatus>,
}

impl StatusLayer for CountingStatus {
    fn wrap(self: Box<Self>, next: Arc<dyn GetCacheStatus>) -> Arc<dyn GetCacheStatus> {
        Arc::new(CountingHandler {
            hits: self.hits,
            next,
        })
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

#[async_trait]
impl GetCacheStatus for CountingHandler {
    async fn cache_status(
        &self,
        ticker: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<CacheStatus, CacheError> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        self.next.cache_status(ticker, from, to).await
    }
}

#[tokio::test]
async fn clones_answer_queries_identically() {
    let store = Arc::new(MemoryStore::new(MemoryEngine::new(), Default::default()));
    let cache = TickerCache::builder(store).build();
    cache
        .put_ticker_data(vec![rec("MSFT", "20170106"), rec("MSFT", "20170108")], None)
        .await
        .unwrap();

    let twin = cache.clone();
    let a = cache
        .get_cached_ticker_data("MSFT", day("20170106"), day("20170108"))
        .await
        .unwrap();
    let b = twin
        .get_cached_ticker_data("MSFT", day("20170106"), day("20170108"))
        .await
        .unwrap();

    assert_eq!(a, b);
    assert_eq!(a.availability, CacheAvailability::Partial);
}

#[tokio::test]
async fn rewrap_stacks_layers_around_existing_ones() {
    let store = Arc::new(MemoryStore::new(MemoryEngine::new(), Default::default()));
    let inner_hits = Arc::new(AtomicUsize::new(0));
    let cache = TickerCache::builder(store)
        .status_layer(Box::new(CountingStatus {
            hits: Arc::clone(&inner_hits),
        }))
        .build();

    let outer_hits = Arc::new(AtomicUsize::new(0));
    let wrapped = cache
        .rewrap()
        .status_layer(Box::new(CountingStatus {
            hits: Arc::clone(&outer_hits),
        }))
        .build();

    wrapped
        .get_cached_ticker_data("X", day("20170101"), day("20170102"))
        .await
        .unwrap();

    // Both the new outer layer and the original inner layer saw the call.
    assert_eq!(outer_hits.load(Ordering::SeqCst), 1);
    assert_eq!(inner_hits.load(Ordering::SeqCst), 1);

    // The original facade keeps its shorter chain.
    cache
        .get_cached_ticker_data("X", day("20170101"), day("20170102"))
        .await
        .unwrap();
    assert_eq!(outer_hits.load(Ordering::SeqCst), 1);
    assert_eq!(inner_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn builder_config_is_facade_metadata_not_storage_behavior() {
    use tickcache_core::store::KeyedStore;

    let engine = MemoryEngine::new();
    let store = Arc::new(MemoryStore::new(
        Arc::clone(&engine),
        Default::default(),
    ));
    let config = tickcache::CacheConfig {
        store_name: "altCache".to_owned(),
        index_name: "tickerDate".to_owned(),
        date_format: "%Y-%m-%d".to_owned(),
    };
    let cache = TickerCache::builder(store).config(config.clone()).build();

    assert_eq!(cache.config(), &config);

    // Storage stays governed by the store's own construction-time config:
    // writes land in the default-named database, not "altCache".
    cache
        .put_ticker_data(vec![rec("MSFT", "20170106")], None)
        .await
        .unwrap();

    let default_probe = MemoryStore::new(Arc::clone(&engine), Default::default());
    default_probe.connect_existing().await.unwrap();

    let alt_probe = MemoryStore::new(engine, config.clone());
    let err = alt_probe.connect_existing().await.unwrap_err();
    assert!(matches!(err, CacheError::StoreNotFound { .. }));
}
