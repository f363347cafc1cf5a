use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use tickcache_core::store::KeyedStore;
use tickcache_core::{CacheConfig, CacheError, DateRange, TickerRecord};
use tickcache_memory::{FAILING_TICKER, MemoryEngine, MemoryStore};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y%m%d").unwrap()
}

fn rec(ticker: &str, date: &str, close: f64) -> TickerRecord {
    TickerRecord::new(ticker, day(date), json!({ "close": close }))
}

fn range(from: &str, to: &str) -> DateRange {
    DateRange::new(day(from), day(to)).unwrap()
}

fn store(engine: &Arc<MemoryEngine>) -> MemoryStore {
    MemoryStore::new(Arc::clone(engine), CacheConfig::default())
}

#[tokio::test]
async fn put_returns_keys_sorted_by_storage_key() {
    let engine = MemoryEngine::new();
    let s = store(&engine);

    let batch = vec![
        rec("MSFT", "20170106", 100.0),
        rec("AMZN", "20170113", 12.0),
        rec("AMZN", "20170109", 9999.0),
        rec("GOOG", "20170101", 100.0),
    ];
    let keys = s.put(batch).await.unwrap();

    let rendered: Vec<String> = keys.iter().map(|k| k.storage_key("%Y%m%d")).collect();
    assert_eq!(
        rendered,
        vec!["AMZN20170109", "AMZN20170113", "GOOG20170101", "MSFT20170106"]
    );
}

#[tokio::test]
async fn scan_is_inclusive_bounded_and_ascending() {
    let engine = MemoryEngine::new();
    let s = store(&engine);

    s.put(vec![
        rec("AMZN", "20170113", 12.0),
        rec("AMZN", "20170109", 9999.0),
        rec("AMZN", "20170112", 456.0),
        rec("MSFT", "20170110", 1.0),
    ])
    .await
    .unwrap();

    let rows = s.scan("AMZN", range("20170109", "20170113")).await.unwrap();
    let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![day("20170109"), day("20170112"), day("20170113")]);
    assert!(rows.iter().all(|r| r.ticker == "AMZN"));
}

#[tokio::test]
async fn scan_of_unknown_ticker_is_empty_not_an_error() {
    let engine = MemoryEngine::new();
    let s = store(&engine);
    s.put(vec![rec("MSFT", "20170110", 1.0)]).await.unwrap();

    let rows = s.scan("TSLA", range("20170101", "20171231")).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn same_key_put_overwrites_last_write_wins() {
    let engine = MemoryEngine::new();
    let s = store(&engine);

    s.put(vec![rec("MSFT", "20170106", 100.0)]).await.unwrap();
    s.put(vec![rec("MSFT", "20170106", 551.0)]).await.unwrap();

    let rows = s.scan("MSFT", range("20170106", "20170106")).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].payload, json!({ "close": 551.0 }));
}

#[tokio::test]
async fn connect_existing_never_creates() {
    let engine = MemoryEngine::new();
    let s = store(&engine);

    let err = s.connect_existing().await.unwrap_err();
    assert!(matches!(err, CacheError::StoreNotFound { .. }));
    assert_eq!(engine.database_count(), 0);

    s.open().await.unwrap();
    s.connect_existing().await.unwrap();
}

#[tokio::test]
async fn delete_is_blocked_by_other_open_handles() {
    let engine = MemoryEngine::new();
    let first = store(&engine);
    let second = store(&engine);

    first.open().await.unwrap();
    second.open().await.unwrap();

    // The deleting handle quiesces itself, but the second handle still
    // holds a connection.
    let err = first.delete_all().await.unwrap_err();
    assert!(matches!(err, CacheError::StoreBusy { .. }));

    second.close().await.unwrap();
    first.delete_all().await.unwrap();

    let err = first.connect_existing().await.unwrap_err();
    assert!(matches!(err, CacheError::StoreNotFound { .. }));
}

#[tokio::test]
async fn unavailable_engine_rejects_every_operation() {
    let engine = MemoryEngine::unavailable();
    let s = store(&engine);

    let err = s.open().await.unwrap_err();
    assert!(matches!(err, CacheError::StoreUnavailable { .. }));

    let err = s.put(vec![rec("MSFT", "20170106", 1.0)]).await.unwrap_err();
    assert!(matches!(err, CacheError::StoreUnavailable { .. }));
}

#[tokio::test]
async fn failing_key_surfaces_without_rolling_back_siblings() {
    let engine = MemoryEngine::new();
    let s = store(&engine);

    let err = s
        .put(vec![
            rec("MSFT", "20170106", 1.0),
            rec(FAILING_TICKER, "20170106", 1.0),
        ])
        .await
        .unwrap_err();

    match err {
        CacheError::KeyWrite { key, .. } => assert_eq!(key, "FAIL20170106"),
        other => panic!("expected KeyWrite, got {other}"),
    }

    // The sibling key stays committed; the batch is reported, not rolled
    // back.
    let rows = s.scan("MSFT", range("20170106", "20170106")).await.unwrap();
    assert_eq!(rows.len(), 1);
}
