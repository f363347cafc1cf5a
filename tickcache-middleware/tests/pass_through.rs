use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;
use tickcache_core::{
    CacheError, PutRequest, PutTickerData, SeriesKey, TickerRecord, compose_put,
};
use tickcache_middleware::PlaceholderFill;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y%m%d").unwrap()
}

fn rec(ticker: &str, date: &str) -> TickerRecord {
    TickerRecord::new(ticker, day(date), json!({ "close": 1.0 }))
}

/// Base handler that records every batch it receives.
struct RecordingPut {
    batches: Mutex<Vec<Vec<TickerRecord>>>,
}

impl RecordingPut {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            batches: Mutex::new(Vec::new()),
        })
    }

    fn received(&self) -> Vec<Vec<TickerRecord>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl PutTickerData for RecordingPut {
    async fn put_ticker_data(&self, req: PutRequest) -> Result<Vec<SeriesKey>, CacheError> {
        let keys = req.records.iter().map(TickerRecord::key).collect();
        self.batches.lock().unwrap().push(req.records);
        Ok(keys)
    }
}

#[tokio::test]
async fn zero_layers_yield_the_base_operation_unchanged() {
    let base = RecordingPut::new();
    let handler = compose_put(base.clone(), Vec::new());

    let batch = vec![rec("MSFT", "20170106"), rec("MSFT", "20170108")];
    let keys = handler
        .put_ticker_data(PutRequest::new(batch.clone()))
        .await
        .unwrap();

    assert_eq!(keys.len(), 2);
    assert_eq!(base.received(), vec![batch]);
}

#[tokio::test]
async fn empty_batch_passes_through_the_fill_layer_untouched() {
    let base = RecordingPut::new();
    let handler = compose_put(base.clone(), vec![Box::new(PlaceholderFill)]);

    handler
        .put_ticker_data(PutRequest::new(Vec::new()))
        .await
        .unwrap();

    assert_eq!(base.received(), vec![Vec::new()]);
}

#[tokio::test]
async fn single_record_batch_passes_through_the_fill_layer_untouched() {
    let base = RecordingPut::new();
    let handler = compose_put(base.clone(), vec![Box::new(PlaceholderFill)]);

    let batch = vec![rec("MSFT", "20170106")];
    handler
        .put_ticker_data(PutRequest::new(batch.clone()))
        .await
        .unwrap();

    assert_eq!(base.received(), vec![batch]);
}
