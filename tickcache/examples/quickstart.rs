//! Minimal end-to-end run: write a sparse week with placeholder fill,
//! then ask the cache what it holds.
//!
//! ```bash
//! cargo run -p tickcache --example quickstart
//! ```

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use tickcache::{TickerCache, TickerRecord};
use tickcache_memory::{MemoryEngine, MemoryStore};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y%m%d").expect("valid date literal")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let store = Arc::new(MemoryStore::new(MemoryEngine::new(), Default::default()));
    let cache = TickerCache::builder(store)
        .with_placeholder_fill()
        .build();

    // Two trading days; the fill layer densifies the span in between.
    let span = tickcache::DateRange::new(day("20170104"), day("20170108"))?;
    let keys = cache
        .put_ticker_data(
            vec![
                TickerRecord::new("GOOG", day("20170104"), json!({ "close": 808.01 })),
                TickerRecord::new("GOOG", day("20170108"), json!({ "close": 811.77 })),
            ],
            Some(span),
        )
        .await?;
    println!("wrote {} keys", keys.len());

    let status = cache
        .get_cached_ticker_data("GOOG", day("20170104"), day("20170110"))
        .await?;
    println!("availability: {:?}", status.availability);
    println!("records returned: {}", status.cache_data.len());
    for gap in &status.date_gaps {
        let (from, to) = gap.format("%Y%m%d");
        println!("missing: {from}..={to}");
    }

    cache.close().await?;
    Ok(())
}
