//! Placeholder fill and strip layers.
//!
//! Calendar series with non-trading days (weekends, holidays) would
//! otherwise always analyze as gappy. The write-side layer densifies a
//! batch by synthesizing placeholder records for absent days, so the gap
//! walk underneath sees a contiguous series; the read-side layer strips
//! those placeholders again, so callers never observe synthetic filler.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use tickcache_core::{
    CacheError, CacheStatus, DateRange, GetCacheStatus, PutLayer, PutRequest, PutTickerData,
    SeriesKey, StatusLayer, TickerRecord,
};
use tracing::debug;

/// Write-side layer on the "put" operation: one record per calendar day,
/// strictly ascending, before the batch reaches the store.
///
/// Batches with zero or one record pass through unmodified, since there is
/// nothing to fill between. The layer operates per series; a multi-series
/// batch must be split before reaching it.
pub struct PlaceholderFill;

impl PutLayer for PlaceholderFill {
    fn wrap(self: Box<Self>, next: Arc<dyn PutTickerData>) -> Arc<dyn PutTickerData> {
        Arc::new(FillHandler { next })
    }

    fn name(&self) -> &'static str {
        "PlaceholderFill"
    }
}

struct FillHandler {
    next: Arc<dyn PutTickerData>,
}

#[async_trait]
impl PutTickerData for FillHandler {
    async fn put_ticker_data(&self, req: PutRequest) -> Result<Vec<SeriesKey>, CacheError> {
        if req.records.len() <= 1 {
            return self.next.put_ticker_data(req).await;
        }

        let PutRequest {
            mut records,
            fill_range,
        } = req;

        let ticker = records[0].ticker.clone();
        if let Some(odd) = records.iter().find(|r| r.ticker != ticker) {
            return Err(CacheError::MixedSeriesId {
                first: ticker,
                second: odd.ticker.clone(),
            });
        }

        records.sort_by_key(|r| r.date);
        let span = match fill_range {
            Some(range) => range,
            // Sorted and non-empty, so min/max cannot invert.
            None => DateRange::new(records[0].date, records[records.len() - 1].date)?,
        };

        let filled = interleave(&ticker, span, records)?;
        debug!(ticker = %ticker, total = filled.len(), "densified put batch");

        self.next
            .put_ticker_data(PutRequest::with_range(filled, span))
            .await
    }
}

/// Walk the span day by day, emitting the next real record when the cursor
/// reaches its date and a placeholder otherwise.
fn interleave(
    ticker: &str,
    span: DateRange,
    records: Vec<TickerRecord>,
) -> Result<Vec<TickerRecord>, CacheError> {
    let mut filled: Vec<TickerRecord> = Vec::with_capacity(span.days() as usize);
    let mut cursor: NaiveDate = span.start();

    for record in records {
        if record.date < cursor {
            // Unreachable after the pre-sort unless the batch duplicates a
            // date or escapes an explicit span; surfaced, never corrected.
            return Err(CacheError::UnsortedInput {
                date: record.date,
                cursor,
            });
        }
        while cursor < record.date {
            filled.push(TickerRecord::placeholder(ticker, cursor));
            cursor += Duration::days(1);
        }
        filled.push(record);
        cursor += Duration::days(1);
    }
    while cursor <= span.end() {
        filled.push(TickerRecord::placeholder(ticker, cursor));
        cursor += Duration::days(1);
    }

    Ok(filled)
}

/// Read-side layer on the "status" operation: drops placeholder records
/// from `cache_data` after delegation.
///
/// Availability and gap list are left untouched; the analyzer already ran
/// over the densified series.
pub struct PlaceholderStrip;

impl StatusLayer for PlaceholderStrip {
    fn wrap(self: Box<Self>, next: Arc<dyn GetCacheStatus>) -> Arc<dyn GetCacheStatus> {
        Arc::new(StripHandler { next })
    }

    fn name(&self) -> &'static str {
        "PlaceholderStrip"
    }
}

struct StripHandler {
    next: Arc<dyn GetCacheStatus>,
}

#[async_trait]
impl GetCacheStatus for StripHandler {
    async fn cache_status(
        &self,
        ticker: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<CacheStatus, CacheError> {
        let mut status = self.next.cache_status(ticker, from, to).await?;
        let before = status.cache_data.len();
        status.cache_data.retain(|r| !r.is_placeholder());
        if status.cache_data.len() < before {
            debug!(
                ticker = %ticker,
                stripped = before - status.cache_data.len(),
                "stripped placeholder records"
            );
        }
        Ok(status)
    }
}
