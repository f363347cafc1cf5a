//! Data model shared across the tickcache workspace.
//!
//! Records are keyed by (ticker, calendar day). All comparisons are by
//! calendar day; the configured date format only governs how days are
//! rendered and parsed at the boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// One cached row for a series: identity fields plus an opaque payload.
///
/// The core never interprets `payload`. A `serde_json::Value::Null` payload
/// is reserved as the placeholder sentinel marking a calendar day that was
/// explicitly written as absent; real data must carry a non-null payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerRecord {
    /// Series identifier, e.g. `"GOOG"`.
    pub ticker: String,
    /// Calendar day this row covers.
    pub date: NaiveDate,
    /// Opaque domain payload (prices, volume, anything serializable).
    pub payload: serde_json::Value,
}

impl TickerRecord {
    /// Build a record with a domain payload.
    pub fn new(
        ticker: impl Into<String>,
        date: NaiveDate,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            date,
            payload,
        }
    }

    /// Build a placeholder record marking `date` as explicitly absent.
    pub fn placeholder(ticker: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            ticker: ticker.into(),
            date,
            payload: serde_json::Value::Null,
        }
    }

    /// Whether this record carries the placeholder sentinel payload.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.payload.is_null()
    }

    /// Derive the composite key this record is stored under.
    #[must_use]
    pub fn key(&self) -> SeriesKey {
        SeriesKey {
            ticker: self.ticker.clone(),
            date: self.date,
        }
    }
}

/// Composite identity of one record: series identifier plus calendar day.
///
/// Total order is ticker first, then date ascending, matching the store's
/// scan order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    /// Series identifier.
    pub ticker: String,
    /// Calendar day.
    pub date: NaiveDate,
}

impl SeriesKey {
    /// Render the flat storage key: the ticker concatenated with the
    /// formatted date. Collisions overwrite rather than error, which is
    /// exactly the uniqueness invariant (one record per key).
    #[must_use]
    pub fn storage_key(&self, date_format: &str) -> String {
        format!("{}{}", self.ticker, self.date.format(date_format))
    }
}

/// Inclusive range of calendar days with `start <= end` guaranteed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, failing with [`CacheError::InvalidRange`] when
    /// `start > end`. Violations are errors, never normalized.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CacheError> {
        if start > end {
            return Err(CacheError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range (inclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, inclusive of both endpoints.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether `day` falls inside the range.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Iterate every day in the range in ascending order.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// One missing sub-range of days for a single series.
///
/// Unlike [`DateRange`], construction is unchecked: the analyzer preserves
/// a legacy lead-gap computation that can emit an inverted gap when every
/// supplied record predates the requested range, and that output must stay
/// representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateGap {
    /// First missing day.
    pub start: NaiveDate,
    /// Last missing day (inclusive). A one-day gap has `start == end`.
    pub end: NaiveDate,
}

impl DateGap {
    /// Build a gap without validation.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Render both endpoints with the given chrono format string.
    #[must_use]
    pub fn format(&self, date_format: &str) -> (String, String) {
        (
            format_day(self.start, date_format),
            format_day(self.end, date_format),
        )
    }
}

/// Verdict for a queried range: how much of it the cache holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CacheAvailability {
    /// Every calendar day in the requested range is present.
    Full,
    /// Some but not all days are present.
    Partial,
    /// Zero days are present.
    None,
}

/// Result of a cache-status query: verdict, cached rows, and missing
/// sub-ranges.
///
/// Invariants (before any read-side layer runs):
/// - `None`: `cache_data` is empty and `date_gaps` is exactly the whole
///   requested range.
/// - `Full`: `date_gaps` is empty and `cache_data` covers every requested
///   day.
/// - `Partial`: both are non-empty and together they partition the
///   requested range.
///
/// Gap ordering is positional, not lexicographic: lead gap first, then
/// trail gap, then interior gaps in ascending date order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStatus {
    /// Series the query was made for.
    pub ticker: String,
    /// Availability verdict.
    pub availability: CacheAvailability,
    /// Cached rows, ascending by date.
    pub cache_data: Vec<TickerRecord>,
    /// Missing sub-ranges, positionally ordered.
    pub date_gaps: Vec<DateGap>,
}

impl CacheStatus {
    /// Status for a range the cache knows nothing about: one gap spanning
    /// the whole request.
    #[must_use]
    pub fn none(ticker: impl Into<String>, range: DateRange) -> Self {
        Self {
            ticker: ticker.into(),
            availability: CacheAvailability::None,
            cache_data: Vec::new(),
            date_gaps: vec![DateGap::new(range.start(), range.end())],
        }
    }

    /// Status for a fully covered range.
    #[must_use]
    pub fn full(ticker: impl Into<String>, cache_data: Vec<TickerRecord>) -> Self {
        Self {
            ticker: ticker.into(),
            availability: CacheAvailability::Full,
            cache_data,
            date_gaps: Vec::new(),
        }
    }

    /// Status for a partially covered range.
    #[must_use]
    pub fn partial(
        ticker: impl Into<String>,
        cache_data: Vec<TickerRecord>,
        date_gaps: Vec<DateGap>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            availability: CacheAvailability::Partial,
            cache_data,
            date_gaps,
        }
    }
}

/// Configuration for a cache facade and its backing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Logical name of the backing store.
    pub store_name: String,
    /// Name of the (ticker, date) index inside the store.
    pub index_name: String,
    /// chrono format string used to render and parse days at the boundary.
    /// Comparisons are always by calendar day, independent of this format.
    pub date_format: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            store_name: "quandlStockCache".to_string(),
            index_name: "tickerDate".to_string(),
            date_format: "%Y%m%d".to_string(),
        }
    }
}

/// Render a day with a chrono format string.
#[must_use]
pub fn format_day(day: NaiveDate, date_format: &str) -> String {
    day.format(date_format).to_string()
}

/// Parse a day string against a chrono format string.
pub fn parse_day(value: &str, date_format: &str) -> Result<NaiveDate, CacheError> {
    NaiveDate::parse_from_str(value, date_format).map_err(|_| CacheError::InvalidDay {
        value: value.to_string(),
        format: date_format.to_string(),
    })
}
