use chrono::NaiveDate;
use thiserror::Error;

/// Unified error type for the tickcache workspace.
///
/// Covers store lifecycle failures, request validation errors, batch
/// consistency violations, and per-key write failures. Every failure is
/// returned to the immediate caller; layers never swallow one.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The host environment offers no persistent-storage capability. Fatal,
    /// not retried.
    #[error("store unavailable: {store}")]
    StoreUnavailable {
        /// Configured store name that could not be served.
        store: String,
    },

    /// A connect-only request was made against a store that has never been
    /// created. Recoverable; the caller decides whether to create it.
    #[error("store not found: {store}")]
    StoreNotFound {
        /// Configured store name that does not exist.
        store: String,
    },

    /// Deletion was blocked by an open connection. Recoverable; the caller
    /// retries after closing.
    #[error("store busy: {store} has open connections")]
    StoreBusy {
        /// Configured store name whose deletion was blocked.
        store: String,
    },

    /// A requested range had its start after its end. Caller bug, surfaced
    /// immediately, never retried or normalized.
    #[error("invalid range: {start} is after {end}")]
    InvalidRange {
        /// Requested start day.
        start: NaiveDate,
        /// Requested end day.
        end: NaiveDate,
    },

    /// A record sequence handed to the analyzer mixed series identities.
    #[error("inconsistent series: expected {expected}, found {found}")]
    InconsistentSeries {
        /// Series identifier the sequence was declared to hold.
        expected: String,
        /// Offending identifier encountered in the sequence.
        found: String,
    },

    /// A write batch contained more than one distinct series identifier.
    /// Per-series layers require the caller to split such batches first.
    #[error("mixed series ids in batch: {first} and {second}")]
    MixedSeriesId {
        /// First identifier seen in the batch.
        first: String,
        /// Conflicting identifier.
        second: String,
    },

    /// A record's date fell behind the running fill cursor after sorting.
    /// Treated as an internal-logic fault and surfaced rather than
    /// silently corrected.
    #[error("unsorted input: {date} is before cursor {cursor}")]
    UnsortedInput {
        /// Offending record date.
        date: NaiveDate,
        /// Cursor position when the record was encountered.
        cursor: NaiveDate,
    },

    /// An individual per-key write failed. Already-committed keys in the
    /// same batch are not rolled back.
    #[error("write failed for key {key}: {msg}")]
    KeyWrite {
        /// Derived storage key of the record that failed to write.
        key: String,
        /// Human-readable backend message.
        msg: String,
    },

    /// A date string at the boundary did not match the configured format.
    #[error("invalid day string {value:?} for format {format:?}")]
    InvalidDay {
        /// String that failed to parse.
        value: String,
        /// Format it was parsed against.
        format: String,
    },

    /// Opaque backend failure.
    #[error("store error: {0}")]
    Store(String),
}

impl CacheError {
    /// Helper: build a `StoreUnavailable` error for a store name.
    pub fn store_unavailable(store: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            store: store.into(),
        }
    }

    /// Helper: build a `StoreNotFound` error for a store name.
    pub fn store_not_found(store: impl Into<String>) -> Self {
        Self::StoreNotFound {
            store: store.into(),
        }
    }

    /// Helper: build a `StoreBusy` error for a store name.
    pub fn store_busy(store: impl Into<String>) -> Self {
        Self::StoreBusy {
            store: store.into(),
        }
    }

    /// Helper: build a `KeyWrite` error with the offending key and message.
    pub fn key_write(key: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::KeyWrite {
            key: key.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build an opaque `Store` error.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
