//! tickcache-memory
//!
//! In-process reference backend for the tickcache `KeyedStore` contract.
//!
//! The crate splits the backend in two, the way a real engine would:
//! [`MemoryEngine`] is the process-wide storage environment owning every
//! named database, and [`MemoryStore`] is one logical connection handle
//! against it. Deterministic fault injection (the [`FAILING_TICKER`]
//! reserved ticker and [`MemoryEngine::unavailable`]) makes the error
//! paths of the contract testable without a flaky host.
#![warn(missing_docs)]

mod engine;
mod store;

pub use engine::{FAILING_TICKER, MemoryEngine};
pub use store::MemoryStore;
