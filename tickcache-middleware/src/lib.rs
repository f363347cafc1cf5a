//! tickcache-middleware
//!
//! Operation layers for tickcache facades. Layers implement the
//! `PutLayer`/`StatusLayer` wrap-contracts from `tickcache-core` and are
//! composed outermost-first by the facade builder.
#![warn(missing_docs)]

mod placeholder;

pub use placeholder::{PlaceholderFill, PlaceholderStrip};
