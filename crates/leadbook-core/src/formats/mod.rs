//! # Formats Module
//!
//! The JSON snapshot persisted in the storage slot.
//! File and database I/O live in `storage`.

mod snapshot;

pub use snapshot::*;
