//! # Pipeline Module
//!
//! The fixed, ordered sales pipeline and the advancement rule.

mod stage;

pub use stage::*;
