//! # Leadbook
//!
//! Command-line front end over `leadbook-core`.
//!
//! Exposed as a library so integration tests can parse arguments and run
//! commands without spawning the binary.

pub mod cli;
pub mod config;
