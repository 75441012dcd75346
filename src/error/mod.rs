//! Error handling module
//!
//! Typed errors for the two halves of the crate: configuration resolution
//! and client construction/caching.

pub mod types;

pub use types::{ConfigError, StoreError};
