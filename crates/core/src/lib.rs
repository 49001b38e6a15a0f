//! Core types and shared functionality for codefetch.
//!
//! This crate provides:
//! - Unified error types
//! - Layered configuration with validation
//! - Constants shared by the extraction pipeline and its callers

pub mod config;
pub mod error;

pub use config::{AppConfig, ConfigError, Transport};
pub use error::Error;

/// Hard ceiling on the number of code snippets returned for one query.
///
/// `AppConfig::max_snippets` may lower the cap but never raise it.
pub const MAX_SNIPPETS: usize = 20;
