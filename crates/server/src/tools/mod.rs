//! MCP tool implementations.
//!
//! This module contains all tools exposed by the codefetch server.

pub mod extract_code;
pub mod fetch_code;

pub use extract_code::ExtractCodeParams;
pub use fetch_code::FetchCodeParams;
