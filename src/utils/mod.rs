//! Shared utilities for the Rosterly core.
//!
//! - [`errors`]: Application error types and handling

pub mod errors;
