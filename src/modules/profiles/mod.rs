//! Per-identity user profiles.

pub mod service;

pub use service::ProfileService;
