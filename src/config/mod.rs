//! Configuration modules for the Rosterly core.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables with sensible defaults.
//!
//! - [`store`]: document-store location and collection names

pub mod store;
