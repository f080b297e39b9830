//! Session state over the identity gateway.

pub mod manager;

pub use manager::SessionManager;
