//! # Rosterly Models
//!
//! Domain models and DTOs for the Rosterly roster dashboard.
//!
//! This crate provides the data structures shared across the application:
//! roster entities, create/update drafts, and their validation schemas.
//! Everything serializes camelCase because that is how the documents are
//! laid out in the backing document store.
//!
//! # Modules
//!
//! - [`students`]: Student roster records and drafts
//! - [`users`]: Per-identity user profiles

pub mod students;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use students::{NewStudent, Student, StudentPatch};
pub use users::{ProfilePatch, Role, UserProfile};
