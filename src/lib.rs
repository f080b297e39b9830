//! # Rosterly
//!
//! Core of a student-roster management dashboard: authenticated users view
//! a filterable roster, add student records, and edit their own profile.
//! Persistence and authentication are delegated to external managed
//! services consumed through the generic seams in `rosterly-store` and
//! `rosterly-auth`; nothing here coordinates across requests.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── config/           # Environment-driven configuration
//! ├── modules/          # Feature modules
//! │   ├── session/     # Session manager over the identity gateway
//! │   ├── students/    # Student repository over the document store
//! │   └── profiles/    # Lazy per-identity profile service
//! ├── seeder/           # Sample-data bootstrap helper
//! ├── prefs.rs          # Persisted theme preference
//! └── utils/            # Shared utilities (errors)
//! ```
//!
//! ## Failure contract
//!
//! Roster reads fail soft (empty result plus a diagnostic log) so views can
//! render an empty state; writes fail loud so callers can block and report.
//! That asymmetry is deliberate and preserved everywhere.

pub mod config;
pub mod logging;
pub mod modules;
pub mod prefs;
pub mod seeder;
pub mod utils;

pub use modules::profiles::ProfileService;
pub use modules::session::SessionManager;
pub use modules::students::StudentRepository;
pub use utils::errors::{AppError, ErrorKind};
