//! Student roster access.

pub mod repository;

pub use repository::StudentRepository;
