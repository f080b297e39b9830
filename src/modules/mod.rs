pub mod profiles;
pub mod session;
pub mod students;

pub use self::session::SessionManager;
pub use self::students::StudentRepository;
