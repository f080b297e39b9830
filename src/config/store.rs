use std::env;
use std::path::PathBuf;

/// Document-store configuration: where the local backend keeps its data and
/// which collections the roster lives in.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub students_collection: String,
    pub users_collection: String,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("ROSTERLY_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            students_collection: env::var("ROSTERLY_STUDENTS_COLLECTION")
                .unwrap_or_else(|_| "students".to_string()),
            users_collection: env::var("ROSTERLY_USERS_COLLECTION")
                .unwrap_or_else(|_| "users".to_string()),
        }
    }

    /// Where the persisted theme preference lives.
    pub fn theme_path(&self) -> PathBuf {
        self.data_dir.join("theme.json")
    }
}
