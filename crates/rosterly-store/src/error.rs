use std::fmt;

/// Error type for document-store operations.
#[derive(Debug)]
pub enum StoreError {
    /// No document with this id in the collection.
    NotFound { collection: String, id: String },

    /// I/O error from a file-backed store.
    Io(std::io::Error),

    /// Document could not be serialized or deserialized.
    Serde(serde_json::Error),

    /// Backend is unreachable or refused the request.
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { collection, id } => {
                write!(f, "No document '{}' in collection '{}'", id, collection)
            }
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Serde(e) => write!(f, "Serialization error: {}", e),
            Self::Unavailable(msg) => write!(f, "Store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e)
    }
}
