use anyhow::Error;
use rosterly_auth::GatewayError;
use rosterly_store::StoreError;

/// Classification of an application error.
///
/// The kind decides how a caller renders the failure: `NotFound` becomes an
/// empty detail view, `Gateway` becomes the auto-expiring session banner,
/// `Store` becomes the blocking write-failure banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    BadRequest,
    Store,
    Gateway,
    Internal,
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::BadRequest, err)
    }

    pub fn gateway<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Gateway, err)
    }

    /// Classify a store failure, keeping missing-document errors
    /// distinguishable from backend failures.
    pub fn store(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::new(ErrorKind::NotFound, err),
            other => Self::new(ErrorKind::Store, other),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    /// Human-readable message for display.
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        Self::gateway(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(err)
    }
}
