//! # Rosterly Auth
//!
//! Identity-gateway abstraction layer.
//!
//! Authentication is delegated to a hosted identity provider; this crate is
//! the seam it is consumed through. [`IdentityGateway`] covers exactly the
//! surface the dashboard uses: email/password sign-in and sign-up, a
//! federated sign-in flow, sign-out, and a session change stream that fires
//! with the current [`Identity`] (or `None`) on every change.
//!
//! [`MemoryIdentityGateway`] is the in-process implementation used by tests
//! and local development, with bcrypt-hashed passwords and the provider's
//! usual sign-up rules (unique email, minimum password length).

pub mod memory;

pub use memory::MemoryIdentityGateway;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// The authenticated identity as reported by the provider.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

/// Error type for gateway operations.
///
/// Messages are human-readable on purpose: the session layer surfaces them
/// to the user verbatim.
#[derive(Debug)]
pub enum GatewayError {
    /// Email/password pair did not match an account.
    InvalidCredentials,

    /// Sign-up attempted with an email that already has an account.
    EmailTaken(String),

    /// Password rejected by the provider's strength rule.
    WeakPassword,

    /// Federated sign-in requested but no federated identity is configured.
    FederatedUnavailable,

    /// Provider is unreachable or failed internally.
    Unavailable(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "Invalid email or password"),
            Self::EmailTaken(email) => {
                write!(f, "An account already exists for {}", email)
            }
            Self::WeakPassword => write!(f, "Password should be at least 6 characters"),
            Self::FederatedUnavailable => {
                write!(f, "Federated sign-in is not available")
            }
            Self::Unavailable(msg) => write!(f, "Identity provider unavailable: {}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

/// Abstract trait for identity-provider gateways.
///
/// Implementations publish every session change on the watch channel handed
/// out by [`subscribe`](IdentityGateway::subscribe); consumers hold exactly
/// one subscription for their lifetime and read the current identity from
/// it rather than from the sign-in return values.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Sign in with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, GatewayError>;

    /// Create a new account and sign it in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, GatewayError>;

    /// Sign in through the configured federated provider.
    async fn sign_in_federated(&self) -> Result<Identity, GatewayError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), GatewayError>;

    /// Subscribe to session changes. The receiver's current value is the
    /// session state right now; every subsequent change is published to it.
    fn subscribe(&self) -> watch::Receiver<Option<Identity>>;
}
