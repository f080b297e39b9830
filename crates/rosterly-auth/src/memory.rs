//! In-memory identity gateway.
//!
//! Holds accounts in a process-wide map with bcrypt password hashes and
//! publishes session changes on a watch channel. Mirrors the hosted
//! provider's observable behavior closely enough for tests and local
//! development: sign-up enforces unique emails and a minimum password
//! length, and every successful sign-in/out notifies subscribers.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{GatewayError, Identity, IdentityGateway};

const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    uid: String,
    password_hash: String,
}

/// In-process [`IdentityGateway`] keyed by email.
pub struct MemoryIdentityGateway {
    accounts: Mutex<HashMap<String, Account>>,
    federated: Option<Identity>,
    sessions: watch::Sender<Option<Identity>>,
}

impl MemoryIdentityGateway {
    pub fn new() -> Self {
        let (sessions, _) = watch::channel(None);
        Self {
            accounts: Mutex::new(HashMap::new()),
            federated: None,
            sessions,
        }
    }

    /// Configure the identity returned by the federated sign-in flow.
    pub fn with_federated_identity(mut self, identity: Identity) -> Self {
        self.federated = Some(identity);
        self
    }

    /// Provision an account without signing it in. Returns the new uid.
    pub fn register(&self, email: &str, password: &str) -> Result<String, GatewayError> {
        let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;
        let uid = Uuid::new_v4().to_string();
        let mut accounts = self.lock_accounts()?;
        if accounts.contains_key(email) {
            return Err(GatewayError::EmailTaken(email.to_string()));
        }
        accounts.insert(
            email.to_string(),
            Account {
                uid: uid.clone(),
                password_hash: hash,
            },
        );
        Ok(uid)
    }

    fn lock_accounts(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Account>>, GatewayError> {
        self.accounts
            .lock()
            .map_err(|_| GatewayError::Unavailable("account lock poisoned".to_string()))
    }

    fn publish(&self, identity: Option<Identity>) {
        // send_replace never fails even with no live receivers.
        self.sessions.send_replace(identity);
    }
}

impl Default for MemoryIdentityGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityGateway for MemoryIdentityGateway {
    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, GatewayError> {
        let identity = {
            let accounts = self.lock_accounts()?;
            let account = accounts.get(email).ok_or(GatewayError::InvalidCredentials)?;
            let matches = bcrypt::verify(password, &account.password_hash)
                .map_err(|e| GatewayError::Unavailable(e.to_string()))?;
            if !matches {
                return Err(GatewayError::InvalidCredentials);
            }
            Identity {
                uid: account.uid.clone(),
                email: email.to_string(),
                display_name: None,
                photo_url: None,
            }
        };
        debug!(uid = %identity.uid, "signed in");
        self.publish(Some(identity.clone()));
        Ok(identity)
    }

    #[instrument(skip(self, password))]
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, GatewayError> {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(GatewayError::WeakPassword);
        }
        let uid = self.register(email, password)?;
        let identity = Identity {
            uid,
            email: email.to_string(),
            display_name: None,
            photo_url: None,
        };
        debug!(uid = %identity.uid, "account created");
        self.publish(Some(identity.clone()));
        Ok(identity)
    }

    #[instrument(skip(self))]
    async fn sign_in_federated(&self) -> Result<Identity, GatewayError> {
        let identity = self
            .federated
            .clone()
            .ok_or(GatewayError::FederatedUnavailable)?;
        self.publish(Some(identity.clone()));
        Ok(identity)
    }

    #[instrument(skip(self))]
    async fn sign_out(&self) -> Result<(), GatewayError> {
        self.publish(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.sessions.subscribe()
    }
}
