use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rosterly_auth::{Identity, IdentityGateway};
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

/// How long a stored error stays visible before it is cleared.
const ERROR_DISPLAY_WINDOW: Duration = Duration::from_secs(5);

#[derive(Debug, Default)]
struct SessionState {
    current: Option<Identity>,
    loading: bool,
    error: Option<String>,
    /// Bumped on every stored error so an expiry timer for an old error
    /// never clears a newer one.
    error_seq: u64,
}

/// Process-wide session state derived from the identity gateway.
///
/// Holds exactly one subscription to the gateway's session stream for its
/// lifetime; every notification replaces the current identity and clears
/// the loading flag. The sign-in operations return a plain success flag and
/// convert gateway failures into a stored, auto-expiring message — nothing
/// propagates past this boundary.
///
/// Callers must not assume [`current_identity`](Self::current_identity) is
/// set synchronously after a successful [`login`](Self::login): the
/// subscription applies it asynchronously.
pub struct SessionManager {
    gateway: Arc<dyn IdentityGateway>,
    state: Arc<Mutex<SessionState>>,
    watcher: JoinHandle<()>,
}

impl SessionManager {
    /// Create the manager and start following the gateway's session stream.
    pub fn new(gateway: Arc<dyn IdentityGateway>) -> Self {
        let state = Arc::new(Mutex::new(SessionState {
            loading: true,
            ..SessionState::default()
        }));

        let mut rx = gateway.subscribe();
        let watcher = tokio::spawn({
            let state = Arc::clone(&state);
            async move {
                loop {
                    let snapshot = rx.borrow_and_update().clone();
                    {
                        let mut guard = match state.lock() {
                            Ok(guard) => guard,
                            Err(poisoned) => poisoned.into_inner(),
                        };
                        guard.current = snapshot;
                        guard.loading = false;
                    }
                    if rx.changed().await.is_err() {
                        debug!("identity gateway dropped, session stream closed");
                        break;
                    }
                }
            }
        });

        Self {
            gateway,
            state,
            watcher,
        }
    }

    /// The authenticated identity, if any.
    pub fn current_identity(&self) -> Option<Identity> {
        self.lock_state().current.clone()
    }

    /// True until the first gateway notification arrives.
    pub fn is_loading(&self) -> bool {
        self.lock_state().loading
    }

    /// The last operation's error message, if still within its display
    /// window.
    pub fn last_error(&self) -> Option<String> {
        self.lock_state().error.clone()
    }

    /// Sign in with email and password. Returns whether the gateway
    /// accepted the credentials; on failure the message is stored.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> bool {
        self.clear_error();
        match self.gateway.sign_in(email, password).await {
            Ok(_) => true,
            Err(err) => {
                self.set_error(err.to_string());
                false
            }
        }
    }

    /// Create a new account and sign it in.
    #[instrument(skip(self, password))]
    pub async fn signup(&self, email: &str, password: &str) -> bool {
        self.clear_error();
        match self.gateway.sign_up(email, password).await {
            Ok(_) => true,
            Err(err) => {
                self.set_error(err.to_string());
                false
            }
        }
    }

    /// Sign in through the federated provider flow.
    #[instrument(skip(self))]
    pub async fn sign_in_with_federated_provider(&self) -> bool {
        self.clear_error();
        match self.gateway.sign_in_federated().await {
            Ok(_) => true,
            Err(err) => {
                self.set_error(err.to_string());
                false
            }
        }
    }

    /// Sign out. The subscription clears the identity on the way back.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> bool {
        self.clear_error();
        match self.gateway.sign_out().await {
            Ok(()) => true,
            Err(err) => {
                self.set_error(err.to_string());
                false
            }
        }
    }

    /// Tear down the gateway subscription.
    pub fn shutdown(&self) {
        self.watcher.abort();
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn clear_error(&self) {
        let mut state = self.lock_state();
        state.error = None;
        state.error_seq += 1;
    }

    fn set_error(&self, message: String) {
        warn!(error = %message, "session operation failed");
        let seq = {
            let mut state = self.lock_state();
            state.error = Some(message);
            state.error_seq += 1;
            state.error_seq
        };

        // Expire the message after the display window, unless a newer error
        // replaced it in the meantime.
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            tokio::time::sleep(ERROR_DISPLAY_WINDOW).await;
            let mut guard = match state.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if guard.error_seq == seq {
                guard.error = None;
            }
        });
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}
