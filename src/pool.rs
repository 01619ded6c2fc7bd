//! Authorized client pool
//!
//! Fans out one login task per account, waits for every task to reach a
//! terminal state and keeps the sessions that authorized successfully.
//! Progress is announced over an event channel so console reporting stays
//! out of the login flow.

use futures::future::join_all;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{error, info, warn};

use crate::auth::{Account, AuthClient, AuthError, AuthEvent, PortalSession};

/// Collects authorized portal sessions for a batch of accounts.
pub struct ClientPool {
    login_url: String,
    timeout_secs: u64,
    events: UnboundedSender<AuthEvent>,
}

impl ClientPool {
    /// Create a pool together with the receiving end of its event stream.
    ///
    /// The channel closes when the pool is dropped; a reporter draining the
    /// receiver terminates with it.
    pub fn new(login_url: &str, timeout_secs: u64) -> (Self, UnboundedReceiver<AuthEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();

        (
            Self {
                login_url: login_url.to_string(),
                timeout_secs,
                events,
            },
            receiver,
        )
    }

    /// Authorize every account concurrently and keep the successful sessions.
    ///
    /// Each account resolves to exactly one [`AuthEvent::AccountCompleted`],
    /// streamed as it completes; one [`AuthEvent::BatchAuthorized`] follows
    /// once all tasks have joined. There is no cap on in-flight logins and no
    /// deadline beyond the per-request HTTP timeout: account lists are
    /// operator-supplied and small, so one task per account is launched
    /// outright.
    pub async fn authorize_all(&self, accounts: &[Account]) -> Vec<PortalSession> {
        info!("Authorizing {} accounts concurrently", accounts.len());

        let mut tasks = Vec::with_capacity(accounts.len());
        for account in accounts {
            let account = account.clone();
            let login_url = self.login_url.clone();
            let timeout_secs = self.timeout_secs;
            let events = self.events.clone();

            tasks.push(tokio::spawn(async move {
                let session = login_task(&login_url, timeout_secs, &account).await;

                // Event delivery is best-effort: a dropped receiver must not
                // fail the login itself.
                let _ = events.send(AuthEvent::AccountCompleted {
                    account,
                    success: session.is_some(),
                });

                session
            }));
        }

        let mut sessions = Vec::with_capacity(accounts.len());
        for (i, joined) in join_all(tasks).await.into_iter().enumerate() {
            match joined {
                Ok(Some(session)) => sessions.push(session),
                Ok(None) => {}
                Err(e) => {
                    // A panicked task still has to resolve its account as a
                    // failure, or the reporter would come up one line short.
                    error!("Login task panicked: {}", e);
                    if let Some(account) = accounts.get(i) {
                        let _ = self.events.send(AuthEvent::AccountCompleted {
                            account: account.clone(),
                            success: false,
                        });
                    }
                }
            }
        }

        info!(
            "{} of {} accounts authorized",
            sessions.len(),
            accounts.len()
        );

        let _ = self.events.send(AuthEvent::BatchAuthorized {
            clients: sessions.len(),
        });

        sessions
    }
}

/// One account's login attempt.
///
/// Failures are logged and isolated here; a broken page or an unreachable
/// portal never aborts the rest of the batch.
async fn login_task(
    login_url: &str,
    timeout_secs: u64,
    account: &Account,
) -> Option<PortalSession> {
    let client = match AuthClient::new(login_url, timeout_secs) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create session for {}: {}", account.login, e);
            return None;
        }
    };

    match client.authenticate(account).await {
        Ok(session) => Some(session),
        Err(AuthError::Rejected) => {
            info!("Credentials rejected for {}", account.login);
            None
        }
        Err(AuthError::TokenNotFound) => {
            warn!("No login token on the page served to {}", account.login);
            None
        }
        Err(e) => {
            warn!("Login failed for {}: {}", account.login, e);
            None
        }
    }
}
