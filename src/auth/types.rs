//! Authentication types for the portal
//!
//! Models for accounts, login failures and batch progress notifications.

use serde::{Deserialize, Serialize};

/// Portal account credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub login: String,
    pub password: String,
}

impl Account {
    pub fn new(login: &str, password: &str) -> Self {
        Self {
            login: login.to_string(),
            password: password.to_string(),
        }
    }
}

/// Authentication error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The login page did not carry a usable `logintoken` field, so the
    /// credentials were never submitted.
    #[error("login token not found on the login page")]
    TokenNotFound,

    /// The portal rendered its error marker: wrong login or password.
    #[error("credentials rejected by the portal")]
    Rejected,

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("invalid login URL: {0}")]
    InvalidUrl(String),
}

/// Notifications emitted while a batch is being authorized.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    /// One account finished its login attempt, successfully or not.
    AccountCompleted { account: Account, success: bool },

    /// Every account reached a terminal state; `clients` sessions were kept.
    BatchAuthorized { clients: usize },
}
