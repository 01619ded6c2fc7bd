//! Console reporting
//!
//! Renders the authorization event stream as human-readable status lines.
//! Each line is built as one string before printing, so lines from
//! concurrently completing accounts cannot interleave color codes.

use colored::Colorize;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

use crate::auth::AuthEvent;

/// Prints one status line per authorization event.
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Drain `events` on a background task until the sending side closes.
    pub fn spawn(mut events: UnboundedReceiver<AuthEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                println!("{}", Self::render(&event));
            }
        })
    }

    /// Format a single event. Total over every payload; reporting must never
    /// feed an error back into the login flow.
    fn render(event: &AuthEvent) -> String {
        match event {
            AuthEvent::AccountCompleted {
                account,
                success: true,
            } => format!("Пользователь {} успешно авторизован", account.login)
                .green()
                .to_string(),
            AuthEvent::AccountCompleted {
                account,
                success: false,
            } => format!("Неправильный логин или пароль {}", account.login)
                .red()
                .to_string(),
            AuthEvent::BatchAuthorized { clients } => {
                format!("Добавлено {} клиентов", clients)
            }
        }
    }
}
