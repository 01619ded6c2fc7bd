//! Authentication against the portal login form
//!
//! Provides:
//! - Per-account HTTP sessions with dedicated cookie jars
//! - The two-step token + credentials login flow
//! - Login page scraping (anti-forgery token, error marker)

mod client;
mod page;
mod types;

pub use client::{AuthClient, PortalSession};
pub use page::{extract_login_token, has_login_error};
pub use types::*;
