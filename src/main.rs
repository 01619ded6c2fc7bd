//! sdo-connect entry point
//!
//! Authorizes the inline account list against the portal and prints one
//! status line per account plus the final client count.

use sdo_connect::auth::Account;
use sdo_connect::pool::ClientPool;
use sdo_connect::report::ConsoleReporter;
use tracing::info;

/// Login page of the portal.
const LOGIN_PAGE_URL: &str = "https://sdo.srspu.ru/login/index.php";

/// Timeout for each HTTP request, in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sdo_connect::init_logging();

    // The account source is a caller concern; this binary supplies it inline.
    let accounts = vec![
        Account::new("ivanov.dv@stud.npi-tu.ru", "kFk2x9wZ"),
        Account::new("petrova.ma@stud.npi-tu.ru", "p8Dq41mN"),
    ];

    let (pool, events) = ClientPool::new(LOGIN_PAGE_URL, REQUEST_TIMEOUT_SECS);
    let reporter = ConsoleReporter::spawn(events);

    let clients = pool.authorize_all(&accounts).await;
    info!("Batch finished with {} authorized clients", clients.len());

    // Dropping the pool closes the event channel; the reporter drains what
    // is left and exits.
    drop(pool);
    reporter.await?;

    Ok(())
}
