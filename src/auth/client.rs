//! Portal authentication client
//!
//! One `AuthClient` owns one HTTP session: a dedicated cookie jar and the
//! fixed default headers the portal expects. Logging in is a two-step flow:
//! fetch the login page for a fresh `logintoken`, then post the credentials
//! and read the portal's verdict off the returned page.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, CONNECTION, HOST};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use super::page;
use super::types::{Account, AuthError};

/// Browser signature sent with every request from a session.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:84.0) Gecko/20100101 Firefox/84.0";

/// One account's HTTP session against the portal login page.
pub struct AuthClient {
    client: Client,
    cookie_jar: Arc<Jar>,
    login_url: Url,
}

impl AuthClient {
    /// Create a fresh session: empty cookie jar, fixed default headers.
    ///
    /// The `Host` header is derived from `login_url` so the same client code
    /// drives the real portal and a local test portal alike.
    pub fn new(login_url: &str, timeout_secs: u64) -> Result<Self, AuthError> {
        let login_url = Url::parse(login_url)
            .map_err(|e| AuthError::InvalidUrl(format!("{}: {}", login_url, e)))?;
        let host = match (login_url.host_str(), login_url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(AuthError::InvalidUrl(format!("no host in {}", login_url)));
            }
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            HOST,
            HeaderValue::from_str(&host)
                .map_err(|e| AuthError::InvalidUrl(format!("bad host {}: {}", host, e)))?,
        );
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        let cookie_jar = Arc::new(Jar::default());

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .cookie_provider(cookie_jar.clone())
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| AuthError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            cookie_jar,
            login_url,
        })
    }

    /// Perform the two-step login for `account`.
    ///
    /// Consumes the client: on success its HTTP state becomes the returned
    /// [`PortalSession`], on failure it is dropped along with its
    /// connections. The POST is only issued when the login page carried a
    /// token; a token-less page fails this account without a second request.
    pub async fn authenticate(self, account: &Account) -> Result<PortalSession, AuthError> {
        info!("Authorizing {}", account.login);

        // Step 1: fetch the login page. Besides the token this seeds the
        // session cookie the portal binds the token to.
        let page_response = self
            .client
            .get(self.login_url.clone())
            .send()
            .await
            .map_err(|e| AuthError::NetworkError(e.to_string()))?;

        let page_html = page_response
            .text()
            .await
            .map_err(|e| AuthError::NetworkError(e.to_string()))?;

        debug!("Login page fetched, length: {} bytes", page_html.len());

        let login_token =
            page::extract_login_token(&page_html).ok_or(AuthError::TokenNotFound)?;

        // Step 2: submit the credentials. Field order matters to the portal:
        // anchor, logintoken, username, password.
        let form_data = [
            ("anchor", ""),
            ("logintoken", login_token.as_str()),
            ("username", account.login.as_str()),
            ("password", account.password.as_str()),
        ];

        let response = self
            .client
            .post(self.login_url.clone())
            .form(&form_data)
            .send()
            .await
            .map_err(|e| AuthError::NetworkError(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::NetworkError(e.to_string()))?;

        debug!("Login response ({}): {} bytes", status, text.len());

        // The portal answers rejected logins with 200 and an error element;
        // the status code tells us nothing.
        if page::has_login_error(&text) {
            return Err(AuthError::Rejected);
        }

        info!("Authorized {}", account.login);

        Ok(PortalSession {
            account: account.clone(),
            client: self.client,
            cookies: self.cookie_jar,
        })
    }
}

/// An authenticated portal session.
///
/// Carries the cookie jar and default headers established for exactly one
/// account. Created only when the portal accepted the credentials.
pub struct PortalSession {
    pub account: Account,
    client: Client,
    cookies: Arc<Jar>,
}

impl PortalSession {
    /// HTTP client bound to this session's cookie jar.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// `Cookie` header value this session would send to `url`, if any.
    pub fn cookies_for(&self, url: &Url) -> Option<String> {
        use reqwest::cookie::CookieStore;

        self.cookies
            .cookies(url)
            .and_then(|value| value.to_str().map(|s| s.to_string()).ok())
    }
}
