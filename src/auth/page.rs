//! Login page scraping
//!
//! The portal is scraped, not spoken to over an API: the anti-forgery token
//! lives in a hidden form field and the only failure signal is an error
//! element on the returned page. Markup is parsed tolerantly so broken HTML
//! does not take a login attempt down with it.

use scraper::{Html, Selector};

/// Hidden input carrying the anti-forgery token on the login form.
const LOGIN_TOKEN_SELECTOR: &str = r#"input[name="logintoken"]"#;

/// Anchor the portal renders only when credentials are rejected.
const LOGIN_ERROR_SELECTOR: &str = "a#loginerrormessage";

/// Extract the `logintoken` hidden-field value from the login page.
///
/// First matching element wins. Returns `None` when the field, or its
/// `value` attribute, is missing.
pub fn extract_login_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(LOGIN_TOKEN_SELECTOR).ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(|value| value.to_string())
}

/// Check whether the portal rendered its login error marker.
///
/// Matches exactly `a#loginerrormessage` and nothing else; this element is
/// the portal's own failure signal, independent of the HTTP status code.
pub fn has_login_error(html: &str) -> bool {
    let document = Html::parse_document(html);
    match Selector::parse(LOGIN_ERROR_SELECTOR) {
        Ok(selector) => document.select(&selector).next().is_some(),
        Err(_) => false,
    }
}
