//! Google OAuth popup flow.
//!
//! The popup runs the implicit `id_token` flow and is redirected back to a
//! same-origin path. Until then reading its location throws (cross-origin),
//! so the opener polls: a closed popup means the user cancelled, a readable
//! location on the redirect URI carries the result in its fragment.
//!
//! Browser-only pieces are gated behind `csr`; URL building and fragment
//! parsing are plain functions.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "popup_test.rs"]
mod popup_test;

use super::identity::{BackendError, code};

pub const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

#[cfg(feature = "csr")]
const POPUP_TARGET: &str = "taskdeck-oauth";
#[cfg(feature = "csr")]
const POPUP_FEATURES: &str = "popup,width=500,height=640";
#[cfg(feature = "csr")]
const POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(250);

/// Build the authorize URL for one popup attempt.
///
/// # Errors
///
/// Returns a parse error only if the base URL constant is malformed.
pub fn authorize_url(client_id: &str, redirect_uri: &str, state: &str, nonce: &str) -> Result<url::Url, url::ParseError> {
    url::Url::parse_with_params(
        GOOGLE_AUTHORIZE_URL,
        &[
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("response_type", "id_token"),
            ("scope", "openid email profile"),
            ("state", state),
            ("nonce", nonce),
            ("prompt", "select_account"),
        ],
    )
}

/// What the provider put in the redirect fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RedirectOutcome {
    IdToken(String),
    /// The user declined consent on the provider page.
    Denied,
    Failed(String),
}

impl RedirectOutcome {
    /// # Errors
    ///
    /// `Denied` and `Failed` become coded backend errors.
    pub fn into_result(self) -> Result<String, BackendError> {
        match self {
            Self::IdToken(token) => Ok(token),
            Self::Denied => Err(BackendError::coded(code::USER_CANCELLED, "consent denied")),
            Self::Failed(reason) => Err(BackendError::coded(code::INTERNAL_ERROR, reason)),
        }
    }
}

/// Parse a redirect fragment (`#id_token=...&state=...`).
#[must_use]
pub fn parse_redirect_fragment(fragment: &str, expected_state: &str) -> RedirectOutcome {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let mut id_token = None;
    let mut error = None;
    let mut state = None;
    for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
        match key.as_ref() {
            "id_token" => id_token = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        return if error == "access_denied" { RedirectOutcome::Denied } else { RedirectOutcome::Failed(error) };
    }
    if state.as_deref() != Some(expected_state) {
        return RedirectOutcome::Failed("state mismatch".to_owned());
    }
    match id_token {
        Some(token) if !token.is_empty() => RedirectOutcome::IdToken(token),
        _ => RedirectOutcome::Failed("missing id_token".to_owned()),
    }
}

/// Open the popup on `url` and wait for the provider to redirect back to
/// `redirect_uri`. Returns the Google ID token.
///
/// # Errors
///
/// `auth/popup-blocked` when the window cannot be opened,
/// `auth/popup-closed-by-user` when it is closed first, otherwise the
/// outcome parsed from the redirect.
pub async fn run_popup(url: &str, redirect_uri: &str, state: &str) -> Result<String, BackendError> {
    #[cfg(feature = "csr")]
    {
        let window =
            web_sys::window().ok_or_else(|| BackendError::coded(code::INTERNAL_ERROR, "no browser window"))?;
        let popup = window
            .open_with_url_and_target_and_features(url, POPUP_TARGET, POPUP_FEATURES)
            .ok()
            .flatten()
            .ok_or_else(|| BackendError::coded(code::POPUP_BLOCKED, "popup blocked"))?;

        loop {
            gloo_timers::future::sleep(POLL_INTERVAL).await;
            if popup.closed().unwrap_or(true) {
                return Err(BackendError::coded(code::POPUP_CLOSED_BY_USER, "popup closed"));
            }
            // Throws while the popup is on the provider's origin.
            let Ok(href) = popup.location().href() else {
                continue;
            };
            if !href.starts_with(redirect_uri) {
                continue;
            }
            let fragment = popup.location().hash().unwrap_or_default();
            let _ = popup.close();
            return parse_redirect_fragment(&fragment, state).into_result();
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (url, redirect_uri, state);
        Err(BackendError::coded(code::OPERATION_NOT_ALLOWED, "popup sign-in requires a browser"))
    }
}

/// Origin of the current page, used to build the redirect URI.
pub fn page_origin() -> String {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_else(|| "http://localhost".to_owned())
    }
    #[cfg(not(feature = "csr"))]
    {
        "http://localhost".to_owned()
    }
}
