//! Firebase Identity Toolkit REST backend.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, session persisted in
//! `localStorage`. Elsewhere every remote call fails with
//! `auth/network-request-failed` and nothing is persisted.
//!
//! SESSION NOTIFICATIONS
//! =====================
//! Listeners hear about the signed-in account only once the backend is ready
//! (after [`FirebaseBackend::restore`]). At that point every listener gets the
//! initial state; later listeners get it on registration. After that a
//! notification fires only when the signed-in uid changes, matching the
//! hosted SDK. Profile edits do not notify.
//!
//! ERROR HANDLING
//! ==============
//! REST error messages (`EMAIL_NOT_FOUND`, `WEAK_PASSWORD : ...`) are mapped
//! to the SDK's `auth/...` codes so the translator sees one vocabulary.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "firebase_test.rs"]
mod firebase_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::identity::{BackendError, IdentityBackend, ListenerId, SessionListener, code};
use super::popup;
use super::types::ProviderUser;
use crate::config::IdentityConfig;

/// `localStorage` key holding the persisted session.
pub const SESSION_STORAGE_KEY: &str = "taskdeck.session";

const GOOGLE_PROVIDER_ID: &str = "google.com";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct StoredSession {
    id_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    user: ProviderUser,
}

/// Response of the token-issuing endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    id_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(flatten)]
    user: ProviderUser,
}

impl TokenResponse {
    fn into_session(self) -> StoredSession {
        StoredSession { id_token: self.id_token, refresh_token: self.refresh_token, user: self.user }
    }
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<ProviderUser>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn endpoint(config: &IdentityConfig, method: &str) -> String {
    format!("{}/accounts:{method}?key={}", config.identity_endpoint, config.api_key)
}

fn password_request(email: &str, password: &str) -> serde_json::Value {
    serde_json::json!({ "email": email, "password": password, "returnSecureToken": true })
}

fn profile_request(id_token: &str, display_name: &str) -> serde_json::Value {
    serde_json::json!({ "idToken": id_token, "displayName": display_name, "returnSecureToken": false })
}

fn lookup_request(id_token: &str) -> serde_json::Value {
    serde_json::json!({ "idToken": id_token })
}

fn idp_request(google_id_token: &str, request_uri: &str) -> serde_json::Value {
    let post_body = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("id_token", google_id_token)
        .append_pair("providerId", GOOGLE_PROVIDER_ID)
        .finish();
    serde_json::json!({
        "postBody": post_body,
        "requestUri": request_uri,
        "returnSecureToken": true,
        "returnIdpCredential": true,
    })
}

/// Map a REST error message to the SDK error code.
fn rest_error_code(message: &str) -> &'static str {
    // WEAK_PASSWORD and friends append " : <detail>".
    let key = message.split(':').next().unwrap_or(message).trim();
    match key {
        "EMAIL_NOT_FOUND" => "auth/user-not-found",
        "INVALID_PASSWORD" => "auth/wrong-password",
        "INVALID_LOGIN_CREDENTIALS" | "INVALID_IDP_RESPONSE" => "auth/invalid-credential",
        "EMAIL_EXISTS" => "auth/email-already-in-use",
        "WEAK_PASSWORD" => "auth/weak-password",
        "INVALID_EMAIL" => "auth/invalid-email",
        "MISSING_PASSWORD" => "auth/missing-password",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "auth/too-many-requests",
        "USER_DISABLED" => "auth/user-disabled",
        "OPERATION_NOT_ALLOWED" => code::OPERATION_NOT_ALLOWED,
        "TOKEN_EXPIRED" => "auth/user-token-expired",
        "INVALID_ID_TOKEN" => "auth/invalid-user-token",
        _ => code::INTERNAL_ERROR,
    }
}

/// Classify an error body: the REST `{"error":{"message"}}` envelope first,
/// then a bare `{code, message}` object. Anything else keeps the raw body.
fn parse_error_response(body: &str) -> BackendError {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return BackendError::Uncoded(body.to_owned());
    };
    if let Ok(envelope) = ErrorEnvelope::deserialize(&value) {
        let code = rest_error_code(&envelope.error.message);
        return BackendError::coded(code, envelope.error.message);
    }
    match BackendError::from_value(&value) {
        BackendError::Uncoded(message) if message.is_empty() => BackendError::Uncoded(body.to_owned()),
        err => err,
    }
}

#[derive(Default)]
struct Inner {
    session: Option<StoredSession>,
    ready: bool,
    listeners: Vec<(ListenerId, SessionListener)>,
    next_listener: u64,
}

impl Inner {
    fn user(&self) -> Option<ProviderUser> {
        self.session.as_ref().map(|s| s.user.clone())
    }

    fn listeners(&self) -> Vec<SessionListener> {
        self.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
    }
}

pub struct FirebaseBackend {
    config: IdentityConfig,
    inner: Mutex<Inner>,
}

impl FirebaseBackend {
    pub fn new(config: IdentityConfig) -> Self {
        Self { config, inner: Mutex::new(Inner::default()) }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reload the persisted session, re-validate it, then mark the backend
    /// ready. Call once at startup.
    pub async fn restore(&self) {
        if let Some(stored) = load_session() {
            match self.lookup(&stored.id_token).await {
                Ok(user) => {
                    log::info!("restored session uid={}", user.local_id);
                    self.set_session(Some(StoredSession { user, ..stored }));
                }
                Err(e) => {
                    log::warn!("persisted session rejected: {e}");
                    self.set_session(None);
                }
            }
        }
        self.mark_ready();
    }

    /// Whether the initial session state has been established.
    pub fn is_ready(&self) -> bool {
        self.lock().ready
    }

    fn mark_ready(&self) {
        let (listeners, user) = {
            let mut inner = self.lock();
            if inner.ready {
                return;
            }
            inner.ready = true;
            (inner.listeners(), inner.user())
        };
        log::debug!("identity backend ready, notifying {} listener(s)", listeners.len());
        for listener in listeners {
            listener(user.clone());
        }
    }

    /// Install `session`, persist it, and notify when the signed-in uid changed.
    fn set_session(&self, session: Option<StoredSession>) {
        persist_session(session.as_ref());
        let (listeners, user) = {
            let mut inner = self.lock();
            let before = inner.session.as_ref().map(|s| s.user.local_id.clone());
            let after = session.as_ref().map(|s| s.user.local_id.clone());
            inner.session = session;
            if !inner.ready || before == after {
                return;
            }
            (inner.listeners(), inner.user())
        };
        for listener in listeners {
            listener(user.clone());
        }
    }

    fn id_token(&self) -> Option<String> {
        self.lock().session.as_ref().map(|s| s.id_token.clone())
    }

    async fn lookup(&self, id_token: &str) -> Result<ProviderUser, BackendError> {
        let response: LookupResponse = self.post("lookup", &lookup_request(id_token)).await?;
        response
            .users
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::coded("auth/user-not-found", "lookup returned no users"))
    }

    /// Complete a token-issuing call: prefer the full lookup record, fall back
    /// to what the token response carried.
    async fn establish(&self, response: TokenResponse) -> ProviderUser {
        let mut session = response.into_session();
        match self.lookup(&session.id_token).await {
            Ok(full) => session.user = full,
            Err(e) => log::debug!("profile lookup after sign-in failed: {e}"),
        }
        let user = session.user.clone();
        self.set_session(Some(session));
        user
    }

    async fn post<T: DeserializeOwned>(&self, method: &str, body: &serde_json::Value) -> Result<T, BackendError> {
        #[cfg(feature = "csr")]
        {
            let request = gloo_net::http::Request::post(&endpoint(&self.config, method))
                .json(body)
                .map_err(|e| BackendError::coded(code::INTERNAL_ERROR, e.to_string()))?;
            let resp = request
                .send()
                .await
                .map_err(|e| BackendError::coded(code::NETWORK_REQUEST_FAILED, e.to_string()))?;
            if !resp.ok() {
                let text = resp.text().await.unwrap_or_default();
                return Err(parse_error_response(&text));
            }
            resp.json::<T>()
                .await
                .map_err(|e| BackendError::coded(code::INTERNAL_ERROR, e.to_string()))
        }
        #[cfg(not(feature = "csr"))]
        {
            log::debug!("{} unavailable outside the browser", endpoint(&self.config, method));
            let _ = body;
            Err(BackendError::coded(code::NETWORK_REQUEST_FAILED, "identity backend requires a browser"))
        }
    }
}

#[async_trait(?Send)]
impl IdentityBackend for FirebaseBackend {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<ProviderUser, BackendError> {
        let response: TokenResponse = self.post("signInWithPassword", &password_request(email, password)).await?;
        Ok(self.establish(response).await)
    }

    async fn create_user(&self, email: &str, password: &str) -> Result<ProviderUser, BackendError> {
        let response: TokenResponse = self.post("signUp", &password_request(email, password)).await?;
        Ok(self.establish(response).await)
    }

    async fn update_profile(&self, display_name: &str) -> Result<ProviderUser, BackendError> {
        let id_token =
            self.id_token().ok_or_else(|| BackendError::coded(code::NO_CURRENT_USER, "no signed-in user"))?;
        let updated: ProviderUser = self.post("update", &profile_request(&id_token, display_name)).await?;
        let session = self.lock().session.clone();
        if let Some(mut session) = session {
            if session.user.local_id == updated.local_id {
                session.user.display_name.clone_from(&updated.display_name);
                self.set_session(Some(session));
            }
        }
        Ok(updated)
    }

    async fn sign_in_with_popup(&self) -> Result<ProviderUser, BackendError> {
        let client_id = self
            .config
            .google_client_id
            .clone()
            .ok_or_else(|| BackendError::coded(code::OPERATION_NOT_ALLOWED, "google client id not configured"))?;
        let redirect_uri = format!("{}{}", popup::page_origin(), self.config.redirect_path);
        let state = uuid::Uuid::new_v4().to_string();
        let nonce = uuid::Uuid::new_v4().to_string();
        let url = popup::authorize_url(&client_id, &redirect_uri, &state, &nonce)
            .map_err(|e| BackendError::coded(code::INTERNAL_ERROR, e.to_string()))?;

        let google_id_token = popup::run_popup(url.as_str(), &redirect_uri, &state).await?;
        let response: TokenResponse = self.post("signInWithIdp", &idp_request(&google_id_token, &redirect_uri)).await?;
        Ok(self.establish(response).await)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        self.set_session(None);
        Ok(())
    }

    fn current_user(&self) -> Option<ProviderUser> {
        self.lock().user()
    }

    fn add_listener(&self, listener: SessionListener) -> ListenerId {
        let (id, initial) = {
            let mut inner = self.lock();
            inner.next_listener += 1;
            let id = ListenerId(inner.next_listener);
            inner.listeners.push((id, Arc::clone(&listener)));
            (id, inner.ready.then(|| inner.user()))
        };
        if let Some(user) = initial {
            listener(user);
        }
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.lock().listeners.retain(|(l, _)| *l != id);
    }
}

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn load_session() -> Option<StoredSession> {
    #[cfg(feature = "csr")]
    {
        let raw = local_storage()?.get_item(SESSION_STORAGE_KEY).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

fn persist_session(session: Option<&StoredSession>) {
    #[cfg(feature = "csr")]
    {
        let Some(storage) = local_storage() else {
            return;
        };
        let result = match session.map(serde_json::to_string) {
            Some(Ok(json)) => storage.set_item(SESSION_STORAGE_KEY, &json),
            Some(Err(e)) => {
                log::warn!("failed to serialize session: {e}");
                return;
            }
            None => storage.remove_item(SESSION_STORAGE_KEY),
        };
        if result.is_err() {
            log::warn!("failed to update persisted session");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = session;
    }
}
