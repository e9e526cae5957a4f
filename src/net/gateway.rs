//! Auth gateway: the four remote auth operations plus session reads.
//!
//! ERROR HANDLING
//! ==============
//! Every failure leaving this module is an [`AuthError`]. Backend errors are
//! translated here and nowhere else.
//!
//! Sign-up with a display name is two sequential remote calls. When the
//! profile update fails the account already exists and stays signed in at the
//! backend; the caller gets the translated update failure.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::sync::Arc;

use super::auth_error::{AuthError, translate};
use super::identity::{IdentityBackend, SessionListener, Subscription, code, subscribe};
use super::types::{ProviderUser, User, to_user};

#[derive(Clone)]
pub struct AuthGateway {
    backend: Arc<dyn IdentityBackend>,
}

impl AuthGateway {
    pub fn new(backend: Arc<dyn IdentityBackend>) -> Self {
        Self { backend }
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns the translated backend failure.
    pub async fn sign_in_with_email(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let record = self.backend.sign_in_with_password(email, password).await.map_err(|e| translate(&e))?;
        log::info!("signed in uid={}", record.local_id);
        Ok(to_user(&record))
    }

    /// Create an account and, when `display_name` is non-blank, set it on the
    /// new profile.
    ///
    /// # Errors
    ///
    /// Returns the translated failure of whichever call failed.
    pub async fn sign_up_with_email(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> Result<User, AuthError> {
        let created = self.backend.create_user(email, password).await.map_err(|e| translate(&e))?;
        log::info!("account created uid={}", created.local_id);

        let Some(name) = display_name.map(str::trim).filter(|n| !n.is_empty()) else {
            return Ok(to_user(&created));
        };
        match self.backend.update_profile(name).await {
            Ok(updated) => Ok(to_user(&merge_profile(&created, updated))),
            Err(e) => {
                log::warn!("profile update failed after account creation uid={}: {e}", created.local_id);
                Err(translate(&e))
            }
        }
    }

    /// Sign in through the Google OAuth popup.
    ///
    /// # Errors
    ///
    /// Closing the popup yields "Sign-in cancelled"; other failures are
    /// translated.
    pub async fn sign_in_with_google(&self) -> Result<User, AuthError> {
        match self.backend.sign_in_with_popup().await {
            Ok(record) => {
                log::info!("signed in with google uid={}", record.local_id);
                Ok(to_user(&record))
            }
            Err(e) if e.code() == Some(code::POPUP_CLOSED_BY_USER) => {
                log::debug!("google sign-in popup closed");
                Err(translate(&e))
            }
            Err(e) => Err(translate(&e)),
        }
    }

    /// # Errors
    ///
    /// Returns the translated backend failure.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.backend.sign_out().await.map_err(|e| translate(&e))?;
        log::info!("signed out");
        Ok(())
    }

    /// Currently cached user; no network access.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.backend.current_user().as_ref().map(to_user)
    }

    /// Forward session-change notifications as mapped users.
    pub fn on_session_change<F>(&self, listener: F) -> Subscription
    where
        F: Fn(Option<User>) + Send + Sync + 'static,
    {
        let mapped: SessionListener =
            Arc::new(move |record: Option<ProviderUser>| listener(record.as_ref().map(to_user)));
        subscribe(&self.backend, mapped)
    }
}

/// The update response may omit fields the creation response carried.
fn merge_profile(created: &ProviderUser, updated: ProviderUser) -> ProviderUser {
    ProviderUser {
        local_id: created.local_id.clone(),
        email: if updated.email.is_empty() { created.email.clone() } else { updated.email },
        display_name: updated.display_name.or_else(|| created.display_name.clone()),
        photo_url: updated.photo_url.or_else(|| created.photo_url.clone()),
        email_verified: updated.email_verified.or(created.email_verified),
    }
}
