//! Identity records shared between the backend boundary and the UI.
//!
//! DESIGN
//! ======
//! `ProviderUser` mirrors the account record the identity backend returns
//! (camelCase JSON, nullable profile fields). `User` is the application shape.
//! `to_user` is the only conversion between them, so provider nulls and empty
//! strings never reach page or state code.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// A signed-in principal as the rest of the application sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Provider-assigned account identifier; stable for the session.
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
}

impl User {
    /// Name to greet the user with: display name when set, email otherwise.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }

    /// Avatar initials: first letter of each `.`-separated part of the
    /// email's local part, uppercased, at most two. `None` without an email.
    #[must_use]
    pub fn initials(&self) -> Option<String> {
        let local = self.email.split('@').next().unwrap_or_default();
        let initials: String = local
            .split('.')
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect();
        Some(initials).filter(|i| !i.is_empty())
    }
}

/// Account record as reported by the identity backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderUser {
    pub local_id: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub email_verified: Option<bool>,
}

impl From<&User> for ProviderUser {
    fn from(user: &User) -> Self {
        Self {
            local_id: user.id.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            photo_url: user.photo_url.clone(),
            email_verified: user.email_verified,
        }
    }
}

/// Convert a provider record into the application `User`.
#[must_use]
pub fn to_user(record: &ProviderUser) -> User {
    User {
        id: record.local_id.clone(),
        email: record.email.clone(),
        display_name: present(record.display_name.as_deref()),
        photo_url: present(record.photo_url.as_deref()),
        email_verified: record.email_verified,
    }
}

fn present(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}
