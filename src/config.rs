//! Identity platform configuration.
//!
//! Browser builds have no process environment, so [`IdentityConfig::from_env`]
//! reads values baked in at compile time. [`IdentityConfig::from_lookup`] takes
//! any key lookup and carries the parsing rules.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const API_KEY_VAR: &str = "TASKDECK_FIREBASE_API_KEY";
pub const GOOGLE_CLIENT_ID_VAR: &str = "TASKDECK_GOOGLE_CLIENT_ID";
pub const IDENTITY_ENDPOINT_VAR: &str = "TASKDECK_IDENTITY_ENDPOINT";
pub const REDIRECT_PATH_VAR: &str = "TASKDECK_OAUTH_REDIRECT_PATH";

pub const DEFAULT_IDENTITY_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_REDIRECT_PATH: &str = "/auth/callback";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required setting {var}")]
    MissingVar { var: &'static str },
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    pub api_key: String,
    /// OAuth client used by the Google popup; sign-in is refused when absent.
    pub google_client_id: Option<String>,
    /// Identity Toolkit base URL without a trailing slash.
    pub identity_endpoint: String,
    /// Same-origin path the OAuth popup is redirected back to.
    pub redirect_path: String,
}

impl IdentityConfig {
    /// Build config from values compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the API key is missing or a value is
    /// malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            match key {
                API_KEY_VAR => option_env!("TASKDECK_FIREBASE_API_KEY"),
                GOOGLE_CLIENT_ID_VAR => option_env!("TASKDECK_GOOGLE_CLIENT_ID"),
                IDENTITY_ENDPOINT_VAR => option_env!("TASKDECK_IDENTITY_ENDPOINT"),
                REDIRECT_PATH_VAR => option_env!("TASKDECK_OAUTH_REDIRECT_PATH"),
                _ => None,
            }
            .map(str::to_owned)
        })
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// Required:
    /// - `TASKDECK_FIREBASE_API_KEY`
    ///
    /// Optional:
    /// - `TASKDECK_GOOGLE_CLIENT_ID`
    /// - `TASKDECK_IDENTITY_ENDPOINT`: default Identity Toolkit v1 URL
    /// - `TASKDECK_OAUTH_REDIRECT_PATH`: default `/auth/callback`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the API key is missing or a value is
    /// malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let api_key = value(API_KEY_VAR).ok_or(ConfigError::MissingVar { var: API_KEY_VAR })?;
        let google_client_id = value(GOOGLE_CLIENT_ID_VAR);
        let identity_endpoint = parse_endpoint(value(IDENTITY_ENDPOINT_VAR).as_deref())?;
        let redirect_path = parse_redirect_path(value(REDIRECT_PATH_VAR).as_deref())?;

        Ok(Self { api_key, google_client_id, identity_endpoint, redirect_path })
    }
}

fn parse_endpoint(raw: Option<&str>) -> Result<String, ConfigError> {
    let raw = raw.unwrap_or(DEFAULT_IDENTITY_ENDPOINT);
    let parsed = url::Url::parse(raw)
        .map_err(|e| ConfigError::Invalid { var: IDENTITY_ENDPOINT_VAR, reason: e.to_string() })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            var: IDENTITY_ENDPOINT_VAR,
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(raw.trim_end_matches('/').to_owned())
}

fn parse_redirect_path(raw: Option<&str>) -> Result<String, ConfigError> {
    let raw = raw.unwrap_or(DEFAULT_REDIRECT_PATH);
    if !raw.starts_with('/') {
        return Err(ConfigError::Invalid { var: REDIRECT_PATH_VAR, reason: "must start with '/'".to_owned() });
    }
    Ok(raw.to_owned())
}
