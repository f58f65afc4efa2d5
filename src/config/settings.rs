use std::fmt;

use derive_getters::Getters;
use thiserror::Error;

use super::EnvFile;

pub const APP_KEY_VAR: &str = "WEBULL_APP_KEY";
pub const APP_SECRET_VAR: &str = "WEBULL_APP_SECRET";
pub const ENDPOINT_VAR: &str = "WEBULL_API_ENDPOINT";
pub const DEFAULT_ENDPOINT: &str = "api.webull.co.jp";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing credentials: {}", .missing.join(", "))]
    MissingCredentials { missing: Vec<&'static str> },
}

/// Immutable per-run configuration.
#[derive(Clone, Getters)]
pub struct Settings {
    app_key: String,
    app_secret: String,
    endpoint: String,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("app_key", &self.masked_app_key())
            .field("app_secret", &"***")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Settings {
    pub fn from_env_file(env_file: &EnvFile) -> Result<Self, ConfigError> {
        Self::resolve(|key| env_file.resolve(key))
    }

    pub fn resolve<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_key = lookup(APP_KEY_VAR).filter(|v| !v.is_empty());
        let app_secret = lookup(APP_SECRET_VAR).filter(|v| !v.is_empty());

        match (app_key, app_secret) {
            (Some(app_key), Some(app_secret)) => Ok(Self {
                app_key,
                app_secret,
                endpoint: lookup(ENDPOINT_VAR)
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            }),
            (app_key, app_secret) => {
                let mut missing = Vec::new();
                if app_key.is_none() {
                    missing.push(APP_KEY_VAR);
                }
                if app_secret.is_none() {
                    missing.push(APP_SECRET_VAR);
                }
                Err(ConfigError::MissingCredentials { missing })
            }
        }
    }

    /// The app key cut to its first eight characters, for display.
    pub fn masked_app_key(&self) -> String {
        let head: String = self.app_key.chars().take(8).collect();
        format!("{}...", head)
    }
}
