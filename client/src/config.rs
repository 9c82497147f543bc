//! Client configuration loaded via OrthoConfig.
//!
//! Values come from `SPONSOR_*` environment variables and configuration
//! files. Unset optional values fall back to the defaults below.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;
use zeroize::Zeroizing;

use crate::outbound::baas::BaasHttpConfig;

const DEFAULT_BASE_URL: &str = "https://baas.kinvey.com/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STORAGE_FILE: &str = "sponsor-credentials.json";

/// Errors raised when settings cannot produce adapter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// `base_url` is not an absolute URL.
    #[error("invalid base url '{value}': {message}")]
    InvalidBaseUrl {
        /// Configured value.
        value: String,
        /// Parser message.
        message: String,
    },
    /// `app_key` is unset or blank.
    #[error("SPONSOR_APP_KEY must be set to reach the user API")]
    MissingAppKey,
    /// `app_secret` is unset or blank.
    #[error("SPONSOR_APP_SECRET must be set to reach the user API")]
    MissingAppSecret,
}

/// Configuration values for the sponsorship client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SPONSOR")]
pub struct ClientSettings {
    /// Store credentials after sign-in and fill the form from them.
    #[ortho_config(default = false)]
    pub remember_credentials: bool,
    /// Root URL of the user API.
    pub base_url: Option<String>,
    /// Application key issued by the backend.
    pub app_key: Option<String>,
    /// Application secret issued by the backend.
    pub app_secret: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// File holding remembered credentials.
    pub storage_path: Option<PathBuf>,
}

impl ClientSettings {
    /// Return the configured API root, falling back to the default.
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Url::parse(raw).map_err(|err| SettingsError::InvalidBaseUrl {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Return the request timeout, never shorter than one second.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_TIMEOUT_SECS)
                .max(1),
        )
    }

    /// Return the credential file path, falling back to the default.
    pub fn storage_path(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_FILE))
    }

    /// Build the HTTP adapter configuration.
    pub fn baas_config(&self) -> Result<BaasHttpConfig, SettingsError> {
        let app_key = non_blank(self.app_key.as_deref()).ok_or(SettingsError::MissingAppKey)?;
        let app_secret =
            non_blank(self.app_secret.as_deref()).ok_or(SettingsError::MissingAppSecret)?;
        Ok(BaasHttpConfig {
            base_url: self.base_url()?,
            app_key: app_key.to_owned(),
            app_secret: Zeroizing::new(app_secret.to_owned()),
            timeout: self.request_timeout(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    //! Unit tests for client configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "SPONSOR_REMEMBER_CREDENTIALS",
        "SPONSOR_BASE_URL",
        "SPONSOR_APP_KEY",
        "SPONSOR_APP_SECRET",
        "SPONSOR_REQUEST_TIMEOUT_SECS",
        "SPONSOR_STORAGE_PATH",
    ];

    fn load_from_empty_args() -> ClientSettings {
        ClientSettings::load_from_iter([OsString::from("sponsor")]).expect("config should load")
    }

    fn cleared() -> [(&'static str, Option<String>); 6] {
        VARS.map(|name| (name, None::<String>))
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(cleared());

        let settings = load_from_empty_args();
        assert!(!settings.remember_credentials);
        assert_eq!(
            settings.base_url().expect("default url").as_str(),
            DEFAULT_BASE_URL
        );
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.storage_path(), PathBuf::from(DEFAULT_STORAGE_FILE));
        assert_eq!(
            settings.baas_config().err(),
            Some(SettingsError::MissingAppKey)
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SPONSOR_REMEMBER_CREDENTIALS", Some("true".to_owned())),
            ("SPONSOR_BASE_URL", Some("http://localhost:7007/".to_owned())),
            ("SPONSOR_APP_KEY", Some("kid_app".to_owned())),
            ("SPONSOR_APP_SECRET", Some("shh".to_owned())),
            ("SPONSOR_REQUEST_TIMEOUT_SECS", Some("0".to_owned())),
            (
                "SPONSOR_STORAGE_PATH",
                Some("/tmp/sponsor/creds.json".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.remember_credentials);
        assert_eq!(settings.request_timeout(), Duration::from_secs(1));
        assert_eq!(
            settings.storage_path(),
            PathBuf::from("/tmp/sponsor/creds.json")
        );

        let baas = settings.baas_config().expect("complete settings");
        assert_eq!(baas.base_url.as_str(), "http://localhost:7007/");
        assert_eq!(baas.app_key, "kid_app");
        assert_eq!(baas.app_secret.as_str(), "shh");
    }

    #[rstest]
    fn blank_secret_is_reported() {
        let mut vars = cleared();
        vars[2] = ("SPONSOR_APP_KEY", Some("kid_app".to_owned()));
        vars[3] = ("SPONSOR_APP_SECRET", Some("   ".to_owned()));
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.baas_config().err(),
            Some(SettingsError::MissingAppSecret)
        );
    }

    #[rstest]
    fn malformed_base_url_is_reported() {
        let mut vars = cleared();
        vars[1] = ("SPONSOR_BASE_URL", Some("not a url".to_owned()));
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.base_url(),
            Err(SettingsError::InvalidBaseUrl { .. })
        ));
    }
}
