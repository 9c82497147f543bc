//! Reqwest-backed user API adapter.
//!
//! This adapter owns transport details only: endpoint layout, app-level and
//! session authorisation headers, HTTP error mapping, and JSON decoding. The
//! session token from the last login or sign-up is kept in memory.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{CredentialsDto, ErrorDto, UserDto};
use crate::domain::ports::{AuthBackend, AuthError};
use crate::domain::{ActiveUser, LoginCredentials};

/// Connection settings for the user API.
#[derive(Clone)]
pub struct BaasHttpConfig {
    /// Service root, such as `https://baas.kinvey.com/`.
    pub base_url: Url,
    /// Application key used in endpoint paths and basic auth.
    pub app_key: String,
    /// Application secret used in basic auth.
    pub app_secret: Zeroizing<String>,
    /// Per-request transport timeout.
    pub timeout: Duration,
}

/// Errors raised while constructing [`BaasHttpBackend`].
#[derive(Debug, Error)]
pub enum BaasSetupError {
    /// The base URL cannot carry path segments.
    #[error("base url '{url}' cannot be used as an API root")]
    InvalidBaseUrl {
        /// Offending URL.
        url: String,
    },
    /// No application key was configured.
    #[error("application key must not be empty")]
    EmptyAppKey,
    /// The HTTP client could not be built.
    #[error("http client setup failed: {0}")]
    Client(#[from] reqwest::Error),
}

/// User API adapter performing one HTTP request per operation.
pub struct BaasHttpBackend {
    client: Client,
    login_url: Url,
    signup_url: Url,
    logout_url: Url,
    app_key: String,
    app_secret: Zeroizing<String>,
    session: Mutex<Option<ActiveUser>>,
}

impl BaasHttpBackend {
    /// Build an adapter with a reqwest client using the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the app key is blank, the base URL cannot hold
    /// a path, or the reqwest client cannot be constructed.
    pub fn new(config: BaasHttpConfig) -> Result<Self, BaasSetupError> {
        let app_key = config.app_key.trim().to_owned();
        if app_key.is_empty() {
            return Err(BaasSetupError::EmptyAppKey);
        }
        let login_url = endpoint(&config.base_url, &["user", &app_key, "login"])?;
        let signup_url = endpoint(&config.base_url, &["user", &app_key, ""])?;
        let logout_url = endpoint(&config.base_url, &["user", &app_key, "_logout"])?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            login_url,
            signup_url,
            logout_url,
            app_key,
            app_secret: config.app_secret,
            session: Mutex::new(None),
        })
    }

    fn session(&self) -> MutexGuard<'_, Option<ActiveUser>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn open_session(
        &self,
        url: &Url,
        credentials: &LoginCredentials,
    ) -> Result<ActiveUser, AuthError> {
        let response = self
            .client
            .post(url.clone())
            .basic_auth(&self.app_key, Some(self.app_secret.as_str()))
            .json(&CredentialsDto::from(credentials))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let active = parse_user(body.as_ref())?;
        *self.session() = Some(active.clone());
        Ok(active)
    }
}

fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, BaasSetupError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| BaasSetupError::InvalidBaseUrl {
            url: base.to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[async_trait]
impl AuthBackend for BaasHttpBackend {
    async fn logout(&self) -> Result<(), AuthError> {
        let token = self
            .session()
            .as_ref()
            .map(|active| Zeroizing::new(format!("Kinvey {}", active.session_token())));
        let Some(token) = token else {
            debug!("no active session to end");
            return Ok(());
        };

        let response = self
            .client
            .post(self.logout_url.clone())
            .header(AUTHORIZATION, token.as_str())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        // An expired token means the session is already gone.
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            self.session().take();
            return Ok(());
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, body.as_ref()))
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<ActiveUser, AuthError> {
        self.open_session(&self.login_url, credentials).await
    }

    async fn signup(&self, credentials: &LoginCredentials) -> Result<ActiveUser, AuthError> {
        self.open_session(&self.signup_url, credentials).await
    }

    fn active_user(&self) -> Option<ActiveUser> {
        self.session().clone()
    }
}

fn parse_user(body: &[u8]) -> Result<ActiveUser, AuthError> {
    let decoded: UserDto = serde_json::from_slice(body)
        .map_err(|error| AuthError::unknown(format!("invalid user payload: {error}")))?;
    Ok(decoded.into())
}

fn map_transport_error(error: reqwest::Error) -> AuthError {
    AuthError::network(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> AuthError {
    let envelope = serde_json::from_slice::<ErrorDto>(body).ok();
    match envelope.as_ref().map(|dto| dto.error.as_str()) {
        Some("UserAlreadyExists") => return AuthError::DuplicateAccount,
        Some("InvalidCredentials") => return AuthError::InvalidCredentials,
        _ => {}
    }

    let detail = match envelope {
        Some(ErrorDto {
            error,
            description: Some(description),
        }) => format!("status {}: {error}: {description}", status.as_u16()),
        Some(ErrorDto { error, .. }) => format!("status {}: {error}", status.as_u16()),
        None => {
            let preview = body_preview(body);
            if preview.is_empty() {
                format!("status {}", status.as_u16())
            } else {
                format!("status {}: {preview}", status.as_u16())
            }
        }
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AuthError::InvalidCredentials,
        StatusCode::CONFLICT => AuthError::DuplicateAccount,
        StatusCode::REQUEST_TIMEOUT
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => AuthError::network(detail),
        _ => AuthError::unknown(detail),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use super::*;
    use rstest::rstest;

    fn config(base_url: &str) -> BaasHttpConfig {
        BaasHttpConfig {
            base_url: Url::parse(base_url).expect("valid url"),
            app_key: "kid_app".to_owned(),
            app_secret: Zeroizing::new("secret".to_owned()),
            timeout: Duration::from_secs(5),
        }
    }

    #[rstest]
    #[case("https://baas.example.com")]
    #[case("https://baas.example.com/")]
    fn builds_user_endpoints_under_the_app_key(#[case] base_url: &str) {
        let backend = BaasHttpBackend::new(config(base_url)).expect("backend builds");
        assert_eq!(
            backend.login_url.as_str(),
            "https://baas.example.com/user/kid_app/login"
        );
        assert_eq!(
            backend.signup_url.as_str(),
            "https://baas.example.com/user/kid_app/"
        );
        assert_eq!(
            backend.logout_url.as_str(),
            "https://baas.example.com/user/kid_app/_logout"
        );
    }

    #[test]
    fn keeps_base_path_prefixes() {
        let backend =
            BaasHttpBackend::new(config("http://localhost:8080/api/")).expect("backend builds");
        assert_eq!(
            backend.login_url.as_str(),
            "http://localhost:8080/api/user/kid_app/login"
        );
    }

    #[test]
    fn rejects_blank_app_key() {
        let mut settings = config("https://baas.example.com");
        settings.app_key = "  ".to_owned();
        let err = BaasHttpBackend::new(settings)
            .err()
            .expect("blank key must fail");
        assert!(matches!(err, BaasSetupError::EmptyAppKey));
    }

    #[test]
    fn rejects_cannot_be_a_base_urls() {
        let err = BaasHttpBackend::new(config("mailto:ops@example.com"))
            .err()
            .expect("mailto cannot hold paths");
        assert!(matches!(err, BaasSetupError::InvalidBaseUrl { .. }));
    }

    #[rstest]
    #[case::unauthorised(StatusCode::UNAUTHORIZED, "{}", "invalidCredentials")]
    #[case::forbidden(StatusCode::FORBIDDEN, "", "invalidCredentials")]
    #[case::conflict(StatusCode::CONFLICT, "", "duplicateAccount")]
    #[case::named_duplicate(
        StatusCode::BAD_REQUEST,
        r#"{"error":"UserAlreadyExists","description":"taken"}"#,
        "duplicateAccount"
    )]
    #[case::named_credentials(
        StatusCode::BAD_REQUEST,
        r#"{"error":"InvalidCredentials"}"#,
        "invalidCredentials"
    )]
    #[case::unavailable(StatusCode::SERVICE_UNAVAILABLE, "", "network")]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, "", "network")]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, "oops", "unknown")]
    fn maps_http_statuses_to_auth_errors(
        #[case] status: StatusCode,
        #[case] body: &str,
        #[case] expected_kind: &str,
    ) {
        let error = map_status_error(status, body.as_bytes());
        assert_eq!(error.kind(), expected_kind, "unexpected mapping: {error:?}");
    }

    #[test]
    fn unknown_errors_carry_backend_description() {
        let error = map_status_error(
            StatusCode::BAD_REQUEST,
            br#"{"error":"MissingConfiguration","description":"no user collection"}"#,
        );
        assert_eq!(
            error,
            AuthError::unknown("status 400: MissingConfiguration: no user collection")
        );
    }

    #[test]
    fn long_bodies_are_truncated_in_details() {
        let body = "x".repeat(400);
        let AuthError::Unknown { detail } =
            map_status_error(StatusCode::INTERNAL_SERVER_ERROR, body.as_bytes())
        else {
            panic!("500 should map to Unknown");
        };
        assert!(detail.ends_with("..."));
        assert!(detail.len() < 200);
    }

    #[test]
    fn parses_user_payload_into_active_user() {
        let body = r#"{
            "_id": "5f1c",
            "username": "bob",
            "_kmd": { "authtoken": "tok-1", "lmt": "2024-01-01T00:00:00.000Z" }
        }"#;
        let active = parse_user(body.as_bytes()).expect("payload decodes");
        assert_eq!(active.username(), "bob");
        assert_eq!(active.session_token(), "tok-1");
    }

    #[test]
    fn rejects_user_payload_without_token() {
        let error = parse_user(br#"{"username":"bob"}"#).expect_err("missing _kmd");
        assert_eq!(error.kind(), "unknown");
    }

    #[tokio::test]
    async fn logout_without_session_skips_the_network() {
        let backend =
            BaasHttpBackend::new(config("http://127.0.0.1:9")).expect("backend builds");
        backend.logout().await.expect("nothing to end");
        assert!(backend.active_user().is_none());
    }
}
