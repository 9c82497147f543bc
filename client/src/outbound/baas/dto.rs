//! Wire types for the user API.

use serde::{Deserialize, Serialize};

use crate::domain::{ActiveUser, LoginCredentials};

/// Body sent for both login and sign-up.
#[derive(Debug, Serialize)]
pub(super) struct CredentialsDto<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a LoginCredentials> for CredentialsDto<'a> {
    fn from(value: &'a LoginCredentials) -> Self {
        Self {
            username: value.username(),
            password: value.password(),
        }
    }
}

/// Account metadata block carrying the session token.
#[derive(Debug, Deserialize)]
pub(super) struct KmdDto {
    pub authtoken: String,
}

/// User returned by login and sign-up.
#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub username: String,
    #[serde(rename = "_kmd")]
    pub kmd: KmdDto,
}

impl From<UserDto> for ActiveUser {
    fn from(value: UserDto) -> Self {
        Self::new(value.username, value.kmd.authtoken)
    }
}

/// Error envelope returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorDto {
    pub error: String,
    #[serde(default)]
    pub description: Option<String>,
}
