//! Tapo account credentials.

use serde::Deserialize;

/// Tapo cloud account used to authenticate against each plug.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct TapoCredentials {
    /// Account e-mail.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl TapoCredentials {
    /// Whether both username and password are set.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl std::fmt::Debug for TapoCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapoCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
