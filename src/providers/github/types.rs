use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response of `POST /app/installations/{id}/access_tokens`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallationToken {
    /// Installation access token
    pub token: String,
    /// When the token stops being accepted (one hour after issue)
    pub expires_at: Option<DateTime<Utc>>,
}

/// Claims of the JWT a GitHub App presents to request an installation token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppClaims {
    /// Issued at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
    /// GitHub App id
    pub iss: String,
}
