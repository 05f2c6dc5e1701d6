use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use log::info;

use crate::error::{ReporterError, Result};
use crate::providers::github::{AppClaims, GitHubClient};

/// Lifetime of the App assertion; GitHub rejects anything above ten minutes.
pub const ASSERTION_TTL_SECONDS: i64 = 600;

/// Bearer credential for the GitHub API.
///
/// `Debug` is redacted so tokens never reach the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// How the stored secret becomes a GitHub credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// The secret is already a usable token (personal access token).
    PassThrough,
    /// The secret is a GitHub App private key used to mint installation tokens.
    GitHubApp {
        app_id: String,
        installation_id: String,
    },
}

/// Signs the short-lived JWT a GitHub App presents to the token endpoint.
///
/// # Arguments
///
/// * `private_key_pem` - App private key in PEM form (PKCS#1 or PKCS#8)
/// * `app_id` - GitHub App id, used as the issuer
/// * `issued_at` - Clock reading to stamp into `iat`
///
/// # Errors
///
/// Returns a credential error if the key cannot be parsed or signing fails.
pub fn sign_app_assertion(
    private_key_pem: &str,
    app_id: &str,
    issued_at: DateTime<Utc>,
) -> Result<String> {
    let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes()).map_err(|e| {
        ReporterError::Credential(format!("Invalid GitHub App private key: {e}"))
    })?;

    let claims = AppClaims {
        iat: issued_at.timestamp(),
        exp: (issued_at + Duration::seconds(ASSERTION_TTL_SECONDS)).timestamp(),
        iss: app_id.to_string(),
    };

    encode(&Header::new(Algorithm::RS256), &claims, &key)
        .map_err(|e| ReporterError::Credential(format!("Failed to sign App assertion: {e}")))
}

/// Turns the raw secret into a token according to `mode`.
///
/// App mode mints a fresh installation token on every call; nothing is cached.
pub async fn obtain_token(github: &GitHubClient, secret: &str, mode: &AuthMode) -> Result<Token> {
    match mode {
        AuthMode::PassThrough => Ok(Token::from(secret)),
        AuthMode::GitHubApp {
            app_id,
            installation_id,
        } => {
            let assertion = sign_app_assertion(secret, app_id, Utc::now())?;
            let token = github
                .create_installation_token(installation_id, &assertion)
                .await?;
            info!("Obtained installation token for GitHub App {app_id}");
            Ok(token)
        }
    }
}
