use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use url::Url;

use crate::auth::Token;
use crate::error::{ReporterError, Result};
use crate::payload::StatusPayload;

use super::types::InstallationToken;

/// User-Agent sent with every GitHub request.
pub const USER_AGENT: &str = "codepipeline-status-reporter";

/// Media type GitHub expects on the installation token endpoint.
const INSTALLATION_TOKEN_ACCEPT: &str = "application/vnd.github.machine-man-preview+json";

/// GitHub REST API client for the two calls the reporter makes.
#[derive(Clone)]
pub struct GitHubClient {
    /// HTTP client
    client: Client,
    /// API root, always ending in '/'
    api_url: Url,
}

impl GitHubClient {
    /// Create a new GitHub API client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - GitHub API base URL (e.g., "https://api.github.com" or
    ///   "https://ghe.example.com/api/v3")
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                ReporterError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let api_url = Url::parse(&normalized)
            .map_err(|e| ReporterError::Configuration(format!("Invalid GitHub API URL: {e}")))?;

        Ok(Self { client, api_url })
    }

    /// Returns the API root this client talks to.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.api_url
            .join(path)
            .map_err(|e| {
                ReporterError::Configuration(format!("Invalid GitHub endpoint '{path}': {e}"))
            })
    }

    /// Exchange a signed App assertion for an installation access token.
    ///
    /// # Arguments
    ///
    /// * `installation_id` - GitHub App installation id
    /// * `assertion` - RS256-signed JWT identifying the App
    ///
    /// # Errors
    ///
    /// Returns a credential error on transport failure, a non-2xx response,
    /// or a body without a `token` field.
    pub async fn create_installation_token(
        &self,
        installation_id: &str,
        assertion: &str,
    ) -> Result<Token> {
        let url = self.endpoint(&format!("app/installations/{installation_id}/access_tokens"))?;
        debug!("POST {url}");

        let response = self
            .client
            .post(url)
            .header(ACCEPT, INSTALLATION_TOKEN_ACCEPT)
            .bearer_auth(assertion)
            .send()
            .await
            .map_err(|e| {
                ReporterError::Credential(format!("Token exchange request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(ReporterError::TokenExchange {
                status: status.as_u16(),
                body,
            });
        }

        let installation: InstallationToken = response.json().await.map_err(|e| {
            ReporterError::Credential(format!("Failed to parse installation token response: {e}"))
        })?;

        if let Some(expires_at) = installation.expires_at {
            debug!("Installation token expires at {expires_at}");
        }

        Ok(Token::from(installation.token))
    }

    /// Attach a status to a commit.
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner/organization
    /// * `repo` - Repository name
    /// * `sha` - Commit SHA
    /// * `payload` - Status body
    /// * `token` - Personal access token or installation token
    ///
    /// # Errors
    ///
    /// Returns a report error on transport failure or a non-2xx response.
    pub async fn create_commit_status(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        payload: &StatusPayload,
        token: &Token,
    ) -> Result<()> {
        let url = self.endpoint(&format!("repos/{owner}/{repo}/statuses/{sha}"))?;
        debug!("POST {url}");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("token {}", token.as_str()))
            .json(payload)
            .send()
            .await
            .map_err(|e| ReporterError::Report(format!("Commit status request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(ReporterError::StatusRejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
