use clap::Args;
use log::debug;
use url::Url;

use crate::auth::AuthMode;
use crate::error::{ReporterError, Result};
use crate::filter::BranchWhitelist;

/// `GITHUB_AUTH_TYPE` value that selects GitHub App authentication.
pub const GITHUB_APP_AUTH_TYPE: &str = "GitHub App";

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Region the console links point at, independent of the event's region.
pub const DEFAULT_CONSOLE_REGION: &str = "us-east-1";

/// Raw settings as read from the environment (or the matching flags).
#[derive(Debug, Clone, Default, Args)]
pub struct SettingsArgs {
    /// "GitHub App" to mint installation tokens; anything else uses the secret as a token
    #[arg(long, env = "GITHUB_AUTH_TYPE")]
    pub github_auth_type: Option<String>,

    /// SSM parameter holding the token or App private key
    #[arg(long, env = "GITHUB_PARAMETER")]
    pub github_parameter: Option<String>,

    /// GitHub App id (App authentication only)
    #[arg(long, env = "GITHUB_APP_ID")]
    pub github_app_id: Option<String>,

    /// GitHub App installation id (App authentication only)
    #[arg(long, env = "GITHUB_APP_INSTALL_ID")]
    pub github_app_install_id: Option<String>,

    /// Comma-separated "repo/branch" pairs allowed to report; empty allows all
    #[arg(long, env = "BRANCH_WHITELIST")]
    pub branch_whitelist: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    pub github_api_url: Option<String>,

    /// Region used in CodePipeline console links
    #[arg(long, env = "CONSOLE_REGION")]
    pub console_region: Option<String>,
}

/// Validated, immutable reporter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub auth_mode: AuthMode,
    /// Name of the SSM parameter holding the GitHub secret
    pub github_parameter: String,
    pub branch_whitelist: BranchWhitelist,
    pub github_api_url: String,
    pub console_region: String,
}

impl Settings {
    /// Validate raw settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a required value is missing or empty,
    /// or when the GitHub API URL does not parse.
    pub fn from_args(args: SettingsArgs) -> Result<Self> {
        let auth_type = required(args.github_auth_type, "GITHUB_AUTH_TYPE")?;
        let github_parameter = required(args.github_parameter, "GITHUB_PARAMETER")?;

        let auth_mode = if auth_type == GITHUB_APP_AUTH_TYPE {
            AuthMode::GitHubApp {
                app_id: required(args.github_app_id, "GITHUB_APP_ID")?,
                installation_id: required(args.github_app_install_id, "GITHUB_APP_INSTALL_ID")?,
            }
        } else {
            AuthMode::PassThrough
        };

        let github_api_url = args
            .github_api_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());
        Url::parse(&github_api_url).map_err(|e| {
            ReporterError::Configuration(format!(
                "GITHUB_API_URL '{github_api_url}' is invalid: {e}"
            ))
        })?;

        let console_region = args
            .console_region
            .filter(|region| !region.is_empty())
            .unwrap_or_else(|| DEFAULT_CONSOLE_REGION.to_string());

        let branch_whitelist =
            BranchWhitelist::parse(args.branch_whitelist.as_deref().unwrap_or(""));
        if !branch_whitelist.is_empty() {
            debug!("Branch whitelist: {branch_whitelist}");
        }

        Ok(Self {
            auth_mode,
            github_parameter,
            branch_whitelist,
            github_api_url,
            console_region,
        })
    }
}

fn required(value: Option<String>, name: &str) -> Result<String> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ReporterError::Configuration(format!(
            "environment variable {name} is required"
        ))),
    }
}
