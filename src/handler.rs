use log::{debug, info};
use serde::Serialize;

use crate::auth::obtain_token;
use crate::config::Settings;
use crate::error::Result;
use crate::event::PipelineEvent;
use crate::filter::{skip_reason, SkipReason};
use crate::payload::{self, StatusPayload};
use crate::providers::codepipeline::{ContextResolver, DeliveryService, RepoContext};
use crate::providers::github::GitHubClient;
use crate::providers::ssm::SecretStore;

/// Result of a successful invocation.
///
/// A skipped event is a normal termination, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Reported {
        commit: RepoContext,
        payload: StatusPayload,
    },
    Skipped {
        reason: SkipReason,
    },
}

/// Turns one CodePipeline stage event into at most one GitHub commit status.
///
/// Holds no per-invocation state, so one instance serves every invocation
/// of a warm Lambda container.
pub struct Handler<D, S> {
    settings: Settings,
    delivery: D,
    secrets: S,
    github: GitHubClient,
}

impl<D: DeliveryService, S: SecretStore> Handler<D, S> {
    /// # Errors
    ///
    /// Returns a configuration error if the GitHub client cannot be built.
    pub fn new(settings: Settings, delivery: D, secrets: S) -> Result<Self> {
        let github = GitHubClient::new(&settings.github_api_url)?;
        debug!("Reporting to GitHub API at {}", github.api_url());

        Ok(Self {
            settings,
            delivery,
            secrets,
            github,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Process one event.
    ///
    /// # Errors
    ///
    /// Any failure to resolve the commit, obtain a credential or post the
    /// status aborts the invocation; nothing is retried.
    pub async fn handle(&self, event: &PipelineEvent) -> Result<Outcome> {
        info!(
            "Received {} event for stage {} of {} (execution {}, region {})",
            event.state(),
            event.stage(),
            event.pipeline(),
            event.execution_id(),
            event.region
        );

        let resolver = ContextResolver::new(&self.delivery);

        let source = resolver.source_location(event.pipeline()).await?;
        if let Some(reason) = skip_reason(event, &source, &self.settings.branch_whitelist) {
            match &reason {
                SkipReason::BranchNotWhitelisted { repo, branch } => {
                    info!("Discarding non-whitelisted branch event for {repo}/{branch}")
                }
                SkipReason::SourceStage => info!("Discarding Source stage events"),
            }
            return Ok(Outcome::Skipped { reason });
        }

        let commit = resolver
            .resolve(event.pipeline(), event.execution_id())
            .await?;
        info!(
            "Resolved {}/{}@{} ({})",
            commit.owner, commit.repo, commit.branch, commit.commit_sha
        );

        let secret = self
            .secrets
            .get_secret(&self.settings.github_parameter)
            .await?;
        let token = obtain_token(&self.github, &secret, &self.settings.auth_mode)
            .await?;

        let status = payload::build(
            event.pipeline(),
            &event.state(),
            event.stage(),
            &self.settings.console_region,
        );

        self.github
            .create_commit_status(
                &commit.owner,
                &commit.repo,
                &commit.commit_sha,
                &status,
                &token,
            )
            .await?;

        info!(
            "Posted {:?} status '{}' to {}/{}@{}",
            status.state, status.context, commit.owner, commit.repo, commit.commit_sha
        );

        Ok(Outcome::Reported {
            commit,
            payload: status,
        })
    }
}
