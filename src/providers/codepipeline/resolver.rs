use log::debug;

use crate::error::{ReporterError, Result};

use super::types::{PipelineDefinition, RepoContext, SourceLocation};
use super::DeliveryService;

/// Derives the repository, branch and commit a pipeline execution built.
pub struct ContextResolver<'a, D: DeliveryService + ?Sized> {
    service: &'a D,
}

impl<'a, D: DeliveryService + ?Sized> ContextResolver<'a, D> {
    pub fn new(service: &'a D) -> Self {
        Self { service }
    }

    /// Reads owner, repository and branch from the pipeline's source action.
    ///
    /// Precondition: the GitHub source action is the first action of the
    /// first stage. Pipelines shaped differently are not searched.
    pub async fn source_location(&self, pipeline_name: &str) -> Result<SourceLocation> {
        let definition = self.service.get_pipeline(pipeline_name).await?;
        source_location_of(&definition)
    }

    /// Resolves the full commit context for one execution.
    ///
    /// Owner, repository and branch are read again from the pipeline
    /// definition rather than taken from an earlier lookup.
    pub async fn resolve(&self, pipeline_name: &str, execution_id: &str) -> Result<RepoContext> {
        let source = self.source_location(pipeline_name).await?;

        let execution = self
            .service
            .get_pipeline_execution(pipeline_name, execution_id)
            .await?;

        let artifact = execution.artifact_revisions.first().ok_or_else(|| {
            ReporterError::Resolution(format!(
                "execution {} of {pipeline_name} has no artifact revisions",
                execution.execution_id
            ))
        })?;
        let revision_url = artifact.revision_url.as_deref().ok_or_else(|| {
            ReporterError::Resolution(format!(
                "artifact '{}' of execution {} has no revision URL",
                artifact.name.as_deref().unwrap_or("<unnamed>"),
                execution.execution_id
            ))
        })?;

        debug!("Revision URL for {pipeline_name}/{execution_id}: {revision_url}");

        let commit_sha = commit_sha_from_revision_url(revision_url)?;

        Ok(RepoContext {
            owner: source.owner,
            repo: source.repo,
            branch: source.branch,
            commit_sha,
        })
    }
}

fn source_location_of(definition: &PipelineDefinition) -> Result<SourceLocation> {
    let stage = definition.stages.first().ok_or_else(|| {
        ReporterError::Resolution(format!("pipeline {} has no stages", definition.name))
    })?;
    let action = stage.actions.first().ok_or_else(|| {
        ReporterError::Resolution(format!(
            "pipeline {} has no source action in its first stage '{}'",
            definition.name, stage.name
        ))
    })?;

    let field = |key: &str| {
        action.configuration.get(key).cloned().ok_or_else(|| {
            ReporterError::Resolution(format!(
                "source action '{}' in stage '{}' of pipeline {} has no {key} configuration",
                action.name, stage.name, definition.name
            ))
        })
    };

    Ok(SourceLocation {
        owner: field("Owner")?,
        repo: field("Repo")?,
        branch: field("Branch")?,
    })
}

/// Extracts the commit SHA from a revision URL of the form
/// `https://github.com/<owner>/<repo>/commit/<sha>`.
pub fn commit_sha_from_revision_url(url: &str) -> Result<String> {
    let parse_error = |reason: &str| ReporterError::Parse {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let segments: Vec<&str> = url.split('/').collect();
    if segments.len() < 5 {
        return Err(parse_error("expected at least 5 '/'-delimited segments"));
    }

    let (sha, rest) = segments
        .split_last()
        .ok_or_else(|| parse_error("empty URL"))?;

    if rest.last() != Some(&"commit") {
        return Err(parse_error("expected '/commit/<sha>' suffix"));
    }

    if sha.is_empty() {
        return Err(parse_error("empty commit SHA"));
    }

    Ok((*sha).to_string())
}
