use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Pipeline definition as returned by `GetPipeline`, reduced to what the
/// reporter reads.
#[derive(Debug, Clone, Default)]
pub struct PipelineDefinition {
    /// Pipeline name
    pub name: String,
    /// Stages in declaration order
    pub stages: Vec<StageDefinition>,
}

/// A stage within a pipeline definition.
#[derive(Debug, Clone, Default)]
pub struct StageDefinition {
    pub name: String,
    pub actions: Vec<ActionDefinition>,
}

/// An action within a stage, with its free-form configuration map
/// (e.g. `Owner`, `Repo`, `Branch` for a GitHub source action).
#[derive(Debug, Clone, Default)]
pub struct ActionDefinition {
    pub name: String,
    pub configuration: HashMap<String, String>,
}

/// Pipeline execution as returned by `GetPipelineExecution`.
#[derive(Debug, Clone, Default)]
pub struct ExecutionRecord {
    pub execution_id: String,
    /// Source revisions the execution was started with
    pub artifact_revisions: Vec<ArtifactRevision>,
}

/// A source artifact revision of an execution.
#[derive(Debug, Clone, Default)]
pub struct ArtifactRevision {
    pub name: Option<String>,
    /// Link to the commit, e.g. `https://github.com/owner/repo/commit/<sha>`
    pub revision_url: Option<String>,
}

/// Repository and branch a pipeline checks out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

/// Everything needed to address a commit status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoContext {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub commit_sha: String,
}
