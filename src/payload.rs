use serde::{Deserialize, Serialize};

use crate::event::ExecutionState;
use crate::providers::codepipeline::links::console_url;

/// Commit status states accepted by the GitHub status API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitState {
    Pending,
    Success,
    Failure,
    Error,
}

/// Request body for `POST /repos/{owner}/{repo}/statuses/{sha}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPayload {
    pub state: CommitState,
    /// Label GitHub groups statuses by; always the stage name
    pub context: String,
    pub target_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Maps a stage transition onto a commit status.
///
/// States other than STARTED, FAILED and SUCCEEDED produce an `error` status
/// without a description.
pub fn build(
    pipeline_name: &str,
    state: &ExecutionState,
    stage: &str,
    console_region: &str,
) -> StatusPayload {
    let (state, description) = match state {
        ExecutionState::Started => (CommitState::Pending, Some(format!("Running {stage}"))),
        ExecutionState::Failed => (CommitState::Failure, Some(format!("Failed to run {stage}"))),
        ExecutionState::Succeeded => (
            CommitState::Success,
            Some(format!("Successfully ran {stage}")),
        ),
        ExecutionState::Other(_) => (CommitState::Error, None),
    };

    StatusPayload {
        state,
        context: stage.to_string(),
        target_url: console_url(console_region, pipeline_name),
        description,
    }
}
