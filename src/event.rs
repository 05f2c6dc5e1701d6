use std::fmt;

use serde::{Deserialize, Serialize};

/// CodePipeline "Stage Execution State Change" event as delivered by EventBridge.
///
/// Only the fields the reporter reads are modelled; everything else in the
/// envelope (`source`, `detail-type`, `time`, ...) is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineEvent {
    /// Region the pipeline runs in
    pub region: String,
    /// Event detail carrying the pipeline and stage state
    pub detail: PipelineEventDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineEventDetail {
    /// Pipeline name
    pub pipeline: String,
    /// Execution id of the run that changed state
    #[serde(rename = "execution-id")]
    pub execution_id: String,
    /// Lifecycle state (e.g. "STARTED", "SUCCEEDED")
    pub state: String,
    /// Stage whose state changed
    pub stage: String,
}

impl PipelineEvent {
    pub fn pipeline(&self) -> &str {
        &self.detail.pipeline
    }

    pub fn execution_id(&self) -> &str {
        &self.detail.execution_id
    }

    pub fn stage(&self) -> &str {
        &self.detail.stage
    }

    pub fn state(&self) -> ExecutionState {
        ExecutionState::from(self.detail.state.as_str())
    }
}

/// Stage lifecycle state carried by the event.
///
/// CodePipeline emits more states than the three that map onto a commit
/// status (`CANCELED`, `RESUMED`, `STOPPING`, ...); those are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionState {
    Started,
    Failed,
    Succeeded,
    Other(String),
}

impl From<&str> for ExecutionState {
    fn from(value: &str) -> Self {
        match value {
            "STARTED" => Self::Started,
            "FAILED" => Self::Failed,
            "SUCCEEDED" => Self::Succeeded,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => f.write_str("STARTED"),
            Self::Failed => f.write_str("FAILED"),
            Self::Succeeded => f.write_str("SUCCEEDED"),
            Self::Other(state) => f.write_str(state),
        }
    }
}
