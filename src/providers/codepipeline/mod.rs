mod client;
pub mod links;
mod resolver;
mod types;

pub use client::CodePipelineClient;
pub use resolver::{commit_sha_from_revision_url, ContextResolver};
pub use types::{
    ActionDefinition, ArtifactRevision, ExecutionRecord, PipelineDefinition, RepoContext,
    SourceLocation, StageDefinition,
};

use async_trait::async_trait;

use crate::error::Result;

/// Read access to the CodePipeline control API.
///
/// Implemented by [`CodePipelineClient`] against AWS; tests substitute
/// in-memory fakes.
#[async_trait]
pub trait DeliveryService: Send + Sync {
    /// Fetches the stored definition of `pipeline_name`.
    async fn get_pipeline(&self, pipeline_name: &str) -> Result<PipelineDefinition>;

    /// Fetches one execution of `pipeline_name` by id.
    async fn get_pipeline_execution(
        &self,
        pipeline_name: &str,
        execution_id: &str,
    ) -> Result<ExecutionRecord>;
}
