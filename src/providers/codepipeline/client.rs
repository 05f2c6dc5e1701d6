use async_trait::async_trait;
use aws_sdk_codepipeline::error::DisplayErrorContext;
use aws_sdk_codepipeline::Client;
use log::debug;

use crate::error::{ReporterError, Result};

use super::types::{
    ActionDefinition, ArtifactRevision, ExecutionRecord, PipelineDefinition, StageDefinition,
};
use super::DeliveryService;

/// CodePipeline control API client backed by the AWS SDK.
#[derive(Clone)]
pub struct CodePipelineClient {
    client: Client,
}

impl CodePipelineClient {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl DeliveryService for CodePipelineClient {
    async fn get_pipeline(&self, pipeline_name: &str) -> Result<PipelineDefinition> {
        debug!("GetPipeline {pipeline_name}");

        let output = self
            .client
            .get_pipeline()
            .name(pipeline_name)
            .send()
            .await
            .map_err(|e| {
                ReporterError::Resolution(format!(
                    "GetPipeline {pipeline_name} failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let pipeline = output.pipeline().ok_or_else(|| {
            ReporterError::Resolution(format!("GetPipeline {pipeline_name} returned no pipeline"))
        })?;

        let stages = pipeline
            .stages()
            .iter()
            .map(|stage| StageDefinition {
                name: stage.name().to_string(),
                actions: stage
                    .actions()
                    .iter()
                    .map(|action| ActionDefinition {
                        name: action.name().to_string(),
                        configuration: action.configuration().cloned().unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();

        Ok(PipelineDefinition {
            name: pipeline.name().to_string(),
            stages,
        })
    }

    async fn get_pipeline_execution(
        &self,
        pipeline_name: &str,
        execution_id: &str,
    ) -> Result<ExecutionRecord> {
        debug!("GetPipelineExecution {pipeline_name}/{execution_id}");

        let output = self
            .client
            .get_pipeline_execution()
            .pipeline_name(pipeline_name)
            .pipeline_execution_id(execution_id)
            .send()
            .await
            .map_err(|e| {
                ReporterError::Resolution(format!(
                    "GetPipelineExecution {pipeline_name}/{execution_id} failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let execution = output.pipeline_execution().ok_or_else(|| {
            ReporterError::Resolution(format!(
                "GetPipelineExecution {pipeline_name}/{execution_id} returned no execution"
            ))
        })?;

        Ok(ExecutionRecord {
            execution_id: execution
                .pipeline_execution_id()
                .unwrap_or(execution_id)
                .to_string(),
            artifact_revisions: execution
                .artifact_revisions()
                .iter()
                .map(|revision| ArtifactRevision {
                    name: revision.name().map(str::to_string),
                    revision_url: revision.revision_url().map(str::to_string),
                })
                .collect(),
        })
    }
}
