//! In-memory stand-ins for the AWS collaborators.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{ReporterError, Result};

use super::codepipeline::{
    ActionDefinition, ArtifactRevision, DeliveryService, ExecutionRecord, PipelineDefinition,
    StageDefinition,
};
use super::ssm::SecretStore;

pub struct FakeDeliveryService {
    pub definition: PipelineDefinition,
    pub execution: ExecutionRecord,
    /// Make `get_pipeline` fail the way an unknown pipeline does.
    pub fail_pipeline: bool,
    /// Make `get_pipeline_execution` fail the way an unknown execution does.
    pub fail_execution: bool,
    pub get_pipeline_calls: AtomicUsize,
    pub get_execution_calls: AtomicUsize,
}

impl FakeDeliveryService {
    /// A pipeline whose first stage checks out `owner/repo@branch` and whose
    /// execution carries `revision_url`.
    pub fn github_source(owner: &str, repo: &str, branch: &str, revision_url: &str) -> Self {
        let configuration = HashMap::from([
            ("Owner".to_string(), owner.to_string()),
            ("Repo".to_string(), repo.to_string()),
            ("Branch".to_string(), branch.to_string()),
            ("PollForSourceChanges".to_string(), "false".to_string()),
        ]);

        Self {
            definition: PipelineDefinition {
                name: "app-pipeline".to_string(),
                stages: vec![
                    StageDefinition {
                        name: "Source".to_string(),
                        actions: vec![ActionDefinition {
                            name: "GitHubSource".to_string(),
                            configuration,
                        }],
                    },
                    StageDefinition {
                        name: "Deploy".to_string(),
                        actions: vec![ActionDefinition {
                            name: "DeployApp".to_string(),
                            configuration: HashMap::new(),
                        }],
                    },
                ],
            },
            execution: ExecutionRecord {
                execution_id: "exec-1".to_string(),
                artifact_revisions: vec![ArtifactRevision {
                    name: Some("SourceArtifact".to_string()),
                    revision_url: Some(revision_url.to_string()),
                }],
            },
            fail_pipeline: false,
            fail_execution: false,
            get_pipeline_calls: AtomicUsize::new(0),
            get_execution_calls: AtomicUsize::new(0),
        }
    }

    pub fn pipeline_lookups(&self) -> usize {
        self.get_pipeline_calls.load(Ordering::SeqCst)
    }

    pub fn execution_lookups(&self) -> usize {
        self.get_execution_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeliveryService for FakeDeliveryService {
    async fn get_pipeline(&self, pipeline_name: &str) -> Result<PipelineDefinition> {
        self.get_pipeline_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_pipeline {
            return Err(ReporterError::Resolution(format!(
                "GetPipeline failed for {pipeline_name}: PipelineNotFoundException"
            )));
        }
        Ok(self.definition.clone())
    }

    async fn get_pipeline_execution(
        &self,
        pipeline_name: &str,
        execution_id: &str,
    ) -> Result<ExecutionRecord> {
        self.get_execution_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_execution {
            return Err(ReporterError::Resolution(format!(
                "GetPipelineExecution failed for {pipeline_name}/{execution_id}: \
                 PipelineExecutionNotFoundException"
            )));
        }
        Ok(self.execution.clone())
    }
}

pub struct FakeSecretStore {
    pub secrets: HashMap<String, String>,
    pub lookups: AtomicUsize,
}

impl FakeSecretStore {
    pub fn with_secret(name: &str, value: &str) -> Self {
        Self {
            secrets: HashMap::from([(name.to_string(), value.to_string())]),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretStore for FakeSecretStore {
    async fn get_secret(&self, name: &str) -> Result<String> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.secrets
            .get(name)
            .cloned()
            .ok_or_else(|| ReporterError::Credential(format!("parameter {name} not found")))
    }
}
