use async_trait::async_trait;
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::Client;
use log::debug;

use crate::error::{ReporterError, Result};

/// Source of the raw GitHub secret (personal access token or App private key).
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Returns the decrypted value stored under `name`.
    async fn get_secret(&self, name: &str) -> Result<String>;
}

/// Secret store backed by SSM Parameter Store `SecureString` parameters.
#[derive(Clone)]
pub struct SsmSecretStore {
    client: Client,
}

impl SsmSecretStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl SecretStore for SsmSecretStore {
    async fn get_secret(&self, name: &str) -> Result<String> {
        debug!("GetParameter {name}");

        let output = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
            .map_err(|e| {
                ReporterError::Credential(format!(
                    "GetParameter {name} failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        output
            .parameter()
            .and_then(|parameter| parameter.value())
            .map(str::to_string)
            .ok_or_else(|| ReporterError::Credential(format!("parameter {name} has no value")))
    }
}
