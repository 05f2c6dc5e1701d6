pub mod codepipeline;
pub mod github;
pub mod ssm;

#[cfg(test)]
pub(crate) mod fakes;

pub use codepipeline::{CodePipelineClient, ContextResolver, DeliveryService};
pub use github::GitHubClient;
pub use ssm::{SecretStore, SsmSecretStore};
