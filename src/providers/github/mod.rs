mod client;
mod types;

#[cfg(test)]
mod tests;

pub use client::{GitHubClient, USER_AGENT};
pub use types::{AppClaims, InstallationToken};
