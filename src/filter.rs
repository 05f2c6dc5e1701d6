use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::event::PipelineEvent;
use crate::providers::codepipeline::SourceLocation;

/// Stage name CodePipeline gives the checkout stage; its events never become statuses.
pub const SOURCE_STAGE: &str = "Source";

/// Set of "repo/branch" pairs allowed to report.
///
/// An empty whitelist allows every repository and branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchWhitelist {
    entries: HashSet<String>,
}

impl BranchWhitelist {
    /// Parses the comma-separated `BRANCH_WHITELIST` value.
    ///
    /// Entries are compared verbatim, so surrounding whitespace is significant.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::default();
        }

        Self {
            entries: raw.split(',').map(str::to_string).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn allows(&self, repo: &str, branch: &str) -> bool {
        self.is_empty() || self.entries.contains(&format!("{repo}/{branch}"))
    }
}

impl fmt::Display for BranchWhitelist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<&str> = self.entries.iter().map(String::as_str).collect();
        entries.sort_unstable();
        f.write_str(&entries.join(","))
    }
}

/// Why an event was dropped without posting a status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    BranchNotWhitelisted { repo: String, branch: String },
    SourceStage,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BranchNotWhitelisted { repo, branch } => {
                write!(f, "non-whitelisted branch {repo}/{branch}")
            }
            Self::SourceStage => f.write_str("Source stage event"),
        }
    }
}

/// Returns the reason to drop `event`, or `None` when it should be reported.
///
/// The whitelist is checked before the stage so a non-whitelisted Source
/// event is reported as a whitelist miss.
pub fn skip_reason(
    event: &PipelineEvent,
    source: &SourceLocation,
    whitelist: &BranchWhitelist,
) -> Option<SkipReason> {
    if !whitelist.allows(&source.repo, &source.branch) {
        return Some(SkipReason::BranchNotWhitelisted {
            repo: source.repo.clone(),
            branch: source.branch.clone(),
        });
    }

    if event.stage() == SOURCE_STAGE {
        return Some(SkipReason::SourceStage);
    }

    None
}

pub fn should_report(
    event: &PipelineEvent,
    source: &SourceLocation,
    whitelist: &BranchWhitelist,
) -> bool {
    skip_reason(event, source, whitelist).is_none()
}
