use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReporterError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Failed to resolve pipeline context: {0}")]
    Resolution(String),

    #[error("Malformed revision URL '{url}': {reason}")]
    Parse { url: String, reason: String },

    #[error("Failed to obtain GitHub credential: {0}")]
    Credential(String),

    #[error("GitHub rejected token exchange (status {status}): {body}")]
    TokenExchange { status: u16, body: String },

    #[error("Failed to report commit status: {0}")]
    Report(String),

    #[error("GitHub rejected commit status (status {status}): {body}")]
    StatusRejected { status: u16, body: String },
}

impl ReporterError {
    /// Short name of the failure class, used in logs and invocation errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Resolution(_) => "resolution",
            Self::Parse { .. } => "parse",
            Self::Credential(_) | Self::TokenExchange { .. } => "credential",
            Self::Report(_) | Self::StatusRejected { .. } => "report",
        }
    }

    /// Whether the error came from acquiring the GitHub credential, either
    /// locally (bad key, secret lookup) or from the installation token endpoint.
    pub fn is_credential(&self) -> bool {
        matches!(self, Self::Credential(_) | Self::TokenExchange { .. })
    }

    /// Whether the error came from the commit status call itself.
    pub fn is_report(&self) -> bool {
        matches!(self, Self::Report(_) | Self::StatusRejected { .. })
    }
}

pub type Result<T> = std::result::Result<T, ReporterError>;
