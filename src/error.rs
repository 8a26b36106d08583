use thiserror::Error;

/// Errors that can occur while serving an import request.
///
/// Every variant is terminal for the request that raised it; the HTTP layer
/// maps it to a status code through [`GatewayError::status_code`].
#[derive(Error, Debug)]
pub enum GatewayError {
    /// A credential, binary or other startup setting is missing
    #[error("{0}")]
    Configuration(String),

    /// The fetch target or the remote model answered with a failure
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// The external importer exited with a non-zero status
    #[error("Import failed: {0}")]
    ProcessFailure(String),

    /// The importer, the page fetch or the remote model ran out of time
    #[error("{0}")]
    Timeout(String),

    /// A conversion succeeded but produced no Cooklang text
    #[error("Conversion produced no Cooklang output")]
    EmptyOutput,
}

impl GatewayError {
    pub fn configuration(message: impl Into<String>) -> Self {
        GatewayError::Configuration(message.into())
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        GatewayError::Upstream {
            status,
            message: message.into(),
        }
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::Configuration(_) => 500,
            GatewayError::Upstream { status, .. } => *status,
            GatewayError::ProcessFailure(_) => 500,
            GatewayError::Timeout(_) => 504,
            GatewayError::EmptyOutput => 500,
        }
    }
}
