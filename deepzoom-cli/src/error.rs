//! CLI error type.

use std::fmt;

use deepzoom::DeepZoomError;

/// Errors surfaced by the command-line tools.
///
/// Every variant maps to exit status 1.
#[derive(Debug)]
pub enum CliError {
    /// Invalid command-line arguments the library never sees.
    Config(String),

    /// Failure inside the pyramid pipeline.
    DeepZoom(DeepZoomError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => {
                write!(f, "Configuration error: {}", msg)
            }
            CliError::DeepZoom(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(_) => None,
            CliError::DeepZoom(e) => Some(e),
        }
    }
}

impl From<DeepZoomError> for CliError {
    fn from(e: DeepZoomError) -> Self {
        CliError::DeepZoom(e)
    }
}
