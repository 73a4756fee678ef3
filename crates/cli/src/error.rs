//! CLI error type.

use crm_client::{ApiError, ConfigError};
use thiserror::Error;

/// Errors that end a `crm` invocation with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to create API client: {0}")]
    Api(#[from] ApiError),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A password was neither given nor typed.
    #[error("Password is required")]
    MissingPassword,

    /// The action ran but did not succeed; the reason was already shown.
    #[error("{0} did not complete")]
    Incomplete(&'static str),
}

/// Turn a controller's success flag into a result.
pub fn completed(ok: bool, action: &'static str) -> Result<(), CliError> {
    if ok {
        Ok(())
    } else {
        Err(CliError::Incomplete(action))
    }
}
