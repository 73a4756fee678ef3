//! `crm` subcommands.
//!
//! One-shot commands drive a controller through a single action and exit
//! non-zero when it does not complete. `session` keeps a controller alive
//! and feeds it actions from the terminal.

pub mod auth;
pub mod customers;
pub mod orders;
pub mod session;

use std::sync::Arc;

use crm_client::{ApiClient, ClientConfig, CredentialStore, FileCredentialStore};

use crate::error::CliError;

/// What every command needs: a client over the persisted credential.
pub struct Context {
    pub client: ApiClient,
}

impl Context {
    /// Build the client from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid or the HTTP client cannot
    /// be built.
    pub fn from_env() -> Result<Self, CliError> {
        let config = ClientConfig::from_env()?;
        tracing::debug!(
            base_url = %config.base_url,
            credentials = %config.credentials_path.display(),
            "Loaded configuration"
        );
        let store: Arc<dyn CredentialStore> =
            Arc::new(FileCredentialStore::new(&config.credentials_path));
        Ok(Self {
            client: ApiClient::new(&config, store)?,
        })
    }
}
