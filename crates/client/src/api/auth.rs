//! Login and registration.

use crm_core::{Credentials, TokenResponse};
use tracing::instrument;

use super::{ApiClient, Auth, Outcome};

impl ApiClient {
    /// Exchange a username and password for a bearer token.
    ///
    /// Sent without an `Authorization` header. The token is returned, not
    /// stored: persisting it is the auth flow's job.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Outcome<TokenResponse> {
        match self.endpoint(&["login"]) {
            Ok(url) => self.post(url, credentials, Auth::None).await,
            Err(e) => Outcome::Err(e),
        }
    }

    /// Create an account and receive a bearer token for it.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn register(&self, credentials: &Credentials) -> Outcome<TokenResponse> {
        match self.endpoint(&["register"]) {
            Ok(url) => self.post(url, credentials, Auth::None).await,
            Err(e) => Outcome::Err(e),
        }
    }
}
