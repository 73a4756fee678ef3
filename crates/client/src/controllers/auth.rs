//! Login, registration and logout.

use crm_core::Credentials;
use tracing::instrument;

use super::settle;
use crate::api::{ApiClient, ApiError};
use crate::credentials::CredentialStore;
use crate::shell::{Shell, Surface};

/// Fields of the login and register forms.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
enum AuthMode {
    Login,
    Register,
}

/// Gate a surface on the presence of a credential.
///
/// On a protected surface without a stored credential this navigates to
/// the login surface and returns `false`; the view must not load. A store
/// that cannot be read counts as having no credential.
pub fn check_auth(store: &dyn CredentialStore, surface: Surface, shell: &mut dyn Shell) -> bool {
    if surface.is_public() {
        return true;
    }
    let present = match store.get() {
        Ok(token) => token.is_some(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read stored credential");
            false
        }
    };
    if !present {
        tracing::debug!(%surface, "No credential, redirecting to login");
        shell.navigate(Surface::Login);
    }
    present
}

/// Drives the login and register forms.
#[derive(Debug)]
pub struct AuthController {
    client: ApiClient,
    form: LoginForm,
}

impl AuthController {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            form: LoginForm::default(),
        }
    }

    /// Current form contents. After a failed attempt the username is kept
    /// and the password cleared.
    #[must_use]
    pub const fn form(&self) -> &LoginForm {
        &self.form
    }

    /// Log in; on success store the token and go to the home surface.
    ///
    /// On failure the error is alerted and the form stays. Returns whether
    /// the user is now signed in.
    pub async fn submit_login(&mut self, form: LoginForm, shell: &mut dyn Shell) -> bool {
        self.authenticate(AuthMode::Login, form, shell).await
    }

    /// Register; on success store the token and go to the home surface.
    pub async fn submit_register(&mut self, form: LoginForm, shell: &mut dyn Shell) -> bool {
        self.authenticate(AuthMode::Register, form, shell).await
    }

    /// Forget the credential and return to the login surface.
    ///
    /// Always navigates, even when clearing the store fails.
    pub fn logout(&mut self, shell: &mut dyn Shell) {
        if let Err(e) = self.client.credentials().clear() {
            tracing::error!(error = %e, "Failed to clear stored credential");
        }
        self.form = LoginForm::default();
        tracing::info!("Signed out");
        shell.navigate(Surface::Login);
    }

    #[instrument(skip(self, form, shell), fields(username = %form.username))]
    async fn authenticate(
        &mut self,
        mode: AuthMode,
        form: LoginForm,
        shell: &mut dyn Shell,
    ) -> bool {
        let credentials = Credentials::new(form.username.clone(), form.password);
        let outcome = match mode {
            AuthMode::Login => self.client.login(&credentials).await,
            AuthMode::Register => self.client.register(&credentials).await,
        };
        self.form = LoginForm::new(form.username, "");

        let Some(response) = settle(outcome, shell) else {
            return false;
        };

        if let Err(e) = self
            .client
            .credentials()
            .set(&response.into_access_token())
        {
            tracing::error!(error = %e, "Failed to store credential");
            shell.alert(&ApiError::from(e).to_string());
            return false;
        }

        tracing::info!(?mode, "Signed in");
        self.form = LoginForm::default();
        shell.navigate(Surface::HOME);
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use crm_core::AccessToken;
    use url::Url;

    use super::*;
    use crate::config::ClientConfig;
    use crate::credentials::MemoryCredentialStore;
    use crate::shell::RecordingShell;

    fn client_with(store: Arc<MemoryCredentialStore>) -> ApiClient {
        let config = ClientConfig::new(
            Url::parse("http://127.0.0.1:9").unwrap(),
            PathBuf::from("/unused"),
        )
        .unwrap();
        ApiClient::new(&config, store).unwrap()
    }

    #[test]
    fn test_check_auth_without_credential_redirects() {
        let store = MemoryCredentialStore::new();
        let mut shell = RecordingShell::new();
        assert!(!check_auth(&store, Surface::Orders, &mut shell));
        assert_eq!(shell.navigations(), vec![Surface::Login]);
    }

    #[test]
    fn test_check_auth_with_credential_proceeds() {
        let store = MemoryCredentialStore::new();
        store.set(&AccessToken::new("abc")).unwrap();
        let mut shell = RecordingShell::new();
        assert!(check_auth(&store, Surface::Customers, &mut shell));
        assert!(shell.events().is_empty());
    }

    #[test]
    fn test_check_auth_login_surface_is_public() {
        let store = MemoryCredentialStore::new();
        let mut shell = RecordingShell::new();
        assert!(check_auth(&store, Surface::Login, &mut shell));
        assert!(shell.navigations().is_empty());
    }

    #[test]
    fn test_login_form_debug_redacts_password() {
        let debug = format!("{:?}", LoginForm::new("alice", "hunter2"));
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_logout_clears_credential_and_navigates() {
        let store = Arc::new(MemoryCredentialStore::with_token("abc"));
        let mut controller = AuthController::new(client_with(Arc::clone(&store)));
        let mut shell = RecordingShell::new();

        controller.logout(&mut shell);
        assert!(store.get().unwrap().is_none());
        assert_eq!(shell.navigations(), vec![Surface::Login]);

        // Logging out twice is harmless
        controller.logout(&mut shell);
        assert_eq!(shell.navigations(), vec![Surface::Login, Surface::Login]);
    }
}
