//! Integration tests for the CRM console.
//!
//! Every test runs the real [`ApiClient`] and controllers against a
//! `wiremock` server standing in for the backend, so no running services
//! are needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p crm-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `api_client` - Request shape, auth header, 401 and error handling
//! - `auth_flow` - Login, registration and logout
//! - `customer_view` - Customer list, form and delete flows
//! - `order_view` - Order list, filter, form and delete flows

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::PathBuf;
use std::sync::Arc;

use crm_client::{ApiClient, ClientConfig, CredentialStore, MemoryCredentialStore};
use serde_json::{Value, json};
use url::Url;
use wiremock::MockServer;

/// Token issued by the mock backend.
pub const TOKEN: &str = "test-token";

/// A mock backend and a client pointed at it.
pub struct TestBackend {
    pub server: MockServer,
    pub store: Arc<MemoryCredentialStore>,
    pub client: ApiClient,
}

impl TestBackend {
    /// Start a backend with no stored credential.
    pub async fn start() -> Self {
        Self::with_store(MemoryCredentialStore::new()).await
    }

    /// Start a backend with [`TOKEN`] already stored.
    pub async fn signed_in() -> Self {
        Self::with_store(MemoryCredentialStore::with_token(TOKEN)).await
    }

    async fn with_store(store: MemoryCredentialStore) -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(store);
        let client = client_for(&server.uri(), Arc::clone(&store) as Arc<dyn CredentialStore>);
        Self {
            server,
            store,
            client,
        }
    }

    /// Whether a token is currently stored.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.store.get().unwrap().is_some()
    }
}

/// Build a client for `base_url` over `store`.
#[must_use]
pub fn client_for(base_url: &str, store: Arc<dyn CredentialStore>) -> ApiClient {
    let config = ClientConfig::new(Url::parse(base_url).unwrap(), PathBuf::from("/unused")).unwrap();
    ApiClient::new(&config, store).unwrap()
}

/// `Authorization` header value for [`TOKEN`].
#[must_use]
pub fn bearer() -> String {
    format!("Bearer {TOKEN}")
}

/// Customer body as the backend returns it.
#[must_use]
pub fn customer_json(id: &str, name: &str, email: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": email,
        "created_at": "2024-03-01T09:30:00"
    })
}

/// Order body as the backend returns it.
#[must_use]
pub fn order_json(id: &str, customer_id: &str, product_name: &str, price: f64) -> Value {
    json!({
        "id": id,
        "customer_id": customer_id,
        "product_name": product_name,
        "price": price,
        "created_at": "2024-03-02T10:00:00"
    })
}
