//! CRM backend API client.
//!
//! Typed access to the customer/order REST backend.
//!
//! # Supported Features
//!
//! - **Auth**: login and registration returning a bearer token
//! - **Customers**: list, fetch, create, update, delete
//! - **Orders**: paged listing, per-customer listing, create, delete
//!
//! # Response handling
//!
//! Every operation resolves to an [`Outcome`]:
//!
//! - missing credential on a protected call: `Redirect(Login)`, no request sent
//! - HTTP 401: credential cleared, `Redirect(Login)`
//! - other non-2xx: `Err(RequestFailed)` with the backend `detail`
//! - transport failure: `Err(Network)`, logged before it is returned
//! - 2xx: `Ok` with the decoded body

mod auth;
mod customers;
mod error;
mod orders;

pub use error::*;
pub use orders::OrderScope;

use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use crm_core::PageRequest;
use url::Url;

use crate::config::ClientConfig;
use crate::credentials::CredentialStore;
use crate::shell::Surface;

/// Result of an API operation.
///
/// Callers must handle all three cases: a 401 or a missing credential is a
/// redirect, not an error, and carries no payload.
#[derive(Debug)]
#[must_use]
pub enum Outcome<T> {
    /// The operation succeeded.
    Ok(T),
    /// The session is not authenticated; the host should switch surface.
    Redirect(Surface),
    /// The operation failed.
    Err(ApiError),
}

impl<T> Outcome<T> {
    /// Whether this outcome is a redirect.
    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}

impl<T> From<Result<Outcome<T>, ApiError>> for Outcome<T> {
    fn from(result: Result<Outcome<T>, ApiError>) -> Self {
        result.unwrap_or_else(Outcome::Err)
    }
}

/// Whether a request carries the stored bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auth {
    /// Public endpoint (login, register).
    None,
    /// Protected endpoint; aborted without a stored credential.
    Bearer,
}

/// CRM backend API client.
///
/// Cheap to clone; clones share the HTTP connection pool and the
/// credential store.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    default_page: PageRequest,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(
        config: &ClientConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.clone(),
                default_page: config.default_page(),
                credentials,
            }),
        })
    }

    /// The credential store this client reads tokens from.
    #[must_use]
    pub fn credentials(&self) -> &dyn CredentialStore {
        self.inner.credentials.as_ref()
    }

    /// First page of the default "all orders" listing.
    #[must_use]
    pub fn default_page(&self) -> PageRequest {
        self.inner.default_page
    }

    /// Build an endpoint URL from path segments (each percent-encoded).
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Execute a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Outcome<T> {
        self.send::<T, ()>(Method::GET, url, None, Auth::Bearer)
            .await
    }

    /// Execute a POST request.
    pub(crate) async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
        auth: Auth,
    ) -> Outcome<T> {
        self.send(Method::POST, url, Some(body), auth).await
    }

    /// Execute a PUT request.
    pub(crate) async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Outcome<T> {
        self.send(Method::PUT, url, Some(body), Auth::Bearer).await
    }

    /// Execute a DELETE request.
    pub(crate) async fn delete<T: DeserializeOwned>(&self, url: Url) -> Outcome<T> {
        self.send::<T, ()>(Method::DELETE, url, None, Auth::Bearer)
            .await
    }

    async fn send<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        auth: Auth,
    ) -> Outcome<T> {
        Outcome::from(self.try_send(method, url, body, auth).await)
    }

    async fn try_send<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        auth: Auth,
    ) -> Result<Outcome<T>, ApiError> {
        let mut request = self.inner.client.request(method.clone(), url.clone());

        if auth == Auth::Bearer {
            let Some(token) = self.inner.credentials.get()? else {
                tracing::debug!(%method, %url, "No stored credential, request not sent");
                return Ok(Outcome::Redirect(Surface::Login));
            };
            request = request.header(AUTHORIZATION, token.bearer_header());
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%method, %url, "Sending API request");
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(%method, %url, error = %e, "API request failed");
                return Err(ApiError::Network(e));
            }
        };

        self.handle_response(response).await
    }

    /// Handle a response according to its status.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<Outcome<T>, ApiError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::info!("Backend rejected the credential, clearing it");
            self.inner.credentials.clear()?;
            return Ok(Outcome::Redirect(Surface::Login));
        }

        let body = response.text().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read API response body");
            ApiError::Network(e)
        })?;

        if !status.is_success() {
            let message = ApiErrorResponse::message_from_body(&body);
            tracing::warn!(status = status.as_u16(), %message, "API request rejected");
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body)
            .map(Outcome::Ok)
            .map_err(|e| ApiError::Decode(format!("Failed to parse response: {e}")))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("page_size", &self.inner.default_page.limit)
            .finish_non_exhaustive()
    }
}
