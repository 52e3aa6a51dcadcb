//! API clients for the posts and users endpoints.
//!
//! Both clients are thin: they join the base URL and endpoint, serialize
//! the payload, and hand the request to the injected [`HttpContext`].
//! Retries, timeouts, and connection handling belong to the context.

mod context;
mod users;

pub use context::{HttpContext, HttpError, HttpMethod, HttpResponse, ReqwestContext};
pub use users::UserApiClient;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while issuing a client request.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),
    #[error("failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Check a base URL and strip any trailing slash.
pub(crate) fn normalize_base_url(base_url: &str) -> Result<String, ClientError> {
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ClientError::InvalidUrl(format!(
            "URL must start with http:// or https://, got: {}",
            base_url
        )));
    }
    Ok(base_url.trim_end_matches('/').to_string())
}

/// Generic verb dispatcher bound to one base URL.
#[derive(Debug, Clone)]
pub struct ApiClient<C> {
    context: C,
    base_url: String,
}

impl<C: HttpContext> ApiClient<C> {
    pub fn new(context: C, base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            context,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    /// Send `method` to `base_url + endpoint`.
    ///
    /// A body is attached only when `data` is given.
    pub async fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        data: Option<&Value>,
    ) -> Result<HttpResponse, ClientError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self.context.send(method, &url, data).await?;
        if !response.ok() {
            tracing::debug!(%method, url, status = response.status, "non-success response");
        }
        Ok(response)
    }

    pub async fn get(&self, endpoint: &str) -> Result<HttpResponse, ClientError> {
        self.request(HttpMethod::Get, endpoint, None).await
    }

    pub async fn post<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        data: &T,
    ) -> Result<HttpResponse, ClientError> {
        let body = serde_json::to_value(data)?;
        self.request(HttpMethod::Post, endpoint, Some(&body)).await
    }

    pub async fn put<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        data: &T,
    ) -> Result<HttpResponse, ClientError> {
        let body = serde_json::to_value(data)?;
        self.request(HttpMethod::Put, endpoint, Some(&body)).await
    }

    pub async fn patch<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        data: &T,
    ) -> Result<HttpResponse, ClientError> {
        let body = serde_json::to_value(data)?;
        self.request(HttpMethod::Patch, endpoint, Some(&body)).await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<HttpResponse, ClientError> {
        self.request(HttpMethod::Delete, endpoint, None).await
    }
}
