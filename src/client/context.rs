//! HTTP context: the capability the API clients send requests through.
//!
//! Clients never talk to `reqwest` directly. They hold something that
//! implements [`HttpContext`], which lets tests swap in a fake that records
//! requests and returns canned responses.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by an HTTP context.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("invalid JSON body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The verbs the clients dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fully-read response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub url: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<Value, HttpError> {
        self.json_as()
    }

    /// Deserialize the body into a typed record.
    pub fn json_as<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_slice(&self.body).map_err(|source| HttpError::Decode {
            url: self.url.clone(),
            source,
        })
    }
}

/// Issues requests and returns responses.
///
/// Only transport failures are errors. A 404 or 500 comes back as an
/// [`HttpResponse`] whose [`ok`](HttpResponse::ok) is false.
#[async_trait]
pub trait HttpContext: Send + Sync {
    /// Send a request, with `data` as a JSON body when present.
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        data: Option<&Value>,
    ) -> Result<HttpResponse, HttpError>;

    async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        self.send(HttpMethod::Get, url, None).await
    }

    async fn post(&self, url: &str, data: Option<&Value>) -> Result<HttpResponse, HttpError> {
        self.send(HttpMethod::Post, url, data).await
    }

    async fn put(&self, url: &str, data: Option<&Value>) -> Result<HttpResponse, HttpError> {
        self.send(HttpMethod::Put, url, data).await
    }

    async fn patch(&self, url: &str, data: Option<&Value>) -> Result<HttpResponse, HttpError> {
        self.send(HttpMethod::Patch, url, data).await
    }

    async fn delete(&self, url: &str) -> Result<HttpResponse, HttpError> {
        self.send(HttpMethod::Delete, url, None).await
    }
}

#[async_trait]
impl<C: HttpContext + ?Sized> HttpContext for std::sync::Arc<C> {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        data: Option<&Value>,
    ) -> Result<HttpResponse, HttpError> {
        (**self).send(method, url, data).await
    }
}

#[async_trait]
impl<C: HttpContext + ?Sized> HttpContext for &C {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        data: Option<&Value>,
    ) -> Result<HttpResponse, HttpError> {
        (**self).send(method, url, data).await
    }
}

/// [`HttpContext`] backed by a pooled `reqwest::Client`.
///
/// Dropping the context releases its connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestContext {
    http: reqwest::Client,
    timeout: Duration,
}

impl ReqwestContext {
    /// Build a context with the given per-request timeout and user agent.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, HttpError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { http, timeout })
    }

    /// Release the context explicitly.
    pub fn dispose(self) {
        tracing::debug!("disposing HTTP context");
    }
}

#[async_trait]
impl HttpContext for ReqwestContext {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        data: Option<&Value>,
    ) -> Result<HttpResponse, HttpError> {
        tracing::debug!(%method, url, has_body = data.is_some(), "sending request");

        let mut request = self.http.request(method.to_reqwest(), url);
        if let Some(body) = data {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout(format!("{} {} after {:?}", method, url, self.timeout))
            } else {
                HttpError::Network(e)
            }
        })?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(%method, url, status, bytes = body.len(), "received response");

        Ok(HttpResponse {
            status,
            url: final_url,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_is_2xx_only() {
        assert!(HttpResponse::new(200, "u", "").ok());
        assert!(HttpResponse::new(201, "u", "").ok());
        assert!(HttpResponse::new(299, "u", "").ok());
        assert!(!HttpResponse::new(199, "u", "").ok());
        assert!(!HttpResponse::new(301, "u", "").ok());
        assert!(!HttpResponse::new(404, "u", "").ok());
        assert!(!HttpResponse::new(500, "u", "").ok());
    }

    #[test]
    fn test_json_parses_body() {
        let response = HttpResponse::new(200, "http://x/posts/1", r#"{"id": 1}"#);
        let body = response.json().unwrap();
        assert_eq!(body["id"], 1);
    }

    #[test]
    fn test_json_decode_error_names_url() {
        let response = HttpResponse::new(200, "http://x/posts/1", "<html>");
        let err = response.json().unwrap_err();
        assert!(err.to_string().contains("http://x/posts/1"));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_borrowed_context_can_be_lent_then_disposed() {
        fn lend<C: HttpContext + Clone>(context: C) -> C {
            context.clone()
        }
        let context = ReqwestContext::new(Duration::from_secs(5), "restcheck-test").unwrap();
        let lent = lend(&context);
        assert_eq!(lent.timeout, context.timeout);
        context.dispose();
    }

    #[test]
    fn test_reqwest_context_builds() {
        let context = ReqwestContext::new(Duration::from_secs(5), "restcheck-test");
        assert!(context.is_ok());
    }
}
