//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use restcheck::client::{HttpContext, HttpError, HttpMethod, HttpResponse};

/// A request captured by [`RecordingContext`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Value>,
}

/// Fake HTTP context that records every request and answers with a fixed
/// status and body.
pub struct RecordingContext {
    status: u16,
    body: String,
    requests: Mutex<Vec<Recorded>>,
}

impl RecordingContext {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("no request was recorded")
    }
}

#[async_trait]
impl HttpContext for RecordingContext {
    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        data: Option<&Value>,
    ) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(Recorded {
            method,
            url: url.to_string(),
            body: data.cloned(),
        });
        Ok(HttpResponse::new(self.status, url, self.body.clone()))
    }
}
