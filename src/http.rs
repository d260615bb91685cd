//! Blocking HTTP transport shared by the API repositories.

use crate::error::{ApiError, Result};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            bearer: None,
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            bearer: None,
            body: Some(body),
        }
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            url: url.into(),
            bearer: None,
            body: None,
        }
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }
}

/// A response the server actually sent, successful or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON, mapping failures to `ApiError::Decode`
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| ApiError::Decode(format!("Unexpected response body: {}", e)))
    }
}

/// Trait for HTTP transports to allow mocking and abstraction.
///
/// Only transport-level failures are errors; any status code the server
/// returns comes back as an `HttpResponse`.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

pub struct UreqTransport {
    agent: ureq::Agent,
    debug: bool,
}

impl UreqTransport {
    pub fn new(timeout: Duration, debug: bool) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            debug,
        }
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        if self.debug {
            eprintln!("[DEBUG] {} {}", request.method.as_str(), request.url);
        }

        let mut req = self
            .agent
            .request(request.method.as_str(), &request.url)
            .set("Accept", "application/json");
        if let Some(token) = &request.bearer {
            req = req.set("Authorization", &format!("Bearer {}", token));
        }

        let resp = match &request.body {
            Some(body) => req
                .set("Content-Type", "application/json")
                .send_string(&body.to_string()),
            None => req.call(),
        };

        let (status, resp) = match resp {
            Ok(r) => (r.status(), r),
            Err(ureq::Error::Status(code, r)) => (code, r),
            Err(e) => return Err(ApiError::Network(format!("Request failed: {}", e))),
        };

        let body = resp
            .into_string()
            .map_err(|e| ApiError::Network(format!("Failed to read response: {}", e)))?;

        if self.debug {
            eprintln!("[DEBUG] -> {} ({} bytes)", status, body.len());
        }

        Ok(HttpResponse { status, body })
    }
}
