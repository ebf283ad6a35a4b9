//! HTTP boundary of the referral client.
//!
//! Everything above this module talks to the network only through
//! [`Transport`], so the service logic can run against an in-memory
//! transport in tests.

use crate::error::TransportError;
use reqwest::{header::ACCEPT, Url};
use std::collections::BTreeMap;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Params are sent as a query string.
    Get,
    /// Params are sent as a JSON object body.
    Put,
}

/// One request to a referral endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub endpoint: Url,
    pub params: BTreeMap<String, String>,
}

impl Request {
    pub fn new(method: Method, endpoint: Url) -> Self {
        Self {
            method,
            endpoint,
            params: BTreeMap::new(),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Fetches the raw body of a request.
pub trait Transport: Send + Sync {
    fn fetch(&self, request: Request)
        -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn fetch(&self, request: Request) -> Result<Vec<u8>, TransportError> {
        let builder = match request.method {
            Method::Get => self.client.get(request.endpoint).query(&request.params),
            Method::Put => self.client.put(request.endpoint).json(&request.params),
        };

        let response = builder.header(ACCEPT, "application/json").send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
