//! Blocking HTTP client shared by every service adapter.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::io::error::GatewayError;
use crate::io::session::Session;

/// Thin wrapper over `reqwest::blocking::Client` carrying the session bearer.
#[derive(Clone)]
pub struct ApiClient {
    inner: Client,
    bearer: Option<String>,
}

/// Status and body of a completed request, before interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, 401 | 403)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Require a 2xx status. 401/403 become [`GatewayError::Unauthorized`].
    pub fn require_success(self) -> Result<Self, GatewayError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(self.into_error())
    }

    /// Convert a non-success response into the matching transport error.
    pub fn into_error(self) -> GatewayError {
        if self.is_unauthorized() {
            return GatewayError::Unauthorized {
                url: self.url,
                status: self.status,
            };
        }
        GatewayError::Status {
            url: self.url,
            status: self.status,
            body: self.body,
        }
    }

    pub fn json<T: DeserializeOwned>(&self, what: &'static str) -> Result<T, GatewayError> {
        serde_json::from_str(&self.body).map_err(|err| GatewayError::decode(what, err))
    }
}

impl ApiClient {
    pub fn new(timeout: Duration) -> Result<Self, GatewayError> {
        let inner = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            inner,
            bearer: None,
        })
    }

    /// Attach the session bearer to every subsequent request.
    pub fn with_session(mut self, session: &Session) -> Self {
        self.bearer = Some(session.bearer().to_string());
        self
    }

    #[instrument(skip(self))]
    pub fn get(&self, url: &str) -> Result<RawResponse, GatewayError> {
        self.send(url, self.inner.get(url))
    }

    #[instrument(skip(self, payload))]
    pub fn post(&self, url: &str, payload: Option<&Value>) -> Result<RawResponse, GatewayError> {
        let mut request = self.inner.post(url).header(CONTENT_TYPE, "application/json");
        if let Some(payload) = payload {
            request = request.json(payload);
        }
        self.send(url, request)
    }

    fn send(&self, url: &str, mut request: RequestBuilder) -> Result<RawResponse, GatewayError> {
        if let Some(bearer) = &self.bearer {
            request = request.header(AUTHORIZATION, bearer);
        }
        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        debug!(status, bytes = body.len(), "response received");
        Ok(RawResponse {
            url: url.to_string(),
            status,
            body,
        })
    }
}
