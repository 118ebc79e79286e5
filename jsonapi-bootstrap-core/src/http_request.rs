use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};

use crate::error::SpacesError;

/// A simple wrapper on an HTTP client for talking to the local JSON API. Sets a per-request
/// timeout and the user-agent, and attaches the bearer key.
pub(crate) struct Request {
    client: reqwest::Client,
    timeout: Duration,
}

impl Request {
    /// Initializes a new `Request` instance.
    pub(crate) fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    /// Creates a request builder with defaults applied.
    pub(crate) fn req(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .timeout(self.timeout)
            .header(
                "User-Agent",
                format!("jsonapi-bootstrap-core/{}", env!("CARGO_PKG_VERSION")),
            )
    }

    /// Creates an authenticated GET request builder with defaults applied.
    pub(crate) fn get_authorized(&self, url: &str, bearer_key: &SecretString) -> RequestBuilder {
        self.req(Method::GET, url)
            .bearer_auth(bearer_key.expose_secret())
    }

    /// Sends a request and rejects non-success statuses.
    pub(crate) async fn handle(request_builder: RequestBuilder) -> Result<Response, SpacesError> {
        let response = request_builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SpacesError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}
