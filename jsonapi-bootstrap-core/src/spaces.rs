use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use tokio::time::Instant;
use tracing::debug;

use crate::{
    defaults,
    error::{ReadinessError, SpacesError},
    http_request::Request,
};

/// A space as listed by `GET /v1/spaces`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Space {
    /// Space identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct SpacesResponse {
    #[serde(default)]
    data: Vec<Space>,
}

/// Something that can list the spaces visible to a bearer key.
#[allow(async_fn_in_trait)]
pub trait SpacesSource {
    /// Performs one listing attempt. An empty listing is reported as [`SpacesError::Empty`].
    async fn list_spaces(&self, bearer_key: &SecretString) -> Result<Vec<Space>, SpacesError>;
}

/// HTTP client for the JSON API served by the running account.
pub struct JsonApiClient {
    base_url: String,
    request: Request,
}

impl JsonApiClient {
    /// Creates a client for the JSON API listening on `listen_addr` (`host:port`).
    #[must_use]
    pub fn new(listen_addr: &str, timeout: Duration) -> Self {
        Self::with_base_url(&format!("http://{listen_addr}"), timeout)
    }

    /// Creates a client for an explicit base URL.
    #[must_use]
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request: Request::new(timeout),
        }
    }

    /// The URL polled for spaces.
    #[must_use]
    pub fn spaces_url(&self) -> String {
        format!("{}/v1/spaces", self.base_url)
    }
}

impl SpacesSource for JsonApiClient {
    async fn list_spaces(&self, bearer_key: &SecretString) -> Result<Vec<Space>, SpacesError> {
        let url = self.spaces_url();
        let response = Request::handle(self.request.get_authorized(&url, bearer_key)).await?;
        let body = response.text().await?;
        let spaces = serde_json::from_str::<SpacesResponse>(&body)?.data;
        if spaces.is_empty() {
            return Err(SpacesError::Empty);
        }
        Ok(spaces)
    }
}

/// Polls a [`SpacesSource`] at a fixed interval until spaces appear or the wait budget runs out.
pub struct ReadinessPoller<S> {
    source: S,
    wait: Duration,
    interval: Duration,
}

#[allow(clippy::future_not_send)]
impl<S: SpacesSource> ReadinessPoller<S> {
    /// Creates a poller with the default 5 second interval.
    #[must_use]
    pub const fn new(source: S, wait: Duration) -> Self {
        Self {
            source,
            wait,
            interval: defaults::POLL_INTERVAL,
        }
    }

    /// Overrides the delay between attempts.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// The wait budget of one polling window.
    #[must_use]
    pub const fn wait(&self) -> Duration {
        self.wait
    }

    /// The polled source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Polls until a non-empty listing arrives.
    ///
    /// Every failed attempt, whatever the cause, means "not ready yet". Once
    /// an attempt fails after the deadline, the window is over, so failure is
    /// reported between `wait` and `wait + interval` after the first attempt.
    ///
    /// # Errors
    ///
    /// Returns [`ReadinessError::Exhausted`] with the last attempt's failure.
    pub async fn wait_for_spaces(
        &self,
        bearer_key: &SecretString,
    ) -> Result<Vec<Space>, ReadinessError> {
        let deadline = Instant::now() + self.wait;
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.source.list_spaces(bearer_key).await {
                Ok(spaces) => {
                    debug!(attempt, count = spaces.len(), "spaces listed");
                    return Ok(spaces);
                }
                Err(err) => {
                    debug!(attempt, error = %err, "spaces not ready");
                    if Instant::now() >= deadline {
                        return Err(ReadinessError::Exhausted {
                            waited: self.wait,
                            last_failure: err,
                        });
                    }
                }
            }
            tokio::time::sleep(self.interval).await;
        }
    }
}
