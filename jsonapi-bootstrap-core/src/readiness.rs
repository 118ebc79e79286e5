use std::time::Duration;

use tracing::{info, warn};

use crate::{
    bootstrap::Bootstrapper,
    defaults,
    error::{BootstrapError, ReadinessError},
    identity::Credentials,
    progress::ProgressReporter,
    rpc::ClientCommands,
    spaces::{JsonApiClient, ReadinessPoller, Space, SpacesSource},
};

/// Polling windows per run: the first one, and one more after a restart.
pub const MAX_READINESS_ATTEMPTS: u32 = 2;

/// Settings of the readiness stage.
#[derive(Debug, Clone)]
pub struct ReadinessConfig {
    /// Address the JSON API listens on (`host:port`).
    pub json_api_addr: String,
    /// Budget of one polling window. Zero disables the stage.
    pub wait: Duration,
    /// Delay between attempts.
    pub interval: Duration,
    /// Timeout of a single HTTP request.
    pub http_timeout: Duration,
}

impl ReadinessConfig {
    /// Settings for `json_api_addr` with default timings.
    #[must_use]
    pub fn new(json_api_addr: impl Into<String>) -> Self {
        Self {
            json_api_addr: json_api_addr.into(),
            wait: defaults::WAIT_SPACES,
            interval: defaults::POLL_INTERVAL,
            http_timeout: defaults::HTTP_TIMEOUT,
        }
    }

    /// Builds the poller for the JSON API.
    #[must_use]
    pub fn poller(&self) -> ReadinessPoller<JsonApiClient> {
        ReadinessPoller::new(
            JsonApiClient::new(&self.json_api_addr, self.http_timeout),
            self.wait,
        )
        .with_interval(self.interval)
    }
}

/// Outcome of the readiness stage. Only restart failures are fatal, so this is never an error.
#[derive(Debug)]
pub enum Readiness {
    /// Spaces became visible.
    Ready {
        /// The listed spaces, never empty.
        spaces: Vec<Space>,
        /// Polling windows used.
        attempts: u32,
    },
    /// Every polling window ran out.
    NotReady {
        /// Polling windows used.
        attempts: u32,
        /// Failure of the last window.
        error: ReadinessError,
    },
    /// The wait budget was zero.
    Skipped,
}

/// Waits for spaces, restarting the account once if the first window runs out.
///
/// Returns the outcome together with the credentials that are valid
/// afterwards: the input ones, or the ones issued by the restart.
///
/// # Errors
///
/// Only a failing restart is an error; exhausting both windows yields
/// [`Readiness::NotReady`].
#[allow(clippy::future_not_send)]
pub async fn ensure_spaces<C, R, S>(
    bootstrapper: &mut Bootstrapper<C, R>,
    poller: &ReadinessPoller<S>,
    credentials: Credentials,
) -> Result<(Readiness, Credentials), BootstrapError>
where
    C: ClientCommands,
    R: ProgressReporter,
    S: SpacesSource,
{
    if poller.wait().is_zero() {
        info!("readiness check disabled");
        return Ok((Readiness::Skipped, credentials));
    }

    let mut credentials = credentials;
    let mut attempts = 0;
    loop {
        attempts += 1;
        match poller.wait_for_spaces(&credentials.bearer_key).await {
            Ok(spaces) => {
                info!(attempts, count = spaces.len(), "spaces ready");
                return Ok((Readiness::Ready { spaces, attempts }, credentials));
            }
            Err(error) if attempts >= MAX_READINESS_ATTEMPTS => {
                warn!(attempts, %error, "spaces still empty after restart");
                return Ok((Readiness::NotReady { attempts, error }, credentials));
            }
            Err(error) => {
                warn!(wait = ?poller.wait(), %error, "spaces not ready, restarting account once");
                credentials = bootstrapper.restart(&credentials).await?;
            }
        }
    }
}
