//! Default values shared by the library and the CLI.

use std::time::Duration;

/// gRPC address of a locally running anytype-heart server.
pub const GRPC_ADDR: &str = "127.0.0.1:31007";

/// Listen address handed to the server for its JSON API.
pub const JSON_API_ADDR: &str = "127.0.0.1:31009";

/// Application name the bearer key is issued for.
pub const APP_NAME: &str = "jsonapi-cli";

/// Profile name used when creating a fresh account.
pub const PROFILE_NAME: &str = "Json API user";

/// Platform label sent with the initial parameters.
pub const PLATFORM: &str = "jsonapi-cli";

/// Client version label sent with the initial parameters.
pub const CLIENT_VERSION: &str = "0.0.0-jsonapi";

/// Profile icon index used on account creation.
pub const PROFILE_ICON: i64 = 0;

/// Per-call timeout for every gRPC request.
pub const RPC_TIMEOUT: Duration = Duration::from_secs(120);

/// How long to wait for spaces to show up before restarting the account.
pub const WAIT_SPACES: Duration = Duration::from_secs(120);

/// Delay between two `GET /v1/spaces` attempts.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Timeout of a single `GET /v1/spaces` attempt.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Derivation index of the account whose identifier is computed offline.
pub const ACCOUNT_INDEX: u32 = 0;
