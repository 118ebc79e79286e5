use std::time::Duration;

use clap::Parser;
use jsonapi_bootstrap_core::{
    defaults, logger::LogLevel, BootstrapConfig, IdentityMaterial, Mode, ReadinessConfig,
};

use crate::duration::parse_duration;

/// Bootstraps an account on a running anytype-heart server and prints a JSON API bearer key.
#[derive(Parser)]
#[command(name = "jsonapi-bootstrap", version, about)]
pub struct Cli {
    /// Root path where the account data is stored.
    #[arg(long, env = "JSONAPI_BOOTSTRAP_ROOT")]
    pub root: String,

    /// Account ID to select. Derived from the mnemonic or account key when empty.
    #[arg(long, env = "JSONAPI_BOOTSTRAP_ACCOUNT_ID")]
    pub account_id: Option<String>,

    /// Mnemonic to recover an existing wallet.
    #[arg(long, env = "JSONAPI_BOOTSTRAP_MNEMONIC", hide_env_values = true)]
    pub mnemonic: Option<String>,

    /// Account master key (base64) to recover an existing wallet. Takes precedence over the mnemonic for the session.
    #[arg(long, env = "JSONAPI_BOOTSTRAP_ACCOUNT_KEY", hide_env_values = true)]
    pub account_key: Option<String>,

    /// Profile name when creating a new account.
    #[arg(long, env = "JSONAPI_BOOTSTRAP_NAME", default_value = defaults::PROFILE_NAME)]
    pub name: String,

    /// gRPC address of the running anytype-heart server.
    #[arg(long, env = "JSONAPI_BOOTSTRAP_GRPC", default_value = defaults::GRPC_ADDR)]
    pub grpc: String,

    /// Listen address for the JSON API, passed to AccountCreate/AccountSelect.
    #[arg(long, env = "JSONAPI_BOOTSTRAP_JSONAPI", default_value = defaults::JSON_API_ADDR)]
    pub jsonapi: String,

    /// App name the API key is generated for.
    #[arg(long, env = "JSONAPI_BOOTSTRAP_APP_NAME", default_value = defaults::APP_NAME)]
    pub app_name: String,

    /// Client platform label for InitialSetParameters.
    #[arg(long, env = "JSONAPI_BOOTSTRAP_PLATFORM", default_value = defaults::PLATFORM)]
    pub platform: String,

    /// Client version label for InitialSetParameters.
    #[arg(long, env = "JSONAPI_BOOTSTRAP_CLIENT_VERSION", default_value = defaults::CLIENT_VERSION)]
    pub client_version: String,

    /// Per-call gRPC timeout, e.g. 90s or 2m.
    #[arg(long, env = "JSONAPI_BOOTSTRAP_TIMEOUT", default_value = "2m", value_parser = parse_duration)]
    pub timeout: Duration,

    /// How long to wait for spaces before restarting the account once. 0 skips the check.
    #[arg(long, env = "JSONAPI_BOOTSTRAP_WAIT_SPACES", default_value = "2m", value_parser = parse_duration)]
    pub wait_spaces: Duration,

    /// Create a fresh account instead of selecting an existing one.
    #[arg(long, env = "JSONAPI_BOOTSTRAP_CREATE")]
    pub create: bool,

    /// Log level for stderr output. RUST_LOG takes precedence.
    #[arg(long, env = "JSONAPI_BOOTSTRAP_LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,
}

impl Cli {
    pub const fn mode(&self) -> Mode {
        if self.create {
            Mode::Create
        } else {
            Mode::Recover
        }
    }

    /// Splits the flags into the bootstrap and readiness settings.
    pub fn into_configs(self) -> (BootstrapConfig, ReadinessConfig) {
        let mode = self.mode();
        let mut readiness = ReadinessConfig::new(self.jsonapi.clone());
        readiness.wait = self.wait_spaces;

        let bootstrap = BootstrapConfig {
            root_path: self.root,
            account_id: self.account_id.filter(|id| !id.trim().is_empty()),
            identity: IdentityMaterial::new(self.mnemonic, self.account_key),
            mode,
            profile_name: self.name,
            app_name: self.app_name,
            platform: self.platform,
            version: self.client_version,
            json_api_addr: self.jsonapi,
            timeout: self.timeout,
        };
        (bootstrap, readiness)
    }
}
