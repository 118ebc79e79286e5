use std::{future::Future, time::Duration};

use secrecy::{ExposeSecret, SecretString};
use tonic::Status;
use tracing::{info, warn};

use crate::{
    defaults,
    error::BootstrapError,
    identity::{Credentials, IdentityMaterial},
    progress::{Progress, ProgressReporter},
    rpc::{
        proto::{
            AccountCreateRequest, AccountLocalLinkCreateAppRequest, AccountSelectRequest,
            AccountStopRequest, AppInfo, InitialSetParametersRequest, LocalApiScope,
            WalletCreateRequest, WalletCreateSessionRequest, WalletRecoverRequest,
        },
        ClientCommands, RpcCall, RpcResponse,
    },
    Mode,
};

/// Inputs of a bootstrap run.
#[derive(Debug)]
pub struct BootstrapConfig {
    /// Directory where the server keeps account data. Required.
    pub root_path: String,
    /// Account to select in recover mode. Derived from the identity material when absent.
    pub account_id: Option<String>,
    /// Mnemonic and/or account key. Ignored in create mode.
    pub identity: IdentityMaterial,
    /// Create a new identity or recover the supplied one.
    pub mode: Mode,
    /// Profile name of a newly created account.
    pub profile_name: String,
    /// Application the bearer key is issued for.
    pub app_name: String,
    /// Platform label sent with the initial parameters.
    pub platform: String,
    /// Version label sent with the initial parameters.
    pub version: String,
    /// Listen address the server should bind its JSON API to.
    pub json_api_addr: String,
    /// Timeout applied to each gRPC call independently.
    pub timeout: Duration,
}

impl BootstrapConfig {
    /// A configuration for `root_path` with every other field at its default.
    #[must_use]
    pub fn new(root_path: impl Into<String>, mode: Mode) -> Self {
        Self {
            root_path: root_path.into(),
            account_id: None,
            identity: IdentityMaterial::default(),
            mode,
            profile_name: defaults::PROFILE_NAME.to_string(),
            app_name: defaults::APP_NAME.to_string(),
            platform: defaults::PLATFORM.to_string(),
            version: defaults::CLIENT_VERSION.to_string(),
            json_api_addr: defaults::JSON_API_ADDR.to_string(),
            timeout: defaults::RPC_TIMEOUT,
        }
    }

    /// Checks the inputs that must hold before anything is sent to the server.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::MissingRootPath`] for an empty root path and
    /// [`BootstrapError::MissingIdentity`] for recover mode without identity material.
    pub fn validate(&self) -> Result<(), BootstrapError> {
        if self.root_path.trim().is_empty() {
            return Err(BootstrapError::MissingRootPath);
        }
        if self.mode == Mode::Recover && self.identity.is_empty() {
            return Err(BootstrapError::MissingIdentity);
        }
        Ok(())
    }
}

/// Drives the `ClientCommands` sequence that leaves an account running with a
/// JSON API bearer key.
///
/// Each completed stage is passed to the [`ProgressReporter`] set with
/// [`Bootstrapper::with_reporter`]; by default nothing is reported.
///
/// # Example
///
/// ```no_run
/// use jsonapi_bootstrap_core::{rpc::GrpcClient, BootstrapConfig, Bootstrapper, Mode};
///
/// # async fn run() -> Result<(), jsonapi_bootstrap_core::BootstrapError> {
/// let client = GrpcClient::connect("127.0.0.1:31007", std::time::Duration::from_secs(10)).await?;
/// let mut bootstrapper = Bootstrapper::new(client, BootstrapConfig::new("/tmp/heart", Mode::Create))?;
/// let credentials = bootstrapper.run().await?;
/// println!("account {}", credentials.account_id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bootstrapper<C, R = ()> {
    client: C,
    config: BootstrapConfig,
    reporter: R,
}

impl<C: ClientCommands> Bootstrapper<C> {
    /// Validates `config` and binds it to `client`. No call is made.
    ///
    /// # Errors
    ///
    /// See [`BootstrapConfig::validate`].
    pub fn new(client: C, config: BootstrapConfig) -> Result<Self, BootstrapError> {
        config.validate()?;
        Ok(Self {
            client,
            config,
            reporter: (),
        })
    }
}

#[allow(clippy::future_not_send)]
impl<C: ClientCommands, R: ProgressReporter> Bootstrapper<C, R> {
    /// Replaces the progress reporter.
    #[must_use]
    pub fn with_reporter<T: ProgressReporter>(self, reporter: T) -> Bootstrapper<C, T> {
        Bootstrapper {
            client: self.client,
            config: self.config,
            reporter,
        }
    }

    /// Runs the full sequence once.
    ///
    /// # Errors
    ///
    /// Any transport failure, timeout, non-zero response code, missing account
    /// or empty credential aborts the run.
    pub async fn run(&mut self) -> Result<Credentials, BootstrapError> {
        self.initial_set_parameters().await?;
        let account_id = match self.config.mode {
            Mode::Create => self.create_account().await?,
            Mode::Recover => self.recover_account().await?,
        };
        self.authorize(account_id).await
    }

    /// Stops the running account and brings it back up with fresh credentials.
    ///
    /// The account is stopped without removing data, re-selected by the
    /// original identifier, and a new session and bearer key are issued.
    ///
    /// # Errors
    ///
    /// Fails like [`Bootstrapper::run`].
    pub async fn restart(&mut self, current: &Credentials) -> Result<Credentials, BootstrapError> {
        let timeout = self.config.timeout;
        checked(
            RpcCall::AccountStop,
            timeout,
            self.client.account_stop(
                AccountStopRequest { remove_data: false },
                &current.session_token,
            ),
        )
        .await?;
        info!(account_id = %current.account_id, "account stopped");
        self.reporter.report(&Progress::AccountStopped {
            account_id: &current.account_id,
        });

        let account_id = current.account_id.clone();
        self.select_account(&account_id).await?;
        self.authorize(account_id).await
    }

    async fn initial_set_parameters(&mut self) -> Result<(), BootstrapError> {
        let request = InitialSetParametersRequest {
            platform: self.config.platform.clone(),
            version: self.config.version.clone(),
            workdir: self.config.root_path.clone(),
        };
        checked(
            RpcCall::InitialSetParameters,
            self.config.timeout,
            self.client.initial_set_parameters(request),
        )
        .await?;
        Ok(())
    }

    async fn create_account(&mut self) -> Result<String, BootstrapError> {
        let request = WalletCreateRequest {
            root_path: self.config.root_path.clone(),
        };
        let wallet = checked(
            RpcCall::WalletCreate,
            self.config.timeout,
            self.client.wallet_create(request),
        )
        .await?;
        self.config.identity = IdentityMaterial::new(Some(wallet.mnemonic), Some(wallet.account_key));
        if self.config.identity.is_empty() {
            return Err(BootstrapError::EmptyCredential {
                call: RpcCall::WalletCreate,
                field: "mnemonic",
            });
        }
        info!("wallet created");
        self.reporter
            .report(&Progress::WalletCreated(&self.config.identity));

        let request = AccountCreateRequest {
            name: self.config.profile_name.clone(),
            icon: defaults::PROFILE_ICON,
            json_api_listen_addr: self.config.json_api_addr.clone(),
        };
        let response = checked(
            RpcCall::AccountCreate,
            self.config.timeout,
            self.client.account_create(request),
        )
        .await?;
        let account_id = response
            .account
            .map(|account| account.id)
            .filter(|id| !id.is_empty())
            .ok_or(BootstrapError::MissingAccount {
                call: RpcCall::AccountCreate,
            })?;
        info!(%account_id, "account created");
        self.reporter.report(&Progress::AccountCreated {
            account_id: &account_id,
        });
        Ok(account_id)
    }

    async fn recover_account(&mut self) -> Result<String, BootstrapError> {
        let identity = &self.config.identity;
        let request = WalletRecoverRequest {
            root_path: self.config.root_path.clone(),
            mnemonic: expose_or_empty(identity.mnemonic()),
            account_key: expose_or_empty(identity.account_key()),
        };
        checked(
            RpcCall::WalletRecover,
            self.config.timeout,
            self.client.wallet_recover(request),
        )
        .await?;
        info!("wallet recovery completed");
        self.reporter.report(&Progress::WalletRecovered);

        let account_id = match self.config.account_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                let derived = self.config.identity.derive_account_id()?;
                info!(account_id = %derived, "account id derived from identity material");
                derived
            }
        };
        self.select_account(&account_id).await?;
        Ok(account_id)
    }

    async fn select_account(&mut self, account_id: &str) -> Result<(), BootstrapError> {
        let request = AccountSelectRequest {
            id: account_id.to_string(),
            root_path: self.config.root_path.clone(),
            json_api_listen_addr: self.config.json_api_addr.clone(),
        };
        let response = checked(
            RpcCall::AccountSelect,
            self.config.timeout,
            self.client.account_select(request),
        )
        .await?;
        match response.account.map(|account| account.id) {
            Some(selected) if !selected.is_empty() && selected != account_id => {
                warn!(
                    requested = account_id,
                    %selected,
                    "server selected a different account, keeping the requested id"
                );
            }
            _ => info!(account_id, "account selected"),
        }
        self.reporter
            .report(&Progress::AccountSelected { account_id });
        Ok(())
    }

    /// Opens a session and exchanges it for a JSON API bearer key.
    async fn authorize(&mut self, account_id: String) -> Result<Credentials, BootstrapError> {
        let auth = self
            .config
            .identity
            .session_auth()
            .ok_or(BootstrapError::MissingIdentity)?;
        let request = WalletCreateSessionRequest {
            auth: Some(auth.to_proto()),
        };
        let session = checked(
            RpcCall::WalletCreateSession,
            self.config.timeout,
            self.client.wallet_create_session(request),
        )
        .await?;
        if session.token.is_empty() {
            return Err(BootstrapError::EmptyCredential {
                call: RpcCall::WalletCreateSession,
                field: "token",
            });
        }
        let session_token = SecretString::from(session.token);
        info!("session created");
        self.reporter.report(&Progress::SessionCreated);

        let request = AccountLocalLinkCreateAppRequest {
            app: Some(AppInfo {
                app_name: self.config.app_name.clone(),
                scope: LocalApiScope::JsonApi.into(),
                ..AppInfo::default()
            }),
        };
        let app = checked(
            RpcCall::AccountLocalLinkCreateApp,
            self.config.timeout,
            self.client
                .account_local_link_create_app(request, &session_token),
        )
        .await?;
        if app.app_key.is_empty() {
            return Err(BootstrapError::EmptyCredential {
                call: RpcCall::AccountLocalLinkCreateApp,
                field: "app key",
            });
        }
        info!(app_name = %self.config.app_name, "app key issued");
        self.reporter.report(&Progress::AppKeyIssued {
            app_name: &self.config.app_name,
        });

        Ok(Credentials {
            account_id,
            bearer_key: SecretString::from(app.app_key),
            session_token,
        })
    }
}

/// Awaits `call` under `timeout` and turns every failure mode into a [`BootstrapError`].
#[allow(clippy::future_not_send)]
async fn checked<R: RpcResponse>(
    call: RpcCall,
    timeout: Duration,
    response: impl Future<Output = Result<R, Status>>,
) -> Result<R, BootstrapError> {
    let response = tokio::time::timeout(timeout, response)
        .await
        .map_err(|_| BootstrapError::Timeout {
            call,
            after: timeout,
        })?
        .map_err(|status| BootstrapError::Transport {
            call,
            status: Box::new(status),
        })?;
    if let Some(error) = response.response_error() {
        if error.code() != 0 {
            return Err(BootstrapError::Rpc {
                call,
                code: error.code(),
                description: error.description().to_string(),
            });
        }
    }
    Ok(response)
}

fn expose_or_empty(secret: Option<&SecretString>) -> String {
    secret
        .map(|secret| secret.expose_secret().to_owned())
        .unwrap_or_default()
}
