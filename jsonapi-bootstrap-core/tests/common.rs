//! Common test doubles shared across integration tests.
#![allow(dead_code, missing_docs)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use jsonapi_bootstrap_core::{
    rpc::{
        proto::{self, wallet_create_session_request::Auth},
        ClientCommands, RpcCall,
    },
    Progress, ProgressReporter, Space, SpacesError, SpacesSource,
};
use secrecy::{ExposeSecret, SecretString};
use tokio::time::Instant;
use tonic::Status;

/// One request observed by [`MockClient`], with the session token for account scoped calls.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    InitialSetParameters(proto::InitialSetParametersRequest),
    WalletCreate(proto::WalletCreateRequest),
    WalletRecover(proto::WalletRecoverRequest),
    WalletCreateSession(proto::WalletCreateSessionRequest),
    AccountCreate(proto::AccountCreateRequest),
    AccountSelect(proto::AccountSelectRequest),
    AccountStop {
        request: proto::AccountStopRequest,
        token: String,
    },
    AccountLocalLinkCreateApp {
        request: proto::AccountLocalLinkCreateAppRequest,
        token: String,
    },
}

impl Recorded {
    pub const fn call(&self) -> RpcCall {
        match self {
            Self::InitialSetParameters(_) => RpcCall::InitialSetParameters,
            Self::WalletCreate(_) => RpcCall::WalletCreate,
            Self::WalletRecover(_) => RpcCall::WalletRecover,
            Self::WalletCreateSession(_) => RpcCall::WalletCreateSession,
            Self::AccountCreate(_) => RpcCall::AccountCreate,
            Self::AccountSelect(_) => RpcCall::AccountSelect,
            Self::AccountStop { .. } => RpcCall::AccountStop,
            Self::AccountLocalLinkCreateApp { .. } => RpcCall::AccountLocalLinkCreateApp,
        }
    }
}

/// Shared view of the requests a [`MockClient`] received, usable after the client moved.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Recorded>>>);

impl CallLog {
    pub fn records(&self) -> Vec<Recorded> {
        self.0.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<RpcCall> {
        self.records().iter().map(Recorded::call).collect()
    }

    pub fn count(&self, call: RpcCall) -> usize {
        self.calls().into_iter().filter(|c| *c == call).count()
    }

    /// Session auth of every `WalletCreateSession`, in order.
    pub fn session_auths(&self) -> Vec<Auth> {
        self.records()
            .into_iter()
            .filter_map(|record| match record {
                Recorded::WalletCreateSession(request) => request.auth,
                _ => None,
            })
            .collect()
    }

    fn push(&self, record: Recorded) {
        self.0.lock().unwrap().push(record);
    }
}

/// Scripted `ClientCommands` double.
///
/// By default every call succeeds: `WalletCreate` yields `("abc", "k1")`,
/// `AccountCreate` yields `acc1`, and the n-th session and app key are `sN`
/// and `bkN`.
#[derive(Debug, Default)]
pub struct MockClient {
    log: CallLog,
    sessions: u32,
    app_keys: u32,
    rpc_errors: HashMap<RpcCall, (i32, String)>,
    unavailable: HashSet<RpcCall>,
    hanging: HashSet<RpcCall>,
    empty_session_token: bool,
    omit_created_account: bool,
    selected_account: Option<String>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// Makes `call` answer with a non-zero error code.
    pub fn with_rpc_error(mut self, call: RpcCall, code: i32, description: &str) -> Self {
        self.rpc_errors.insert(call, (code, description.to_string()));
        self
    }

    /// Makes `call` fail at the transport level.
    pub fn with_unavailable(mut self, call: RpcCall) -> Self {
        self.unavailable.insert(call);
        self
    }

    /// Makes `call` never complete.
    pub fn with_hanging(mut self, call: RpcCall) -> Self {
        self.hanging.insert(call);
        self
    }

    pub const fn with_empty_session_token(mut self) -> Self {
        self.empty_session_token = true;
        self
    }

    pub const fn without_created_account(mut self) -> Self {
        self.omit_created_account = true;
        self
    }

    /// Makes `AccountSelect` report `id` as the selected account.
    pub fn with_selected_account(mut self, id: &str) -> Self {
        self.selected_account = Some(id.to_string());
        self
    }

    async fn enter(&self, record: Recorded) -> Result<(), Status> {
        let call = record.call();
        self.log.push(record);
        if self.hanging.contains(&call) {
            std::future::pending::<()>().await;
        }
        if self.unavailable.contains(&call) {
            return Err(Status::unavailable("connection refused"));
        }
        Ok(())
    }

    fn error(&self, call: RpcCall) -> Option<(i32, String)> {
        self.rpc_errors.get(&call).cloned()
    }
}

impl ClientCommands for MockClient {
    async fn initial_set_parameters(
        &mut self,
        request: proto::InitialSetParametersRequest,
    ) -> Result<proto::InitialSetParametersResponse, Status> {
        self.enter(Recorded::InitialSetParameters(request)).await?;
        Ok(proto::InitialSetParametersResponse {
            error: self.error(RpcCall::InitialSetParameters).map(|(code, description)| {
                proto::InitialSetParametersResponseError { code, description }
            }),
        })
    }

    async fn wallet_create(
        &mut self,
        request: proto::WalletCreateRequest,
    ) -> Result<proto::WalletCreateResponse, Status> {
        self.enter(Recorded::WalletCreate(request)).await?;
        Ok(proto::WalletCreateResponse {
            error: self
                .error(RpcCall::WalletCreate)
                .map(|(code, description)| proto::WalletCreateResponseError { code, description }),
            mnemonic: "abc".to_string(),
            account_key: "k1".to_string(),
        })
    }

    async fn wallet_recover(
        &mut self,
        request: proto::WalletRecoverRequest,
    ) -> Result<proto::WalletRecoverResponse, Status> {
        self.enter(Recorded::WalletRecover(request)).await?;
        Ok(proto::WalletRecoverResponse {
            error: self
                .error(RpcCall::WalletRecover)
                .map(|(code, description)| proto::WalletRecoverResponseError { code, description }),
        })
    }

    async fn wallet_create_session(
        &mut self,
        request: proto::WalletCreateSessionRequest,
    ) -> Result<proto::WalletCreateSessionResponse, Status> {
        self.enter(Recorded::WalletCreateSession(request)).await?;
        self.sessions += 1;
        let token = if self.empty_session_token {
            String::new()
        } else {
            format!("s{}", self.sessions)
        };
        Ok(proto::WalletCreateSessionResponse {
            error: self
                .error(RpcCall::WalletCreateSession)
                .map(|(code, description)| proto::WalletCreateSessionResponseError {
                    code,
                    description,
                }),
            token,
            account_id: String::new(),
        })
    }

    async fn account_create(
        &mut self,
        request: proto::AccountCreateRequest,
    ) -> Result<proto::AccountCreateResponse, Status> {
        self.enter(Recorded::AccountCreate(request)).await?;
        Ok(proto::AccountCreateResponse {
            error: self
                .error(RpcCall::AccountCreate)
                .map(|(code, description)| proto::AccountCreateResponseError { code, description }),
            account: (!self.omit_created_account).then(|| proto::Account {
                id: "acc1".to_string(),
            }),
        })
    }

    async fn account_select(
        &mut self,
        request: proto::AccountSelectRequest,
    ) -> Result<proto::AccountSelectResponse, Status> {
        let id = self
            .selected_account
            .clone()
            .unwrap_or_else(|| request.id.clone());
        self.enter(Recorded::AccountSelect(request)).await?;
        Ok(proto::AccountSelectResponse {
            error: self
                .error(RpcCall::AccountSelect)
                .map(|(code, description)| proto::AccountSelectResponseError { code, description }),
            account: Some(proto::Account { id }),
        })
    }

    async fn account_stop(
        &mut self,
        request: proto::AccountStopRequest,
        session_token: &SecretString,
    ) -> Result<proto::AccountStopResponse, Status> {
        self.enter(Recorded::AccountStop {
            request,
            token: session_token.expose_secret().to_string(),
        })
        .await?;
        Ok(proto::AccountStopResponse {
            error: self
                .error(RpcCall::AccountStop)
                .map(|(code, description)| proto::AccountStopResponseError { code, description }),
        })
    }

    async fn account_local_link_create_app(
        &mut self,
        request: proto::AccountLocalLinkCreateAppRequest,
        session_token: &SecretString,
    ) -> Result<proto::AccountLocalLinkCreateAppResponse, Status> {
        self.enter(Recorded::AccountLocalLinkCreateApp {
            request,
            token: session_token.expose_secret().to_string(),
        })
        .await?;
        self.app_keys += 1;
        Ok(proto::AccountLocalLinkCreateAppResponse {
            error: self
                .error(RpcCall::AccountLocalLinkCreateApp)
                .map(|(code, description)| proto::AccountLocalLinkCreateAppResponseError {
                    code,
                    description,
                }),
            app_key: format!("bk{}", self.app_keys),
        })
    }
}

/// Keeps every progress event as a line, readable after the reporter moved.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter(Arc<Mutex<Vec<String>>>);

impl RecordingReporter {
    pub fn lines(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn report(&mut self, progress: &Progress<'_>) {
        let line = match progress {
            Progress::WalletCreated(identity) => format!(
                "wallet created: mnemonic={} account_key={}",
                identity.mnemonic().map_or("", ExposeSecret::expose_secret),
                identity.account_key().map_or("", ExposeSecret::expose_secret),
            ),
            Progress::WalletRecovered => "wallet recovered".to_string(),
            Progress::AccountCreated { account_id } => format!("account created: {account_id}"),
            Progress::AccountSelected { account_id } => format!("account selected: {account_id}"),
            Progress::AccountStopped { account_id } => format!("account stopped: {account_id}"),
            Progress::SessionCreated => "session created".to_string(),
            Progress::AppKeyIssued { app_name } => format!("app key issued: {app_name}"),
        };
        self.0.lock().unwrap().push(line);
    }
}

/// Result of one scripted spaces listing.
#[derive(Debug, Clone)]
pub enum Attempt {
    Empty,
    Status(u16),
    Spaces(Vec<Space>),
}

/// Scripted `SpacesSource` that records when it was asked and with which key.
#[derive(Debug)]
pub struct FakeSpaces {
    script: Mutex<VecDeque<Attempt>>,
    ready_key: Option<String>,
    seen: Mutex<Vec<(Instant, String)>>,
}

impl FakeSpaces {
    /// Plays `attempts` in order, then answers with an empty listing forever.
    pub fn scripted(attempts: Vec<Attempt>) -> Self {
        Self {
            script: Mutex::new(attempts.into()),
            ready_key: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn never_ready() -> Self {
        Self::scripted(Vec::new())
    }

    /// Lists spaces only for requests carrying `bearer_key`.
    pub fn ready_for_key(bearer_key: &str) -> Self {
        Self {
            ready_key: Some(bearer_key.to_string()),
            ..Self::never_ready()
        }
    }

    pub fn bearer_keys(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|(_, key)| key.clone())
            .collect()
    }

    pub fn attempt_times(&self) -> Vec<Instant> {
        self.seen.lock().unwrap().iter().map(|(at, _)| *at).collect()
    }
}

impl SpacesSource for FakeSpaces {
    async fn list_spaces(&self, bearer_key: &SecretString) -> Result<Vec<Space>, SpacesError> {
        let key = bearer_key.expose_secret().to_string();
        self.seen.lock().unwrap().push((Instant::now(), key.clone()));
        if let Some(ready_key) = &self.ready_key {
            return if *ready_key == key {
                Ok(vec![space("bafy-personal", "Personal")])
            } else {
                Err(SpacesError::Status { status: 401 })
            };
        }
        match self.script.lock().unwrap().pop_front() {
            Some(Attempt::Spaces(spaces)) => Ok(spaces),
            Some(Attempt::Status(status)) => Err(SpacesError::Status { status }),
            Some(Attempt::Empty) | None => Err(SpacesError::Empty),
        }
    }
}

pub fn space(id: &str, name: &str) -> Space {
    Space {
        id: id.to_string(),
        name: name.to_string(),
    }
}
