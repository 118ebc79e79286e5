//! The slice of the anytype-heart `ClientCommands` gRPC service used by the bootstrap.

use secrecy::SecretString;
use strum::{Display, IntoStaticStr};
use tonic::Status;

mod grpc;
pub use grpc::GrpcClient;

pub mod proto;

use proto::{
    AccountCreateRequest, AccountCreateResponse, AccountLocalLinkCreateAppRequest,
    AccountLocalLinkCreateAppResponse, AccountSelectRequest, AccountSelectResponse,
    AccountStopRequest, AccountStopResponse, InitialSetParametersRequest,
    InitialSetParametersResponse, WalletCreateRequest, WalletCreateResponse,
    WalletCreateSessionRequest, WalletCreateSessionResponse, WalletRecoverRequest,
    WalletRecoverResponse,
};

/// Names of the remote calls, used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum RpcCall {
    /// `InitialSetParameters`
    InitialSetParameters,
    /// `WalletCreate`
    WalletCreate,
    /// `WalletRecover`
    WalletRecover,
    /// `WalletCreateSession`
    WalletCreateSession,
    /// `AccountCreate`
    AccountCreate,
    /// `AccountSelect`
    AccountSelect,
    /// `AccountStop`
    AccountStop,
    /// `AccountLocalLinkCreateApp`
    AccountLocalLinkCreateApp,
}

/// Client side of the `ClientCommands` service.
///
/// Implemented by [`GrpcClient`] over a real channel; tests substitute a
/// recording double. Calls that act on the running account take the session
/// token, which is sent as `token` metadata.
#[allow(async_fn_in_trait)]
pub trait ClientCommands {
    /// Pushes client platform, version and working directory to the server.
    async fn initial_set_parameters(
        &mut self,
        request: InitialSetParametersRequest,
    ) -> Result<InitialSetParametersResponse, Status>;

    /// Creates a new wallet under the root path.
    async fn wallet_create(
        &mut self,
        request: WalletCreateRequest,
    ) -> Result<WalletCreateResponse, Status>;

    /// Recovers a wallet from a mnemonic or an account key.
    async fn wallet_recover(
        &mut self,
        request: WalletRecoverRequest,
    ) -> Result<WalletRecoverResponse, Status>;

    /// Opens a session authenticated by identity material.
    async fn wallet_create_session(
        &mut self,
        request: WalletCreateSessionRequest,
    ) -> Result<WalletCreateSessionResponse, Status>;

    /// Creates a new account on the recovered or created wallet.
    async fn account_create(
        &mut self,
        request: AccountCreateRequest,
    ) -> Result<AccountCreateResponse, Status>;

    /// Selects an existing account from storage.
    async fn account_select(
        &mut self,
        request: AccountSelectRequest,
    ) -> Result<AccountSelectResponse, Status>;

    /// Stops the running account.
    async fn account_stop(
        &mut self,
        request: AccountStopRequest,
        session_token: &SecretString,
    ) -> Result<AccountStopResponse, Status>;

    /// Issues an application key through the local link.
    async fn account_local_link_create_app(
        &mut self,
        request: AccountLocalLinkCreateAppRequest,
        session_token: &SecretString,
    ) -> Result<AccountLocalLinkCreateAppResponse, Status>;
}

/// The error submessage of any consumed response.
///
/// Every response type declares its own error message; this enum gives them a
/// uniform `(code, description)` view.
#[derive(Debug, Clone, Copy)]
pub enum ResponseError<'a> {
    /// Error of `InitialSetParameters`.
    InitialSetParameters(&'a proto::InitialSetParametersResponseError),
    /// Error of `WalletCreate`.
    WalletCreate(&'a proto::WalletCreateResponseError),
    /// Error of `WalletRecover`.
    WalletRecover(&'a proto::WalletRecoverResponseError),
    /// Error of `WalletCreateSession`.
    WalletCreateSession(&'a proto::WalletCreateSessionResponseError),
    /// Error of `AccountCreate`.
    AccountCreate(&'a proto::AccountCreateResponseError),
    /// Error of `AccountSelect`.
    AccountSelect(&'a proto::AccountSelectResponseError),
    /// Error of `AccountStop`.
    AccountStop(&'a proto::AccountStopResponseError),
    /// Error of `AccountLocalLinkCreateApp`.
    AccountLocalLinkCreateApp(&'a proto::AccountLocalLinkCreateAppResponseError),
}

impl ResponseError<'_> {
    /// The call this error belongs to.
    #[must_use]
    pub const fn call(&self) -> RpcCall {
        match self {
            Self::InitialSetParameters(_) => RpcCall::InitialSetParameters,
            Self::WalletCreate(_) => RpcCall::WalletCreate,
            Self::WalletRecover(_) => RpcCall::WalletRecover,
            Self::WalletCreateSession(_) => RpcCall::WalletCreateSession,
            Self::AccountCreate(_) => RpcCall::AccountCreate,
            Self::AccountSelect(_) => RpcCall::AccountSelect,
            Self::AccountStop(_) => RpcCall::AccountStop,
            Self::AccountLocalLinkCreateApp(_) => RpcCall::AccountLocalLinkCreateApp,
        }
    }

    /// Numeric error code; zero means success.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::InitialSetParameters(e) => e.code,
            Self::WalletCreate(e) => e.code,
            Self::WalletRecover(e) => e.code,
            Self::WalletCreateSession(e) => e.code,
            Self::AccountCreate(e) => e.code,
            Self::AccountSelect(e) => e.code,
            Self::AccountStop(e) => e.code,
            Self::AccountLocalLinkCreateApp(e) => e.code,
        }
    }

    /// Description attached by the server.
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::InitialSetParameters(e) => &e.description,
            Self::WalletCreate(e) => &e.description,
            Self::WalletRecover(e) => &e.description,
            Self::WalletCreateSession(e) => &e.description,
            Self::AccountCreate(e) => &e.description,
            Self::AccountSelect(e) => &e.description,
            Self::AccountStop(e) => &e.description,
            Self::AccountLocalLinkCreateApp(e) => &e.description,
        }
    }
}

/// A response that may carry an application level error.
pub trait RpcResponse {
    /// Returns the embedded error submessage, if the server set one.
    fn response_error(&self) -> Option<ResponseError<'_>>;
}

macro_rules! impl_rpc_response {
    ($($response:ty => $variant:ident),* $(,)?) => {
        $(
            impl RpcResponse for $response {
                fn response_error(&self) -> Option<ResponseError<'_>> {
                    self.error.as_ref().map(ResponseError::$variant)
                }
            }
        )*
    };
}

impl_rpc_response! {
    InitialSetParametersResponse => InitialSetParameters,
    WalletCreateResponse => WalletCreate,
    WalletRecoverResponse => WalletRecover,
    WalletCreateSessionResponse => WalletCreateSession,
    AccountCreateResponse => AccountCreate,
    AccountSelectResponse => AccountSelect,
    AccountStopResponse => AccountStop,
    AccountLocalLinkCreateAppResponse => AccountLocalLinkCreateApp,
}
