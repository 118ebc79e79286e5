// Subset of anytype-heart `pb/protos/commands.proto` and `models.proto`
// consumed by the bootstrap. Checked in by hand for offline builds; only the
// fields read or written here are declared, tags follow upstream.
#![allow(missing_docs, clippy::derive_partial_eq_without_eq)]

/// Scope of an application key issued through the local link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum LocalApiScope {
    Limited = 0,
    JsonApi = 1,
    Full = 2,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Account {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AppInfo {
    #[prost(string, tag = "1")]
    pub app_hash: String,
    #[prost(string, tag = "2")]
    pub app_name: String,
    #[prost(string, tag = "3")]
    pub app_key: String,
    #[prost(enumeration = "LocalApiScope", tag = "6")]
    pub scope: i32,
}

// InitialSetParameters

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InitialSetParametersRequest {
    #[prost(string, tag = "1")]
    pub platform: String,
    #[prost(string, tag = "2")]
    pub version: String,
    #[prost(string, tag = "3")]
    pub workdir: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InitialSetParametersResponse {
    #[prost(message, optional, tag = "1")]
    pub error: Option<InitialSetParametersResponseError>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InitialSetParametersResponseError {
    #[prost(int32, tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub description: String,
}

// WalletCreate

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WalletCreateRequest {
    #[prost(string, tag = "1")]
    pub root_path: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WalletCreateResponse {
    #[prost(message, optional, tag = "1")]
    pub error: Option<WalletCreateResponseError>,
    #[prost(string, tag = "2")]
    pub mnemonic: String,
    #[prost(string, tag = "3")]
    pub account_key: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WalletCreateResponseError {
    #[prost(int32, tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub description: String,
}

// WalletRecover

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WalletRecoverRequest {
    #[prost(string, tag = "1")]
    pub root_path: String,
    #[prost(string, tag = "2")]
    pub mnemonic: String,
    #[prost(string, tag = "4")]
    pub account_key: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WalletRecoverResponse {
    #[prost(message, optional, tag = "1")]
    pub error: Option<WalletRecoverResponseError>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WalletRecoverResponseError {
    #[prost(int32, tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub description: String,
}

// WalletCreateSession

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WalletCreateSessionRequest {
    #[prost(oneof = "wallet_create_session_request::Auth", tags = "1, 2, 3, 4")]
    pub auth: Option<wallet_create_session_request::Auth>,
}

pub mod wallet_create_session_request {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Auth {
        #[prost(string, tag = "1")]
        Mnemonic(String),
        #[prost(string, tag = "2")]
        AppKey(String),
        #[prost(string, tag = "3")]
        Token(String),
        #[prost(string, tag = "4")]
        AccountKey(String),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WalletCreateSessionResponse {
    #[prost(message, optional, tag = "1")]
    pub error: Option<WalletCreateSessionResponseError>,
    #[prost(string, tag = "2")]
    pub token: String,
    #[prost(string, tag = "4")]
    pub account_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WalletCreateSessionResponseError {
    #[prost(int32, tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub description: String,
}

// AccountCreate

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountCreateRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(int64, tag = "4")]
    pub icon: i64,
    #[prost(string, tag = "9")]
    pub json_api_listen_addr: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountCreateResponse {
    #[prost(message, optional, tag = "1")]
    pub error: Option<AccountCreateResponseError>,
    #[prost(message, optional, tag = "2")]
    pub account: Option<Account>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountCreateResponseError {
    #[prost(int32, tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub description: String,
}

// AccountSelect

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountSelectRequest {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub root_path: String,
    #[prost(string, tag = "7")]
    pub json_api_listen_addr: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountSelectResponse {
    #[prost(message, optional, tag = "1")]
    pub error: Option<AccountSelectResponseError>,
    #[prost(message, optional, tag = "2")]
    pub account: Option<Account>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountSelectResponseError {
    #[prost(int32, tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub description: String,
}

// AccountStop

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountStopRequest {
    #[prost(bool, tag = "1")]
    pub remove_data: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountStopResponse {
    #[prost(message, optional, tag = "1")]
    pub error: Option<AccountStopResponseError>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountStopResponseError {
    #[prost(int32, tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub description: String,
}

// AccountLocalLinkCreateApp

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountLocalLinkCreateAppRequest {
    #[prost(message, optional, tag = "1")]
    pub app: Option<AppInfo>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountLocalLinkCreateAppResponse {
    #[prost(message, optional, tag = "1")]
    pub error: Option<AccountLocalLinkCreateAppResponseError>,
    #[prost(string, tag = "2")]
    pub app_key: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountLocalLinkCreateAppResponseError {
    #[prost(int32, tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub description: String,
}
