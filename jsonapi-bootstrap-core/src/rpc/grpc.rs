use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tonic::{
    codec::ProstCodec,
    codegen::http::uri::PathAndQuery,
    metadata::AsciiMetadataValue,
    transport::{Channel, Endpoint},
    IntoRequest, Request, Status,
};

use super::{proto, ClientCommands};
use crate::error::BootstrapError;

/// Metadata key carrying the session token on account scoped calls.
const TOKEN_METADATA_KEY: &str = "token";

/// `ClientCommands` over a single tonic channel held for the whole run.
#[derive(Debug, Clone)]
pub struct GrpcClient {
    inner: tonic::client::Grpc<Channel>,
}

impl GrpcClient {
    /// Dials the server at `addr` (`host:port`, plaintext HTTP/2).
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Connect`] if the address is invalid or the
    /// connection cannot be established within `connect_timeout`.
    pub async fn connect(addr: &str, connect_timeout: Duration) -> Result<Self, BootstrapError> {
        let connect_error = |source| BootstrapError::Connect {
            addr: addr.to_string(),
            source,
        };
        let channel = Endpoint::from_shared(format!("http://{addr}"))
            .map_err(connect_error)?
            .connect_timeout(connect_timeout)
            .connect()
            .await
            .map_err(connect_error)?;
        Ok(Self::new(channel))
    }

    /// Wraps an already established channel.
    #[must_use]
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    async fn unary<Req, Resp>(
        &mut self,
        request: Request<Req>,
        path: &'static str,
    ) -> Result<Resp, Status>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        self.inner
            .ready()
            .await
            .map_err(|e| Status::unknown(format!("Service was not ready: {e}")))?;
        let codec = ProstCodec::<Req, Resp>::default();
        self.inner
            .unary(request, PathAndQuery::from_static(path), codec)
            .await
            .map(tonic::Response::into_inner)
    }
}

/// Wraps `message` in a request carrying the session token as `token` metadata.
pub(crate) fn with_session<T>(message: T, session_token: &SecretString) -> Result<Request<T>, Status> {
    let token: AsciiMetadataValue = session_token
        .expose_secret()
        .parse()
        .map_err(|_| Status::invalid_argument("session token is not valid metadata"))?;
    let mut request = message.into_request();
    request.metadata_mut().insert(TOKEN_METADATA_KEY, token);
    Ok(request)
}

impl ClientCommands for GrpcClient {
    async fn initial_set_parameters(
        &mut self,
        request: proto::InitialSetParametersRequest,
    ) -> Result<proto::InitialSetParametersResponse, Status> {
        self.unary(
            request.into_request(),
            "/anytype.ClientCommands/InitialSetParameters",
        )
        .await
    }

    async fn wallet_create(
        &mut self,
        request: proto::WalletCreateRequest,
    ) -> Result<proto::WalletCreateResponse, Status> {
        self.unary(request.into_request(), "/anytype.ClientCommands/WalletCreate")
            .await
    }

    async fn wallet_recover(
        &mut self,
        request: proto::WalletRecoverRequest,
    ) -> Result<proto::WalletRecoverResponse, Status> {
        self.unary(request.into_request(), "/anytype.ClientCommands/WalletRecover")
            .await
    }

    async fn wallet_create_session(
        &mut self,
        request: proto::WalletCreateSessionRequest,
    ) -> Result<proto::WalletCreateSessionResponse, Status> {
        self.unary(
            request.into_request(),
            "/anytype.ClientCommands/WalletCreateSession",
        )
        .await
    }

    async fn account_create(
        &mut self,
        request: proto::AccountCreateRequest,
    ) -> Result<proto::AccountCreateResponse, Status> {
        self.unary(request.into_request(), "/anytype.ClientCommands/AccountCreate")
            .await
    }

    async fn account_select(
        &mut self,
        request: proto::AccountSelectRequest,
    ) -> Result<proto::AccountSelectResponse, Status> {
        self.unary(request.into_request(), "/anytype.ClientCommands/AccountSelect")
            .await
    }

    async fn account_stop(
        &mut self,
        request: proto::AccountStopRequest,
        session_token: &SecretString,
    ) -> Result<proto::AccountStopResponse, Status> {
        let request = with_session(request, session_token)?;
        self.unary(request, "/anytype.ClientCommands/AccountStop").await
    }

    async fn account_local_link_create_app(
        &mut self,
        request: proto::AccountLocalLinkCreateAppRequest,
        session_token: &SecretString,
    ) -> Result<proto::AccountLocalLinkCreateAppResponse, Status> {
        let request = with_session(request, session_token)?;
        self.unary(
            request,
            "/anytype.ClientCommands/AccountLocalLinkCreateApp",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_is_sent_as_metadata() {
        let token = SecretString::from("s1");
        let request = with_session(proto::AccountStopRequest::default(), &token).unwrap();
        assert_eq!(
            request
                .metadata()
                .get(TOKEN_METADATA_KEY)
                .and_then(|value| value.to_str().ok()),
            Some("s1")
        );
    }

    #[test]
    fn test_session_token_with_control_characters_is_rejected() {
        let token = SecretString::from("bad\ntoken");
        let status = with_session(proto::AccountStopRequest::default(), &token).unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_address() {
        let result = GrpcClient::connect("not a host:port", Duration::from_millis(50)).await;
        assert!(matches!(result, Err(BootstrapError::Connect { .. })));
    }
}
