use std::time::Duration;

use thiserror::Error;

use crate::rpc::RpcCall;

/// Fatal errors of the bootstrap sequence.
///
/// Transport failures and application error codes carried inside a response
/// stay separate variants so the call name, numeric code and description can
/// be reported as-is.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The root storage path was not provided.
    #[error("missing required root path")]
    MissingRootPath,
    /// Recovery was requested without a mnemonic or an account key.
    #[error("provide either a mnemonic or an account key (or use create mode)")]
    MissingIdentity,
    /// The gRPC channel could not be established.
    #[error("dial gRPC {addr}: {source}")]
    Connect {
        /// Address that was dialed.
        addr: String,
        /// Underlying transport error.
        #[source]
        source: tonic::transport::Error,
    },
    /// The call failed at the transport level.
    #[error("{call} call failed: {status}")]
    Transport {
        /// The call that failed.
        call: RpcCall,
        /// Status returned by the transport.
        status: Box<tonic::Status>,
    },
    /// The call did not complete within the per-call timeout.
    #[error("{call} call failed: timed out after {after:?}")]
    Timeout {
        /// The call that timed out.
        call: RpcCall,
        /// The timeout that elapsed.
        after: Duration,
    },
    /// The server answered with a non-zero application error code.
    #[error("{call} RPC error: code={code} desc={description}")]
    Rpc {
        /// The call that returned the error.
        call: RpcCall,
        /// Numeric error code from the response payload.
        code: i32,
        /// Human readable description from the response payload.
        description: String,
    },
    /// The call succeeded but did not carry the expected account object.
    #[error("{call} succeeded but account is missing")]
    MissingAccount {
        /// The call that omitted the account.
        call: RpcCall,
    },
    /// The call succeeded but returned an empty token or key.
    #[error("{call} returned empty {field}")]
    EmptyCredential {
        /// The call that returned the empty value.
        call: RpcCall,
        /// Name of the empty field.
        field: &'static str,
    },
    /// The account identifier could not be derived from the identity material.
    #[error("derive account ID: {0}")]
    Derivation(#[from] DerivationError),
}

/// Errors deriving an account identifier from identity material.
#[derive(Debug, Error)]
pub enum DerivationError {
    /// The mnemonic is not a valid BIP-39 phrase.
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(#[from] bip39::Error),
    /// The account key is not valid base64.
    #[error("invalid account key encoding: {0}")]
    InvalidAccountKey(#[from] base64::DecodeError),
    /// The decoded account key does not hold a key and a chain code.
    #[error("invalid account key length: expected 64 bytes, got {found}")]
    InvalidNodeLength {
        /// Number of decoded bytes.
        found: usize,
    },
    /// Neither a mnemonic nor an account key was available.
    #[error("no mnemonic or account key available")]
    NoIdentity,
}

/// Reasons a single `GET /v1/spaces` attempt did not yield data.
#[derive(Debug, Error)]
pub enum SpacesError {
    /// The request failed before a response was received.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("unexpected status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },
    /// The body could not be decoded.
    #[error("decode spaces response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The server answered successfully but listed no spaces.
    #[error("no spaces listed yet")]
    Empty,
}

/// Spaces did not become visible within the wait budget.
///
/// This is reported to the operator but never aborts the run.
#[derive(Debug, Error)]
pub enum ReadinessError {
    /// Every attempt inside the wait budget failed.
    #[error("spaces still empty or unavailable after {waited:?}: {last_failure}")]
    Exhausted {
        /// Wait budget that elapsed.
        waited: Duration,
        /// Failure of the last attempt.
        #[source]
        last_failure: SpacesError,
    },
}
