#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
//! Bootstraps a local account on a running anytype-heart server.
//!
//! The [`Bootstrapper`] drives the gRPC sequence (initial parameters, wallet
//! creation or recovery, account creation or selection, session and app key
//! issuance) and [`ensure_spaces`] waits for the JSON API to serve data,
//! restarting the account once if nothing shows up in time.
use strum::{Display, EnumString};

/// Whether the run creates a brand new identity or recovers an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Create a new wallet and a new account bound to a profile name.
    Create,
    /// Recover a wallet from supplied identity material and select its account.
    Recover,
}

mod bootstrap;
pub use bootstrap::*;

pub mod defaults;

pub mod derivation;

mod error;
pub use error::*;

mod http_request;

mod identity;
pub use identity::*;

pub mod logger;

mod progress;
pub use progress::*;

mod readiness;
pub use readiness::*;

pub mod rpc;

mod spaces;
pub use spaces::*;
