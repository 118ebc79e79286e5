use crate::identity::IdentityMaterial;

/// A stage of the bootstrap sequence that completed, with the identifiers it produced.
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    /// `WalletCreate` returned a fresh identity. Emitted before the account is created.
    WalletCreated(&'a IdentityMaterial),
    /// `WalletRecover` accepted the supplied identity.
    WalletRecovered,
    /// `AccountCreate` returned a new account.
    AccountCreated {
        /// Identifier of the created account.
        account_id: &'a str,
    },
    /// `AccountSelect` started the account.
    AccountSelected {
        /// The requested identifier, which is the one kept for the rest of the run.
        account_id: &'a str,
    },
    /// `AccountStop` stopped the account ahead of a restart.
    AccountStopped {
        /// Identifier of the stopped account.
        account_id: &'a str,
    },
    /// `WalletCreateSession` issued a session token.
    SessionCreated,
    /// `AccountLocalLinkCreateApp` issued a bearer key.
    AppKeyIssued {
        /// Application the key was issued for.
        app_name: &'a str,
    },
}

/// Receives every [`Progress`] event as soon as the stage completes.
///
/// Results reported here are not lost if a later call fails, which matters for
/// the identity generated by `WalletCreate`.
///
/// # Examples
///
/// ```rust
/// use jsonapi_bootstrap_core::{Progress, ProgressReporter};
///
/// struct Stages(Vec<String>);
///
/// impl ProgressReporter for Stages {
///     fn report(&mut self, progress: &Progress<'_>) {
///         self.0.push(format!("{progress:?}"));
///     }
/// }
/// ```
pub trait ProgressReporter {
    /// Called once per completed stage, in call order.
    fn report(&mut self, progress: &Progress<'_>);
}

/// Discards every event.
impl ProgressReporter for () {
    fn report(&mut self, _progress: &Progress<'_>) {}
}
