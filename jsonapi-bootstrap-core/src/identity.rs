use secrecy::{ExposeSecret, SecretString};

use crate::{derivation, error::DerivationError, rpc::proto::wallet_create_session_request::Auth};

/// Identity material authenticating a wallet: a mnemonic, an account key, or both.
///
/// Empty or whitespace-only values count as absent. Secrets are redacted from
/// `Debug` output.
#[derive(Debug, Default)]
pub struct IdentityMaterial {
    mnemonic: Option<SecretString>,
    account_key: Option<SecretString>,
}

impl IdentityMaterial {
    /// Builds identity material from optional raw values.
    #[must_use]
    pub fn new(mnemonic: Option<String>, account_key: Option<String>) -> Self {
        Self {
            mnemonic: non_empty(mnemonic),
            account_key: non_empty(account_key),
        }
    }

    /// Returns the mnemonic, if any.
    #[must_use]
    pub const fn mnemonic(&self) -> Option<&SecretString> {
        self.mnemonic.as_ref()
    }

    /// Returns the base64 account key, if any.
    #[must_use]
    pub const fn account_key(&self) -> Option<&SecretString> {
        self.account_key.as_ref()
    }

    /// Returns `true` when neither a mnemonic nor an account key is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.mnemonic.is_none() && self.account_key.is_none()
    }

    /// Picks the credential used to open a session. The account key wins over the mnemonic.
    #[must_use]
    pub fn session_auth(&self) -> Option<SessionAuth<'_>> {
        self.account_key
            .as_ref()
            .map(SessionAuth::AccountKey)
            .or_else(|| self.mnemonic.as_ref().map(SessionAuth::Mnemonic))
    }

    /// Derives the account identifier at the default index.
    ///
    /// The mnemonic is used when present, the account key otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the material is missing or malformed.
    pub fn derive_account_id(&self) -> Result<String, DerivationError> {
        if let Some(mnemonic) = &self.mnemonic {
            return derivation::account_id_from_mnemonic(
                mnemonic.expose_secret(),
                crate::defaults::ACCOUNT_INDEX,
            );
        }
        match &self.account_key {
            Some(account_key) => {
                derivation::account_id_from_account_key(account_key.expose_secret())
            }
            None => Err(DerivationError::NoIdentity),
        }
    }
}

/// Credential presented to `WalletCreateSession`.
#[derive(Debug, Clone, Copy)]
pub enum SessionAuth<'a> {
    /// Authenticate with the base64 account key.
    AccountKey(&'a SecretString),
    /// Authenticate with the mnemonic.
    Mnemonic(&'a SecretString),
}

impl SessionAuth<'_> {
    pub(crate) fn to_proto(self) -> Auth {
        match self {
            Self::AccountKey(key) => Auth::AccountKey(key.expose_secret().to_owned()),
            Self::Mnemonic(mnemonic) => Auth::Mnemonic(mnemonic.expose_secret().to_owned()),
        }
    }
}

/// Credentials produced by a successful bootstrap.
#[derive(Debug)]
pub struct Credentials {
    /// Identifier of the created or selected account.
    pub account_id: String,
    /// Bearer key for the JSON API.
    pub bearer_key: SecretString,
    /// Session token for account scoped gRPC calls.
    pub session_token: SecretString,
}

fn non_empty(value: Option<String>) -> Option<SecretString> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(SecretString::from)
}
