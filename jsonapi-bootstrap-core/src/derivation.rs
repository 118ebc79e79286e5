//! Offline derivation of account identifiers from identity material.
//!
//! The identity key of an account is derived with SLIP-0010 (ed25519, hardened
//! steps only):
//!
//! ```text
//! seed         = BIP39-Seed(mnemonic, passphrase = "")
//! account node = m / 44' / 2046' / index'
//! identity key = account node / 0'
//! ```
//!
//! The account key handed out by the server is the base64 encoding of the
//! account node (`key || chain code`), so both kinds of identity material lead
//! to the same identity key. The public half of that key is encoded as the
//! account identifier:
//!
//! ```text
//! account_id = base58(0x5b || public key || crc16_xmodem_le(0x5b || public key))
//! ```

use base64::{engine::general_purpose::STANDARD, Engine};
use crc::{Crc, CRC_16_XMODEM};
use ed25519_dalek::SigningKey;
use hmac::{Hmac, Mac};
use secrecy::SecretString;
use sha2::Sha512;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::DerivationError;

type HmacSha512 = Hmac<Sha512>;

/// Checksum appended to encoded account addresses.
const ADDRESS_CHECKSUM: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// HMAC key of the SLIP-0010 ed25519 master node.
const ED25519_SEED_KEY: &[u8] = b"ed25519 seed";

/// Offset marking a hardened child index.
const HARDENED_OFFSET: u32 = 0x8000_0000;

/// BIP-44 purpose.
const PURPOSE: u32 = 44;

/// Registered coin type of the account keys.
const COIN_TYPE: u32 = 2046;

/// Child of the account node holding the identity key.
const IDENTITY_CHILD: u32 = 0;

/// Version byte prefixed to encoded account addresses.
const ACCOUNT_ADDRESS_VERSION: u8 = 0x5b;

/// An extended ed25519 private key: 32 bytes of key and 32 bytes of chain code.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
struct ExtendedKey {
    key: [u8; 32],
    chain_code: [u8; 32],
}

impl ExtendedKey {
    /// Computes the master node for `seed`.
    #[must_use]
    fn master(seed: &[u8]) -> Self {
        Self::from_digest(&hmac_sha512(ED25519_SEED_KEY, &[seed]))
    }

    /// Parses a node from its 64-byte `key || chain code` form.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not exactly 64 bytes long.
    fn from_bytes(bytes: &[u8]) -> Result<Self, DerivationError> {
        let digest: &[u8; 64] = bytes
            .try_into()
            .map_err(|_| DerivationError::InvalidNodeLength { found: bytes.len() })?;
        Ok(Self::from_digest(digest))
    }

    /// Derives the hardened child at `index`. Indexes are hardened implicitly.
    #[must_use]
    fn derive_hardened(&self, index: u32) -> Self {
        let index = (index | HARDENED_OFFSET).to_be_bytes();
        Self::from_digest(&hmac_sha512(
            &self.chain_code,
            &[&[0u8][..], &self.key[..], &index[..]],
        ))
    }

    /// Walks a path of hardened indexes starting at this node.
    #[must_use]
    fn derive_path(&self, path: &[u32]) -> Self {
        path.iter()
            .fold(self.clone(), |node, index| node.derive_hardened(*index))
    }

    /// Returns the ed25519 public key of this node.
    #[must_use]
    fn public_key(&self) -> [u8; 32] {
        SigningKey::from_bytes(&self.key).verifying_key().to_bytes()
    }

    /// Serializes the node as `key || chain code`.
    #[must_use]
    fn to_bytes(&self) -> Zeroizing<[u8; 64]> {
        let mut bytes = Zeroizing::new([0u8; 64]);
        bytes[..32].copy_from_slice(&self.key);
        bytes[32..].copy_from_slice(&self.chain_code);
        bytes
    }

    fn from_digest(digest: &[u8; 64]) -> Self {
        let mut key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        key.copy_from_slice(&digest[..32]);
        chain_code.copy_from_slice(&digest[32..]);
        Self { key, chain_code }
    }
}

impl std::fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Derives the account node `m/44'/2046'/index'` from a BIP-39 mnemonic.
///
/// # Errors
///
/// Returns an error if the mnemonic is not a valid English BIP-39 phrase.
fn account_node_from_mnemonic(
    mnemonic: &str,
    index: u32,
) -> Result<ExtendedKey, DerivationError> {
    let mnemonic = bip39::Mnemonic::parse_normalized(mnemonic)?;
    let seed = Zeroizing::new(mnemonic.to_seed_normalized(""));
    Ok(ExtendedKey::master(&seed[..]).derive_path(&[PURPOSE, COIN_TYPE, index]))
}

/// Exports the base64 account key for the account at `index`.
///
/// # Errors
///
/// Returns an error if the mnemonic is not a valid English BIP-39 phrase.
pub fn account_key_from_mnemonic(
    mnemonic: &str,
    index: u32,
) -> Result<SecretString, DerivationError> {
    let node = account_node_from_mnemonic(mnemonic, index)?;
    Ok(SecretString::from(STANDARD.encode(&node.to_bytes()[..])))
}

/// Derives the account identifier for the account at `index` of a mnemonic.
///
/// # Errors
///
/// Returns an error if the mnemonic is not a valid English BIP-39 phrase.
pub fn account_id_from_mnemonic(mnemonic: &str, index: u32) -> Result<String, DerivationError> {
    let node = account_node_from_mnemonic(mnemonic, index)?;
    Ok(identity_account_id(&node))
}

/// Derives the account identifier from a base64 account key.
///
/// # Errors
///
/// Returns an error if the key is not valid base64 or does not decode to 64 bytes.
pub fn account_id_from_account_key(account_key: &str) -> Result<String, DerivationError> {
    let bytes = Zeroizing::new(STANDARD.decode(account_key.trim())?);
    let node = ExtendedKey::from_bytes(&bytes)?;
    Ok(identity_account_id(&node))
}

/// Encodes an ed25519 public key as an account address.
#[must_use]
fn encode_account_id(public_key: &[u8; 32]) -> String {
    let mut raw = Vec::with_capacity(1 + public_key.len() + 2);
    raw.push(ACCOUNT_ADDRESS_VERSION);
    raw.extend_from_slice(public_key);
    let checksum = ADDRESS_CHECKSUM.checksum(&raw);
    raw.extend_from_slice(&checksum.to_le_bytes());
    bs58::encode(raw).into_string()
}

fn identity_account_id(account_node: &ExtendedKey) -> String {
    let identity = account_node.derive_hardened(IDENTITY_CHILD);
    encode_account_id(&identity.public_key())
}

fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> Zeroizing<[u8; 64]> {
    let mut mac = <HmacSha512 as Mac>::new_from_slice(key)
        .expect("HMAC-SHA512 accepts keys of any length");
    for part in parts {
        mac.update(part);
    }
    let mut digest = Zeroizing::new([0u8; 64]);
    digest.copy_from_slice(&mac.finalize().into_bytes());
    digest
}
