//! The types of errors that might occur while signing or recovering.

use thiserror::Error;

/// Shorthand for a `Result` where the error type is a `RecoverError`.
pub type RecoverResult<T> = Result<T, RecoverError>;

/// Failed to construct a signer from the provided key material.
///
/// A bad key can never produce a valid signature, so callers should treat
/// this as fatal rather than retrying.
#[derive(Debug, Error)]
pub enum SignError {
    /// The key was not valid hex.
    #[error("private key is not valid hex: {0}")]
    KeyHex(#[from] hex::FromHexError),
    /// The key was not a valid secp256k1 secret scalar.
    #[error("invalid secp256k1 private key: {0}")]
    InvalidKey(#[from] secp256k1::Error),
}

/// Address recovery error.
///
/// [`Decode`][Self::Decode], [`InvalidLength`][Self::InvalidLength] and
/// [`InvalidAddress`][Self::InvalidAddress] mean the input was malformed. The
/// remaining variants mean the signature does not verify.
#[derive(Debug, Error)]
pub enum RecoverError {
    /// The signature was not valid hex.
    #[error("failed to hex decode signature: {0}")]
    Decode(#[from] hex::FromHexError),
    /// The decoded signature was not 65 bytes long.
    #[error("invalid signature length: expected 65 bytes, found {0}")]
    InvalidLength(usize),
    /// The `v` byte did not map to a supported recovery id.
    #[error("invalid recovery id: expected 0, 1, 27 or 28, found {0}")]
    InvalidRecoveryId(u8),
    /// Public key recovery failed.
    #[error("signature recovery failed: {0}")]
    Secp256k1(#[from] secp256k1::Error),
    /// The claimed address of an auth signature could not be parsed.
    #[error("invalid claimed address: {0}")]
    InvalidAddress(hex::FromHexError),
}
