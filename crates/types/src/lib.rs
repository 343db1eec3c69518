//! Base types shared across the litauth crates.
//!
//! - [`Address`]: a 20-byte Ethereum-style account address.
//! - [`Signature`]: a 65-byte recoverable secp256k1 signature (`r ‖ s ‖ v`).
//! - [`AuthSig`]: the signed "Sign-In with Ethereum" style assertion presented
//!   to the remote network as proof of control over an address.

#![deny(missing_docs)]
#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

mod convert;
mod fmt;

/// The derivation method tag attached to every [`AuthSig`] produced by litauth.
///
/// Identifies the signature as an EIP-191 personal message signature. This
/// intentionally replaces the `ethgo.Key.SignMsg` tag used by earlier
/// clients, which named a library method rather than the signing scheme.
pub const DERIVED_VIA: &str = "web3.eth.personal.sign";

/// A 20-byte Ethereum-style account address.
///
/// Derived from the last 20 bytes of the Keccak-256 hash of an uncompressed
/// public key. Rendered with [`Display`][core::fmt::Display] as its EIP-55
/// checksummed, `0x`-prefixed form. Parsing is case-insensitive.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; 20]);

/// A recoverable secp256k1 signature.
///
/// The first 64 bytes are the compact `r ‖ s` signature, the last byte is the
/// `v` value. Signatures produced by litauth use the Ethereum convention of
/// `v = 27 + recovery_id`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signature(pub [u8; 64], pub u8);

/// A signed authentication assertion.
///
/// Serialized as JSON with the field names `address`, `derivedVia`,
/// `signedMessage` and `sig`. These names are consumed by the receiving
/// network and must not change.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSig {
    /// The `0x`-prefixed address of the signer.
    pub address: String,
    /// The method used to produce the signature. See [`DERIVED_VIA`].
    pub derived_via: String,
    /// The exact plaintext that was signed.
    pub signed_message: String,
    /// The `0x`-prefixed hex encoding of the 65-byte signature.
    pub sig: String,
}

impl Address {
    /// The length of an address in bytes.
    pub const LEN: usize = 20;
}

impl Signature {
    /// The length of a serialized signature in bytes.
    pub const LEN: usize = 65;

    /// The `v` byte of the signature.
    pub fn v(&self) -> u8 {
        self.1
    }
}

impl AuthSig {
    /// Construct an `AuthSig` tagged with [`DERIVED_VIA`].
    pub fn new(address: &Address, signed_message: String, signature: &Signature) -> Self {
        Self {
            address: address.to_string(),
            derived_via: DERIVED_VIA.to_string(),
            signed_message,
            sig: signature.to_string(),
        }
    }
}
