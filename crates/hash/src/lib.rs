//! A minimal crate containing litauth's [`keccak256`] hash function and the
//! EIP-191 "personal message" encoding that is hashed before signing.
//!
//! The encoding produced by [`encode`] is the exact byte sequence that an
//! Ethereum wallet signs when asked to sign a plain text message. Verifiers
//! re-derive it from the message text, so any deviation here silently breaks
//! interoperability.

#![deny(missing_docs)]
#![deny(unsafe_code)]

use tiny_keccak::{Hasher, Keccak};

/// A 32-byte Keccak-256 digest.
pub type Hash = [u8; 32];

/// The domain separation prefix prepended to every personal message.
pub const PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Hash bytes using Keccak-256.
///
/// Note that this is the original Keccak padding used by Ethereum, not the
/// standardized SHA3-256.
pub fn keccak256(bytes: &[u8]) -> Hash {
    let mut hasher = Keccak::v256();
    let mut hash = [0u8; 32];
    hasher.update(bytes);
    hasher.finalize(&mut hash);
    hash
}

/// Encode a message as an EIP-191 personal message.
///
/// The result is [`PREFIX`], followed by the byte length of `message` in
/// decimal ASCII, followed by the message bytes themselves.
pub fn encode(message: impl AsRef<[u8]>) -> Vec<u8> {
    let message = message.as_ref();
    let len = message.len().to_string();
    let mut bytes = Vec::with_capacity(PREFIX.len() + len.len() + message.len());
    bytes.extend_from_slice(PREFIX.as_bytes());
    bytes.extend_from_slice(len.as_bytes());
    bytes.extend_from_slice(message);
    bytes
}

/// Shorthand for hashing the [`encode`]d form of the given message.
///
/// This is the digest that is actually signed and recovered over.
pub fn hash_message(message: impl AsRef<[u8]>) -> Hash {
    keccak256(&encode(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message() {
        assert_eq!(encode(""), b"\x19Ethereum Signed Message:\n0");
    }

    #[test]
    fn length_counts_bytes_not_chars() {
        // "é" is two bytes in UTF-8.
        let encoded = encode("é");
        assert_eq!(&encoded[..PREFIX.len()], PREFIX.as_bytes());
        assert_eq!(&encoded[PREFIX.len()..], "2é".as_bytes());
    }
}
