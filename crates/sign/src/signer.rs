//! A secret key paired with its derived address.

use crate::SignError;
use litauth_types::{Address, Signature};
use secp256k1::{PublicKey, Secp256k1, SecretKey};

/// Holds a secp256k1 secret key and produces recoverable signatures with it.
///
/// The secret key is never serialized or logged.
pub struct Signer {
    sk: SecretKey,
    address: Address,
}

impl Signer {
    /// Create a signer from an existing secret key.
    pub fn new(sk: SecretKey) -> Self {
        let secp = Secp256k1::signing_only();
        let pk = PublicKey::from_secret_key(&secp, &sk);
        let address = crate::address_from_public_key(&pk);
        Self { sk, address }
    }

    /// Create a signer from a hex-encoded secret key.
    ///
    /// Supports both "0x"-prefixed and non-prefixed hex strings. Surrounding
    /// whitespace is ignored.
    pub fn from_hex(sk_hex: &str) -> Result<Self, SignError> {
        crate::secret_key_from_hex(sk_hex).map(Self::new)
    }

    /// The address derived from this signer's public key.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign over an encoded payload.
    ///
    /// The payload is hashed with Keccak-256 before signing. Use
    /// [`litauth_hash::encode`] to produce the payload for a plain text
    /// message.
    pub fn sign(&self, payload: &[u8]) -> Signature {
        crate::sign_payload(payload, &self.sk)
    }
}

impl core::fmt::Debug for Signer {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Signer")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl From<SecretKey> for Signer {
    fn from(sk: SecretKey) -> Self {
        Self::new(sk)
    }
}
