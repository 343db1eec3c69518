//! A minimal crate providing litauth's signing, verification and signer
//! address recovery functions implemented using [`secp256k1`] and the
//! [`litauth_hash`] crate.
//!
//! Messages are always signed in their EIP-191 personal message form. See
//! [`litauth_hash::encode`].
//!
//! Includes [`sign_message`], [`recover`], [`recover_address`] and [`verify`].

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub use error::{RecoverError, RecoverResult, SignError};
use litauth_hash::{hash_message, keccak256, Hash};
use litauth_types::{Address, AuthSig, Signature};
pub use secp256k1;
use secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId},
    Message, PublicKey, Secp256k1, SecretKey,
};
pub use signer::Signer;

mod error;
mod signer;

/// Offset added to the recovery id to produce an Ethereum style `v` byte.
pub const V_OFFSET: u8 = 27;

/// Parse a hex-encoded secp256k1 secret key.
///
/// Supports both "0x"-prefixed and non-prefixed hex strings. Surrounding
/// whitespace is ignored.
pub fn secret_key_from_hex(sk_hex: &str) -> Result<SecretKey, SignError> {
    let sk_hex = sk_hex.trim();
    let sk_hex = sk_hex.strip_prefix("0x").unwrap_or(sk_hex);
    let bytes = hex::decode(sk_hex)?;
    Ok(SecretKey::from_slice(&bytes)?)
}

/// Sign over a pre-hashed digest with the secret key using the secp256k1 curve.
///
/// The resulting `v` byte is `27 + recovery_id`.
pub fn sign_hash(hash: Hash, sk: &SecretKey) -> Signature {
    let secp = Secp256k1::new();
    let message = Message::from_digest(hash);
    let (rec_id, sig) = secp
        .sign_ecdsa_recoverable(&message, sk)
        .serialize_compact();
    // Recovery ids produced by signing are always 0 or 1.
    let v = V_OFFSET + rec_id.to_i32() as u8;
    Signature(sig, v)
}

/// Sign over the Keccak-256 hash of an already encoded payload.
pub fn sign_payload(payload: &[u8], sk: &SecretKey) -> Signature {
    sign_hash(keccak256(payload), sk)
}

/// Sign a plain text message.
///
/// The message is first encoded as an EIP-191 personal message, then hashed.
pub fn sign_message(message: impl AsRef<[u8]>, sk: &SecretKey) -> Signature {
    sign_hash(hash_message(message), sk)
}

/// Apply the fixed `v` byte compatibility rewrite.
///
/// A `v` of `28` is rewritten to `1`. No other value is touched. This bridges
/// signers that emit `27`/`28` and recovery that expects `0`/`1`.
pub fn normalize_v(v: u8) -> u8 {
    if v == 28 {
        1
    } else {
        v
    }
}

/// Map a (normalized) `v` byte to the recovery id passed to secp256k1.
///
/// `1` maps to recovery id `1`. Both `0` and `27` map to recovery id `0`.
/// Anything else is rejected.
fn recovery_id(v: u8) -> RecoverResult<RecoveryId> {
    let id = match normalize_v(v) {
        0 | V_OFFSET => 0,
        1 => 1,
        _ => return Err(RecoverError::InvalidRecoveryId(v)),
    };
    Ok(RecoveryId::from_i32(id)?)
}

/// Recover the public key that signed the given digest.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn recover_hash(hash: Hash, signature: &Signature) -> RecoverResult<PublicKey> {
    let recovery_id = recovery_id(signature.1)?;
    let recoverable_signature = RecoverableSignature::from_compact(&signature.0, recovery_id)?;

    #[cfg(feature = "tracing")]
    tracing::trace!("{:?}", recoverable_signature);

    let secp = Secp256k1::new();
    let message = Message::from_digest(hash);
    let public_key = secp.recover_ecdsa(&message, &recoverable_signature)?;
    Ok(public_key)
}

/// Recover the public key that signed the given plain text message.
///
/// The message is re-encoded as an EIP-191 personal message before recovery.
pub fn recover(message: impl AsRef<[u8]>, signature: &Signature) -> RecoverResult<PublicKey> {
    recover_hash(hash_message(message), signature)
}

/// Recover the address that produced `signature_hex` over `plaintext`.
///
/// The signature may be `0x`-prefixed. This performs no comparison: callers
/// must compare the returned address with the claimed one themselves, or use
/// [`verify`].
#[cfg_attr(feature = "tracing", tracing::instrument(skip(plaintext), err))]
pub fn recover_address(signature_hex: &str, plaintext: &str) -> RecoverResult<Address> {
    let digits = signature_hex.strip_prefix("0x").unwrap_or(signature_hex);
    let bytes = hex::decode(digits)?;
    let bytes: [u8; Signature::LEN] = bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| RecoverError::InvalidLength(bytes.len()))?;
    let public_key = recover(plaintext, &Signature::from(bytes))?;
    Ok(address_from_public_key(&public_key))
}

/// Verify an auth signature by recovering its signer and comparing it with the
/// claimed address.
///
/// A signature that recovers to a different address is `Ok(false)`.
pub fn verify(auth_sig: &AuthSig) -> RecoverResult<bool> {
    let claimed: Address = auth_sig
        .address
        .parse()
        .map_err(RecoverError::InvalidAddress)?;
    let recovered = recover_address(&auth_sig.sig, &auth_sig.signed_message)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(%claimed, %recovered, "verified auth signature");

    Ok(claimed == recovered)
}

/// Derive the Ethereum style address of a public key.
///
/// This is the last 20 bytes of the Keccak-256 hash of the 64-byte
/// uncompressed public key (without its leading `0x04` tag).
pub fn address_from_public_key(pk: &PublicKey) -> Address {
    let [_tag, uncompressed @ ..] = pk.serialize_uncompressed();
    let hash = keccak256(&uncompressed);
    let mut address = [0u8; Address::LEN];
    address.copy_from_slice(&hash[12..]);
    Address(address)
}
