//! The sign-in challenge message.
//!
//! A minimal, fixed-field variant of an EIP-4361 "Sign-In with Ethereum"
//! message. Verifiers re-derive the signed payload from the rendered text, so
//! rendering must be byte-for-byte reproducible from the fields.

use chrono::{DateTime, SecondsFormat, Utc};
use core::fmt;
use litauth_types::Address;

/// The URI placed in every challenge.
pub const URI: &str = "http://example.com";

/// The message version placed in every challenge.
pub const VERSION: &str = "1";

/// The fields of a sign-in challenge.
///
/// The `statement` is inserted verbatim. Newlines within it are not escaped,
/// so callers should avoid them if the message must be parsed back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Challenge<'a> {
    /// The rendered address of the signer.
    pub address: &'a str,
    /// Free-text statement. May be empty.
    pub statement: &'a str,
    /// Decimal chain id.
    pub chain_id: &'a str,
    /// Single-use nonce.
    pub nonce: &'a str,
    /// RFC 3339 issuance timestamp.
    pub issued_at: &'a str,
}

/// Render a challenge message from its fields.
///
/// Shorthand for formatting a [`Challenge`].
pub fn build(
    address: &str,
    statement: &str,
    chain_id: &str,
    nonce: &str,
    issued_at: &str,
) -> String {
    Challenge {
        address,
        statement,
        chain_id,
        nonce,
        issued_at,
    }
    .to_string()
}

/// Render a challenge for `address` issued at `time`.
///
/// The nonce and issuance timestamp are both derived from `time` so that they
/// always agree. The nonce is the unix timestamp in seconds and `issued_at` is
/// RFC 3339 in UTC with a `Z` suffix.
pub fn issue(address: &Address, statement: &str, chain_id: &str, time: DateTime<Utc>) -> String {
    let nonce = time.timestamp().to_string();
    let issued_at = time.to_rfc3339_opts(SecondsFormat::Secs, true);
    build(&address.to_string(), statement, chain_id, &nonce, &issued_at)
}

impl fmt::Display for Challenge<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Challenge {
            address,
            statement,
            chain_id,
            nonce,
            issued_at,
        } = self;
        write!(
            f,
            "GetLit wants you to sign in with your Ethereum account:\n\
             {address}\n\
             \n\
             {statement}\n\
             URI: {URI}\n\
             Version: {VERSION}\n\
             Chain ID: {chain_id}\n\
             Nonce: {nonce}\n\
             Issued At: {issued_at}"
        )
    }
}
