//! Sign-In with Ethereum style authentication for a local wallet.
//!
//! An [`Account`] owns a [`Signer`] and lazily produces a single [`AuthSig`]
//! for its lifetime:
//!
//! 1. A [`challenge`] message is issued for the account's address using the
//!    current time from a [`Clock`].
//! 2. The challenge is encoded as an EIP-191 personal message and signed.
//! 3. The resulting [`AuthSig`] is cached and returned on every later call.
//!
//! Anyone holding the `AuthSig` can check it with
//! [`litauth_sign::recover_address`] or [`litauth_sign::verify`].

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{AccountError, ConfigError, KeyError};
pub use key::{HexKey, KeyFile, KeySource};
#[doc(inline)]
pub use litauth_sign as sign;
pub use litauth_sign::Signer;
#[doc(inline)]
pub use litauth_types as types;
use litauth_types::{Address, AuthSig};
use once_cell::sync::OnceCell;

pub mod challenge;
mod clock;
pub mod config;
mod error;
mod key;

/// A local wallet account that can authenticate itself.
///
/// The account starts without an auth signature. The first call to
/// [`Account::auth_sig`] produces one and caches it. Every later call returns
/// the cached value, even when called with a different chain id or statement.
/// The cache is filled at most once, including when the account is shared
/// between threads.
#[derive(Debug)]
pub struct Account<C = SystemClock> {
    signer: Signer,
    clock: C,
    auth_sig: OnceCell<AuthSig>,
}

impl Account {
    /// An account signing with `signer`, reading time from the system clock.
    pub fn new(signer: Signer) -> Self {
        Self::with_clock(signer, SystemClock)
    }

    /// Load an account from the given key source.
    pub fn from_key_source(source: &impl KeySource) -> Result<Self, AccountError> {
        let sk = source.secret_key()?;
        Ok(Self::new(Signer::new(sk)))
    }
}

impl<C: Clock> Account<C> {
    /// An account signing with `signer`, reading time from `clock`.
    pub fn with_clock(signer: Signer, clock: C) -> Self {
        Self {
            signer,
            clock,
            auth_sig: OnceCell::new(),
        }
    }

    /// The account's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Get the account's auth signature, producing it on first use.
    ///
    /// `chain_id` and `statement` only take effect on the first call. Later
    /// calls return the cached signature unchanged.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(address = %self.address())))]
    pub fn auth_sig(&self, chain_id: &str, statement: &str) -> &AuthSig {
        self.auth_sig.get_or_init(|| {
            let auth_sig = self.sign_in(chain_id, statement);
            #[cfg(feature = "tracing")]
            tracing::debug!(chain_id, "produced auth signature");
            auth_sig
        })
    }

    /// The cached auth signature, if one has been produced.
    pub fn cached_auth_sig(&self) -> Option<&AuthSig> {
        self.auth_sig.get()
    }

    fn sign_in(&self, chain_id: &str, statement: &str) -> AuthSig {
        let address = self.address();
        let text = challenge::issue(&address, statement, chain_id, self.clock.now());
        #[cfg(feature = "tracing")]
        tracing::trace!("{text}");
        let payload = litauth_hash::encode(&text);
        let signature = self.signer.sign(&payload);
        AuthSig::new(&address, text, &signature)
    }
}

/// Produce an auth signature for a one-off signer.
///
/// The signature is not cached. Use an [`Account`] to reuse it.
pub fn auth_sig(signer: Signer, chain_id: &str, statement: &str) -> AuthSig {
    Account::new(signer).auth_sig(chain_id, statement).clone()
}
