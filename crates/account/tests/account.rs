use chrono::{TimeZone, Utc};
use litauth_account::{
    challenge, Account, AccountError, Config, FixedClock, HexKey, KeyError, Signer,
};
use litauth_hash::PREFIX;
use litauth_types::DERIVED_VIA;
use rand::SeedableRng;
use secp256k1::{Secp256k1, SecretKey};
use std::sync::Arc;

const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

fn random_sk(seed: [u8; 32]) -> SecretKey {
    let mut rng = rand::rngs::SmallRng::from_seed(seed);
    Secp256k1::new().generate_keypair(&mut rng).0
}

fn fixed_clock() -> FixedClock {
    FixedClock(Utc.timestamp_opt(1_700_000_000, 0).unwrap())
}

fn hardhat_account() -> Account<FixedClock> {
    Account::with_clock(Signer::from_hex(KEY).unwrap(), fixed_clock())
}

#[test]
fn auth_sig_fields() {
    let account = hardhat_account();
    assert!(account.cached_auth_sig().is_none());

    let auth_sig = account.auth_sig("1", "");
    assert_eq!(auth_sig.address, ADDRESS);
    assert_eq!(auth_sig.derived_via, DERIVED_VIA);
    assert_eq!(
        auth_sig.signed_message,
        challenge::build(ADDRESS, "", "1", "1700000000", "2023-11-14T22:13:20Z")
    );
    assert!(auth_sig.sig.starts_with("0x"));
    assert_eq!(auth_sig.sig.len(), 132);
    assert!(auth_sig.sig.ends_with("1b") || auth_sig.sig.ends_with("1c"));
    assert_eq!(account.cached_auth_sig(), Some(auth_sig));
}

#[test]
fn auth_sig_recovers_to_account() {
    let account = hardhat_account();
    let auth_sig = account.auth_sig("137", "Access my encrypted data");
    let recovered =
        litauth_sign::recover_address(&auth_sig.sig, &auth_sig.signed_message).unwrap();
    assert_eq!(recovered, account.address());
    assert!(litauth_sign::verify(auth_sig).unwrap());
}

#[test]
fn signed_payload_is_eip191() {
    let account = hardhat_account();
    let auth_sig = account.auth_sig("1", "");
    let payload = litauth_hash::encode(&auth_sig.signed_message);
    let expected = format!("{PREFIX}197{}", auth_sig.signed_message);
    assert_eq!(payload, expected.as_bytes());

    // Signing is deterministic, so re-signing the payload reproduces the sig.
    let signer = Signer::from_hex(KEY).unwrap();
    assert_eq!(signer.sign(&payload).to_string(), auth_sig.sig);
}

#[test]
fn auth_sig_is_cached() {
    let account = Account::new(Signer::new(random_sk([0xcd; 32])));
    let first = account.auth_sig("1", "").clone();
    let second = account.auth_sig("137", "a different statement");
    assert_eq!(&first, second);
    assert!(first.signed_message.contains("Chain ID: 1\n"));
}

#[test]
fn auth_sig_cached_across_threads() {
    let account = Arc::new(Account::new(Signer::new(random_sk([0xab; 32]))));
    let handles: Vec<_> = (0..8)
        .map(|ix| {
            let account = account.clone();
            std::thread::spawn(move || account.auth_sig(&ix.to_string(), "").clone())
        })
        .collect();
    let auth_sigs: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(auth_sigs.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(account.cached_auth_sig(), Some(&auth_sigs[0]));
}

#[test]
fn system_clock_nonce_matches_issued_at() {
    let account = Account::new(Signer::new(random_sk([0x01; 32])));
    let auth_sig = account.auth_sig("1", "");
    let line = |prefix: &str| {
        auth_sig
            .signed_message
            .lines()
            .find_map(|l| l.strip_prefix(prefix))
            .unwrap()
            .to_string()
    };
    let nonce: i64 = line("Nonce: ").parse().unwrap();
    let issued_at = chrono::DateTime::parse_from_rfc3339(&line("Issued At: ")).unwrap();
    assert_eq!(issued_at.timestamp(), nonce);
}

#[test]
fn from_key_sources() {
    let account = Account::from_key_source(&HexKey(KEY.to_string())).unwrap();
    assert_eq!(account.address().to_string(), ADDRESS);

    let dir = tempfile::tempdir().unwrap();
    let key_file = Config::key_file(dir.path());
    let sk = litauth_sign::secret_key_from_hex(KEY).unwrap();
    key_file.save(&sk).unwrap();
    let account = Account::from_key_source(&key_file).unwrap();
    assert_eq!(account.address().to_string(), ADDRESS);

    let err = Account::from_key_source(&HexKey(String::new())).unwrap_err();
    assert!(matches!(err, AccountError::Key(KeyError::Empty)));
}

#[test]
fn one_off_auth_sig() {
    let signer = Signer::from_hex(KEY).unwrap();
    let auth_sig = litauth_account::auth_sig(signer, "80001", "");
    assert!(litauth_sign::verify(&auth_sig).unwrap());
    assert!(auth_sig.signed_message.contains("Chain ID: 80001\n"));
}

#[test]
fn auth_sig_json() {
    let account = hardhat_account();
    let auth_sig = account.auth_sig("1", "");
    let json = serde_json::to_value(auth_sig).unwrap();
    let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, ["address", "derivedVia", "sig", "signedMessage"]);
}
