use litauth_types::{Address, AuthSig, Signature, DERIVED_VIA};
use proptest::prelude::*;

const CHECKSUMMED: &[&str] = &[
    "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
    "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
    "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
    "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
];

#[test]
fn address_display_is_eip55_checksummed() {
    for expected in CHECKSUMMED {
        let address: Address = expected.to_lowercase().parse().unwrap();
        assert_eq!(&address.to_string(), expected);
    }
}

#[test]
fn address_parse_is_case_insensitive() {
    for s in CHECKSUMMED {
        let mixed: Address = s.parse().unwrap();
        let lower: Address = s.to_lowercase().parse().unwrap();
        let upper: Address = s[2..].to_uppercase().parse().unwrap();
        assert_eq!(mixed, lower);
        assert_eq!(mixed, upper);
    }
}

#[test]
fn address_parse_rejects_bad_input() {
    assert!("0x1234".parse::<Address>().is_err());
    assert!("0xzz".parse::<Address>().is_err());
    assert!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb9226".parse::<Address>().is_err());
}

#[test]
fn signature_parse_rejects_bad_length() {
    let short = format!("0x{}", "ab".repeat(64));
    assert_eq!(
        short.parse::<Signature>(),
        Err(hex::FromHexError::InvalidStringLength)
    );
}

#[test]
fn auth_sig_json_field_names() {
    let address: Address = CHECKSUMMED[4].parse().unwrap();
    let signature = Signature([7; 64], 28);
    let auth_sig = AuthSig::new(&address, "hello".to_string(), &signature);
    let json = serde_json::to_value(&auth_sig).unwrap();

    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 4);
    assert_eq!(json["address"], CHECKSUMMED[4]);
    assert_eq!(json["derivedVia"], DERIVED_VIA);
    assert_eq!(json["signedMessage"], "hello");
    assert_eq!(json["sig"], format!("0x{}1c", "07".repeat(64)));

    let parsed: AuthSig = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, auth_sig);
}

proptest! {
    #[test]
    fn address_roundtrip(bytes in any::<[u8; 20]>()) {
        let address = Address(bytes);

        let lower_hex = format!("{address:x}");
        let display = format!("{address}");

        let parsed: Address = display.parse().unwrap();

        prop_assert_eq!(parsed, address);
        prop_assert_eq!(lower_hex.len(), 40);
        prop_assert_eq!(display.len(), 42);
        prop_assert_eq!(display[2..].to_lowercase(), lower_hex);
    }

    #[test]
    fn signature_roundtrip(compact_sig in any::<[u8; 64]>(), v in any::<u8>()) {
        let sig = Signature(compact_sig, v);

        let lower_hex = format!("{sig:x}");
        let display = format!("{sig}");

        let parsed: Signature = display.parse().unwrap();

        prop_assert_eq!(parsed, sig);
        prop_assert_eq!(lower_hex.len(), 130);
        prop_assert_eq!(&display[2..], lower_hex.as_str());
        prop_assert_eq!(display.len(), 132);
    }
}
