//! Conversions from raw bytes into litauth types.

use crate::{Address, Signature};

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<[u8; 65]> for Signature {
    fn from(bytes: [u8; 65]) -> Self {
        let [rs @ .., v] = bytes;
        Signature(rs, v)
    }
}
