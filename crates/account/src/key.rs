//! Sources of private key material.
//!
//! The account never decides where keys live. It asks a [`KeySource`].

use crate::error::KeyError;
use litauth_sign::secp256k1::SecretKey;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

/// Provides the secret key an account signs with.
pub trait KeySource {
    /// Load the secret key.
    fn secret_key(&self) -> Result<SecretKey, KeyError>;
}

/// A hex-encoded key held in memory, e.g. read from an environment variable.
#[derive(Clone)]
pub struct HexKey(pub String);

/// A file containing a single hex-encoded key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyFile(pub PathBuf);

impl KeySource for HexKey {
    fn secret_key(&self) -> Result<SecretKey, KeyError> {
        parse(&self.0)
    }
}

impl KeySource for SecretKey {
    fn secret_key(&self) -> Result<SecretKey, KeyError> {
        Ok(*self)
    }
}

impl KeyFile {
    /// The key file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// The path to the key file.
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Write `sk` to the file as lower hex, creating parent directories.
    ///
    /// On unix the file is made readable by its owner only, including when it
    /// already existed with wider permissions.
    pub fn save(&self, sk: &SecretKey) -> Result<(), KeyError> {
        let io_err = |source| KeyError::Io {
            path: self.0.clone(),
            source,
        };
        if let Some(dir) = self.0.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let mut opts = fs::OpenOptions::new();
        opts.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(0o600);
        }
        let mut file = opts.open(&self.0).map_err(io_err)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(io_err)?;
        }
        file.write_all(sk.display_secret().to_string().as_bytes())
            .map_err(io_err)?;
        Ok(())
    }
}

impl KeySource for KeyFile {
    fn secret_key(&self) -> Result<SecretKey, KeyError> {
        let contents = fs::read_to_string(&self.0).map_err(|source| KeyError::Io {
            path: self.0.clone(),
            source,
        })?;
        parse(&contents)
    }
}

impl core::fmt::Debug for HexKey {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("HexKey(..)")
    }
}

fn parse(sk_hex: &str) -> Result<SecretKey, KeyError> {
    if sk_hex.trim().is_empty() {
        return Err(KeyError::Empty);
    }
    Ok(litauth_sign::secret_key_from_hex(sk_hex)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn hex_key() {
        let sk = HexKey(format!("0x{KEY}\n")).secret_key().unwrap();
        assert_eq!(sk.display_secret().to_string(), KEY);
        assert!(matches!(HexKey("  ".into()).secret_key(), Err(KeyError::Empty)));
        assert!(matches!(
            HexKey("0xzz".into()).secret_key(),
            Err(KeyError::Invalid(_))
        ));
    }

    #[test]
    fn key_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let file = KeyFile::new(dir.path().join(".litauth").join("keyfile"));
        let sk = HexKey(KEY.into()).secret_key().unwrap();
        file.save(&sk).unwrap();
        assert_eq!(file.secret_key().unwrap(), sk);
    }

    #[cfg(unix)]
    #[test]
    fn overwritten_key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let file = KeyFile::new(dir.path().join("keyfile"));
        fs::write(file.path(), "stale").unwrap();
        fs::set_permissions(file.path(), fs::Permissions::from_mode(0o644)).unwrap();

        let sk = HexKey(KEY.into()).secret_key().unwrap();
        file.save(&sk).unwrap();
        let mode = fs::metadata(file.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(file.secret_key().unwrap(), sk);
    }

    #[test]
    fn missing_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = KeyFile::new(dir.path().join("missing"));
        assert!(matches!(file.secret_key(), Err(KeyError::Io { .. })));
    }

    #[test]
    fn debug_hides_key() {
        assert_eq!(format!("{:?}", HexKey(KEY.into())), "HexKey(..)");
    }
}
