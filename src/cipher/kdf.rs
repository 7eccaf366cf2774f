//! Key derivation for the message cipher. The legacy scheme ([`XorKdf`]) XORs
//! password bytes against salt bytes and is **not** a real KDF; the
//! [`KeyDerivation`] trait exists so a proper password hash can be swapped in
//! without touching the cipher core.

use crate::cipher::error::{Error, Result};

/// Supported key sizes. Determines the number of rounds the block cipher runs.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum KeyLength {
    Bits128,
    Bits192,
    Bits256,
}

impl KeyLength {
    /// Builds a `KeyLength` from a bit count. Anything other than 128, 192, or
    /// 256 returns an [InvalidKeyLength](Error::InvalidKeyLength) error.
    pub fn try_from_bits(bits: usize) -> Result<Self> {
        match bits {
            128 => Ok(Self::Bits128),
            192 => Ok(Self::Bits192),
            256 => Ok(Self::Bits256),
            _ => Err(Error::InvalidKeyLength { bits }),
        }
    }

    pub(crate) fn try_from_key_bytes(len: usize) -> Result<Self> {
        Self::try_from_bits(len * 8)
    }

    /// Key size in bytes: 16, 24, or 32.
    pub fn byte_len(self) -> usize {
        match self {
            Self::Bits128 => 16,
            Self::Bits192 => 24,
            Self::Bits256 => 32,
        }
    }

    /// Number of cipher rounds: 10, 12, or 14.
    pub fn rounds(self) -> usize {
        self.byte_len() / 4 + 6
    }
}

/// Output of key derivation: a cipher key and a MAC key of equal length,
/// sliced from disjoint halves of one derived buffer. The MAC key is not used
/// by the cipher itself; it is held for the message-authentication layer that
/// sits above it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct KeyMaterial {
    key: Vec<u8>,
    mac_key: Vec<u8>,
}

impl KeyMaterial {
    /// The cipher key, `key_length.byte_len()` bytes.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// The MAC key, same length as the cipher key.
    pub fn mac_key(&self) -> &[u8] {
        &self.mac_key
    }

    pub(crate) fn into_mac_key(self) -> Vec<u8> {
        self.mac_key
    }
}

/// Strategy for turning a password and salt into [`KeyMaterial`].
pub trait KeyDerivation {
    fn derive(&self, password: &str, salt: &[u8], key_length: KeyLength) -> Result<KeyMaterial>;
}

/// The derivation the original chat client shipped with: byte `i` of the
/// derived buffer is `password[i % password.len()] ^ salt[i % salt.len()]`.
///
/// This offers no iteration count and no brute-force resistance. It is kept
/// for wire compatibility with existing clients only; anything new should
/// implement [`KeyDerivation`] over a memory-hard password hash instead.
#[derive(Copy, Clone, Debug, Default)]
pub struct XorKdf;

impl KeyDerivation for XorKdf {
    fn derive(&self, password: &str, salt: &[u8], key_length: KeyLength) -> Result<KeyMaterial> {
        let password = password.as_bytes();
        if password.is_empty() || salt.is_empty() {
            return Err(Error::EmptyDerivationInput);
        }

        let n_bytes = key_length.byte_len();
        let mut buf = vec![0u8; n_bytes * 2];
        for (i, b) in buf.iter_mut().enumerate() {
            *b = password[i % password.len()] ^ salt[i % salt.len()];
        }

        // first half encrypts, second half authenticates
        let mac_key = buf.split_off(n_bytes);
        Ok(KeyMaterial { key: buf, mac_key })
    }
}
