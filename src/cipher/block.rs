use crate::cipher::core::constants::SBOX;
use crate::cipher::core::{encrypt_block, gmul, xor_words};
use crate::cipher::error::{Error, Result};
use crate::cipher::kdf::{KeyDerivation, KeyLength, XorKdf};

/// The block cipher half of the message path. Holds an immutable round-key
/// schedule derived once at construction; encrypting a block is a pure
/// function of that schedule, so a `BlockCipher` is safe to share across
/// threads.
///
/// ## Example
/// ```
/// # fn main() -> chatcipher::Result<()> {
/// use chatcipher::{BlockCipher, CounterMode, KeyLength};
///
/// let cipher = BlockCipher::new("correct horse", b"battery staple", KeyLength::Bits256)?;
/// let ctr = CounterMode::new(&cipher, b"0123456789")?;
///
/// let ciphertext = ctr.encrypt(b"hello chat", 0);
/// let plaintext = ctr.decrypt(&ciphertext, 0);
/// assert_eq!(plaintext, b"hello chat");
/// # Ok(())
/// # }
/// ```
pub struct BlockCipher {
    round_keys: Vec<[u8; 16]>,
    mac_key: Option<Vec<u8>>,
}

impl BlockCipher {
    /// Derives key material from `password` and `salt` with the legacy
    /// [XorKdf](crate::XorKdf) and expands the cipher key into round keys.
    pub fn new(password: &str, salt: &[u8], key_length: KeyLength) -> Result<Self> {
        Self::with_kdf(&XorKdf, password, salt, key_length)
    }

    /// Like [new](Self::new), but with a caller-supplied key derivation
    /// strategy. The cipher core never inspects how the key was produced.
    pub fn with_kdf(
        kdf: &dyn KeyDerivation,
        password: &str,
        salt: &[u8],
        key_length: KeyLength,
    ) -> Result<Self> {
        let material = kdf.derive(password, salt, key_length)?;
        Ok(Self {
            round_keys: expand_key(material.key()),
            mac_key: Some(material.into_mac_key()),
        })
    }

    /// Expands a raw 16, 24, or 32 byte key directly, skipping derivation.
    /// Used for known-answer testing and by callers that already hold a key.
    /// This path carries no MAC key.
    pub fn from_key(key: &[u8]) -> Result<Self> {
        KeyLength::try_from_key_bytes(key.len())?;
        Ok(Self {
            round_keys: expand_key(key),
            mac_key: None,
        })
    }

    /// The expanded round-key schedule: `rounds + 1` blocks of 16 bytes.
    pub fn round_keys(&self) -> &[[u8; 16]] {
        &self.round_keys
    }

    /// The derived MAC key, when the cipher was built through a key
    /// derivation. Held for the authentication layer above the cipher;
    /// never used by the cipher itself.
    pub fn mac_key(&self) -> Option<&[u8]> {
        self.mac_key.as_deref()
    }

    /// Encrypts exactly one 16 byte block. Anything other than 16 bytes is
    /// rejected with [InvalidBlockSize](Error::InvalidBlockSize) rather than
    /// padded or truncated.
    pub fn encrypt(&self, block: &[u8]) -> Result<[u8; 16]> {
        let block: &[u8; 16] = block
            .try_into()
            .map_err(|_| Error::InvalidBlockSize { len: block.len() })?;
        Ok(encrypt_block(block, &self.round_keys))
    }
}

/// FIPS-197 key schedule. Returns `nr + 1` round keys, where `nr` is 10, 12,
/// or 14 for 128, 192, and 256 bit keys. The extra key is the initial
/// whitening key.
fn expand_key(key: &[u8]) -> Vec<[u8; 16]> {
    // Nk   number of 32-bit words in the key
    // Nr   number of rounds: Nk + 6
    // w    the expanded schedule as 4-byte words
    let nk = key.len() / 4;
    let nr = nk + 6;
    let nw = (nr + 1) * 4;

    // round constants: each doubles the previous one in GF(2^8)
    let mut rcon = [[0u8; 4]; 11];
    rcon[1][0] = 1;
    for i in 2..11 {
        rcon[i][0] = gmul(0x02, rcon[i - 1][0]);
    }

    // first nk words copy the key itself
    let mut w: Vec<[u8; 4]> = vec![[0u8; 4]; nw];
    for (i, byte) in key.iter().enumerate() {
        w[i / 4][i % 4] = *byte;
    }

    for i in nk..nw {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            // rotate, substitute, fold in the round constant
            temp = [
                SBOX[temp[1] as usize],
                SBOX[temp[2] as usize],
                SBOX[temp[3] as usize],
                SBOX[temp[0] as usize],
            ];
            temp = xor_words(&temp, &rcon[i / nk]);
        } else if nk > 6 && i % nk == 4 {
            // extra substitution mid-key, 256-bit keys only (no rotation)
            temp = [
                SBOX[temp[0] as usize],
                SBOX[temp[1] as usize],
                SBOX[temp[2] as usize],
                SBOX[temp[3] as usize],
            ];
        }
        w[i] = xor_words(&temp, &w[i - nk]);
    }

    // regroup words into 16-byte round keys; word j of a round becomes
    // column j of the key block, matching the column-major state layout
    let mut round_keys = vec![[0u8; 16]; nr + 1];
    for (round, rk) in round_keys.iter_mut().enumerate() {
        for col in 0..4 {
            let word = w[round * 4 + col];
            for row in 0..4 {
                rk[col * 4 + row] = word[row];
            }
        }
    }

    round_keys
}
