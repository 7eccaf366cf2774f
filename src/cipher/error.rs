use rand::rand_core;
use thiserror::Error;

/// Cipher Result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Cipher Error type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Passed a block to the block cipher that was not exactly 16 bytes.
    #[error("invalid block size: {len} bytes (block cipher operates on exactly 16)")]
    InvalidBlockSize { len: usize },

    /// Attempted to build a cipher with a key size that is not 128, 192, or 256 bits.
    #[error("invalid key length: {bits} bits (expected 128, 192, or 256)")]
    InvalidKeyLength { bits: usize },

    /// Provided a nonce longer than 10 bytes, leaving no room for the 6-byte counter
    /// in the 16-byte counter block.
    #[error("invalid nonce length: {len} bytes (at most 10, leaving 6 for the counter)")]
    InvalidNonceLength { len: usize },

    /// A multi-block input would have run the 48-bit message counter past its range.
    #[error("input size caused counter overflow (counter space is 48 bits)")]
    CounterOverflow,

    /// Key derivation was given an empty password or salt.
    #[error("key derivation requires a non-empty password and salt")]
    EmptyDerivationInput,

    /// OS RNG failed during nonce generation.
    #[error("OS RNG failed in nonce generation")]
    Rng(#[from] rand_core::OsError),
}
