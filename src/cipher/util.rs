use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::cipher::error::*;

/// Generates a fresh 10-byte nonce from the OS RNG. A nonce must never be
/// reused with the same key once any counter value has been spent under it.
pub fn random_nonce() -> Result<[u8; 10]> {
    let mut nonce = [0u8; 10];
    OsRng.try_fill_bytes(&mut nonce)?;
    Ok(nonce)
}
