use rayon::prelude::*;

use crate::cipher::block::BlockCipher;
use crate::cipher::core::encrypt_block;
use crate::cipher::error::{Error, Result};
use crate::cipher::modes::util::{
    COUNTER_MASK, MAX_NONCE_LEN, PARALLEL_THRESHOLD, counter_block, xor_chunks,
};

/// Counter-mode wrapper over a [`BlockCipher`]: encrypts `nonce || counter`
/// blocks and XORs the result with the data, turning the block cipher into a
/// keystream generator. Decryption is the same operation.
///
/// The counter is caller-owned state. Reusing a (nonce, counter) pair for two
/// different messages under the same key leaks their XOR; callers must bump
/// the counter per message and per 16-byte block.
pub struct CounterMode<'c> {
    cipher: &'c BlockCipher,
    nonce: Vec<u8>,
}

impl<'c> CounterMode<'c> {
    /// Wraps an initialized cipher and a nonce of at most 10 bytes. A shorter
    /// nonce leaves the tail of the counter block zero, as the original chat
    /// client did; longer is rejected with
    /// [InvalidNonceLength](Error::InvalidNonceLength).
    pub fn new(cipher: &'c BlockCipher, nonce: &[u8]) -> Result<Self> {
        if nonce.len() > MAX_NONCE_LEN {
            return Err(Error::InvalidNonceLength { len: nonce.len() });
        }
        Ok(Self {
            cipher,
            nonce: nonce.to_vec(),
        })
    }

    /// Single-block encryption as the original chat client performs it: one
    /// keystream block XORed over the data, output truncated to
    /// `min(16, data.len())` bytes.
    ///
    /// **Anything past the first 16 bytes of `data` is silently dropped.**
    /// That matches deployed behavior and is kept for wire compatibility;
    /// use [encrypt_stream](Self::encrypt_stream) for inputs of arbitrary
    /// length. The counter is truncated to its low 48 bits.
    pub fn encrypt(&self, data: &[u8], counter: u64) -> Vec<u8> {
        let block = counter_block(&self.nonce, counter & COUNTER_MASK);
        let keystream = encrypt_block(&block, self.cipher.round_keys());
        let n = data.len().min(16);
        xor_chunks(&keystream, &data[..n])[..n].to_vec()
    }

    /// Single-block decryption. Identical to [encrypt](Self::encrypt), since
    /// XOR is self-inverse. The same truncation caveat applies.
    pub fn decrypt(&self, data: &[u8], counter: u64) -> Vec<u8> {
        self.encrypt(data, counter)
    }

    /// Multi-block encryption: block `i` of the input is XORed with the
    /// keystream for `counter + i`, so the output always has the input's
    /// length. Fails with [CounterOverflow](Error::CounterOverflow) rather
    /// than letting the 48-bit counter wrap into a reused keystream.
    ///
    /// A caller sending message `m` of `b` blocks should advance its counter
    /// by `b` before the next message.
    pub fn encrypt_stream(&self, data: &[u8], counter: u64) -> Result<Vec<u8>> {
        if data.len() >= PARALLEL_THRESHOLD {
            ctr_core_parallel(data, self.cipher.round_keys(), &self.nonce, counter)
        } else {
            ctr_core_serial(data, self.cipher.round_keys(), &self.nonce, counter)
        }
    }

    /// Multi-block decryption; same operation as
    /// [encrypt_stream](Self::encrypt_stream).
    pub fn decrypt_stream(&self, data: &[u8], counter: u64) -> Result<Vec<u8>> {
        self.encrypt_stream(data, counter)
    }
}

/// Rejects counter ranges that would escape 48 bits before any keystream is
/// produced, so both cores can assume plain addition is safe.
fn check_counter_range(input_len: usize, ctr_start: u64) -> Result<()> {
    let blocks = input_len.div_ceil(16) as u64;
    let last = ctr_start
        .checked_add(blocks.saturating_sub(1))
        .ok_or(Error::CounterOverflow)?;
    if last > COUNTER_MASK {
        return Err(Error::CounterOverflow);
    }
    Ok(())
}

/// Core counter encryption and decryption over any number of blocks (CTR is
/// symmetric).
pub(crate) fn ctr_core_serial(
    input: &[u8],
    round_keys: &[[u8; 16]],
    nonce: &[u8],
    ctr_start: u64,
) -> Result<Vec<u8>> {
    check_counter_range(input.len(), ctr_start)?;

    let mut output = Vec::with_capacity(input.len());
    let mut ctr = ctr_start;

    for chunk in input.chunks(16) {
        let block = counter_block(nonce, ctr);
        let keystream = encrypt_block(&block, round_keys);
        let ct = xor_chunks(&keystream, chunk);
        output.extend_from_slice(&ct[..chunk.len()]);
        ctr += 1;
    }

    Ok(output)
}

/// Same as [`ctr_core_serial`], with independent blocks fanned out across the
/// rayon pool.
pub(crate) fn ctr_core_parallel(
    input: &[u8],
    round_keys: &[[u8; 16]],
    nonce: &[u8],
    ctr_start: u64,
) -> Result<Vec<u8>> {
    check_counter_range(input.len(), ctr_start)?;

    let mut output = vec![0u8; input.len()];

    output
        .par_chunks_mut(16)
        .zip(input.par_chunks(16))
        .enumerate()
        .for_each(|(i, (out_chunk, in_chunk))| {
            let block = counter_block(nonce, ctr_start + i as u64);
            let keystream = encrypt_block(&block, round_keys);

            for j in 0..in_chunk.len() {
                out_chunk[j] = keystream[j] ^ in_chunk[j];
            }
        });

    Ok(output)
}
