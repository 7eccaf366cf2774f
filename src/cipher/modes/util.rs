pub(crate) const PARALLEL_THRESHOLD: usize = 4 * 1024; // encrypt in parallel if input size gt 4 KiB

/// Longest nonce the 16-byte counter block can hold next to a 6-byte counter.
pub(crate) const MAX_NONCE_LEN: usize = 10;

/// The message counter is serialized into 6 bytes; values are truncated to 48 bits.
pub(crate) const COUNTER_MASK: u64 = (1 << 48) - 1;

/// Forms one 16-byte counter block: nonce, then the low 48 bits of `ctr`
/// big-endian. Positions past `nonce.len() + 6` stay zero when the nonce is
/// shorter than [`MAX_NONCE_LEN`].
#[inline(always)]
pub(crate) fn counter_block(nonce: &[u8], ctr: u64) -> [u8; 16] {
    let cb = ctr.to_be_bytes();
    let mut block = [0u8; 16];
    block[..nonce.len()].copy_from_slice(nonce);
    block[nonce.len()..nonce.len() + 6].copy_from_slice(&cb[2..8]);
    block
}

#[inline(always)]
pub(crate) fn xor_chunks(keystream: &[u8; 16], chunk: &[u8]) -> [u8; 16] {
    let mut out: [u8; 16] = *keystream;
    for i in 0..chunk.len() {
        out[i] ^= chunk[i];
    }
    out
}
