use super::constants::SBOX;
use super::util::{add_round_key, gmul};

/// Encrypts one 16 byte block with the provided round keys. The state is held
/// column-major: bytes 0..4 form column 0, and row `r` of the 4x4 state lives
/// at indices `r`, `r+4`, `r+8`, `r+12`.
#[inline(always)]
pub fn encrypt_block(plaintext: &[u8; 16], round_keys: &[[u8; 16]]) -> [u8; 16] {
    let mut state = *plaintext;
    let last_key_idx = round_keys.len() - 1;

    // initial whitening
    add_round_key(&mut state, &round_keys[0]);

    // all rounds except the last
    for round_key in &round_keys[1..last_key_idx] {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, round_key);
    }

    // final round skips mix_columns
    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, &round_keys[last_key_idx]);

    state
}

/// SubBytes step. Each byte is substituted through the S-box.
#[inline(always)]
pub(crate) fn sub_bytes(state: &mut [u8; 16]) {
    for byte in state {
        *byte = SBOX[*byte as usize];
    }
}

/// ShiftRows step. Row `r` of the state is rotated left by `r` positions;
/// row 0 is untouched.
#[inline(always)]
pub(crate) fn shift_rows(state: &mut [u8; 16]) {
    let s = *state;

    // row 1 (1,5,9,13): left rotate by 1
    state[1] = s[5];
    state[5] = s[9];
    state[9] = s[13];
    state[13] = s[1];

    // row 2 (2,6,10,14): left rotate by 2
    state[2] = s[10];
    state[6] = s[14];
    state[10] = s[2];
    state[14] = s[6];

    // row 3 (3,7,11,15): left rotate by 3
    state[3] = s[15];
    state[7] = s[3];
    state[11] = s[7];
    state[15] = s[11];
}

/// MixColumns step. Each column is multiplied by the fixed MDS matrix in GF(2^8):
/// [ d0 ]      [ 2  3  1  1 ]  [ b0 ]
/// | d1 |  =   | 1  2  3  1 |  | b1 |
/// | d2 |      | 1  1  2  3 |  | b2 |
/// [ d3 ]      [ 3  1  1  2 ]  [ b3 ]
#[inline(always)]
pub(crate) fn mix_columns(state: &mut [u8; 16]) {
    for col in 0..4 {
        let i = col * 4;
        let (a, b, c, d) = (state[i], state[i + 1], state[i + 2], state[i + 3]);
        state[i] = gmul(0x02, a) ^ gmul(0x03, b) ^ c ^ d;
        state[i + 1] = a ^ gmul(0x02, b) ^ gmul(0x03, c) ^ d;
        state[i + 2] = a ^ b ^ gmul(0x02, c) ^ gmul(0x03, d);
        state[i + 3] = gmul(0x03, a) ^ b ^ c ^ gmul(0x02, d);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::block::BlockCipher;
    use crate::cipher::error::Result;

    #[test]
    fn test_shift_rows() {
        let mut state: [u8; 16] = [
            0, 1, 2, 3, //
            4, 5, 6, 7, //
            8, 9, 10, 11, //
            12, 13, 14, 15,
        ];
        shift_rows(&mut state);
        assert_eq!(
            state,
            [
                0, 5, 10, 15, //
                4, 9, 14, 3, //
                8, 13, 2, 7, //
                12, 1, 6, 11,
            ]
        );
    }

    #[test]
    fn test_mix_columns() {
        // test cases from https://en.wikipedia.org/wiki/Rijndael_MixColumns
        let mut test1: [u8; 16] = [
            // col 0
            0x63, 0x47, 0xa2, 0xf0,
            // col 1
            0xf2, 0x0a, 0x22, 0x5c,
            // col 2
            0x01, 0x01, 0x01, 0x01,
            // col 3
            0xc6, 0xc6, 0xc6, 0xc6,
        ];

        mix_columns(&mut test1);

        assert_eq!(
            test1,
            [
                // col 0
                0x5d, 0xe0, 0x70, 0xbb,
                // col 1
                0x9f, 0xdc, 0x58, 0x9d,
                // col 2
                0x01, 0x01, 0x01, 0x01,
                // col 3
                0xc6, 0xc6, 0xc6, 0xc6,
            ],
        );
    }

    #[test]
    fn test_encrypt_block_128() -> Result<()> {
        // test case from:
        // https://csrc.nist.gov/CSRC/media/Projects/Cryptographic-Standards-and-Guidelines/documents/examples/AES_Core128.pdf
        let key: [u8; 16] = [
            0x2B, 0x7E, 0x15, 0x16, 0x28, 0xAE, 0xD2, 0xA6, //
            0xAB, 0xF7, 0x15, 0x88, 0x09, 0xCF, 0x4F, 0x3C, //
        ];

        let plaintext: [u8; 16] = [
            0x6B, 0xC1, 0xBE, 0xE2, 0x2E, 0x40, 0x9F, 0x96, //
            0xE9, 0x3D, 0x7E, 0x11, 0x73, 0x93, 0x17, 0x2A, //
        ];

        let expected: [u8; 16] = [
            0x3A, 0xD7, 0x7B, 0xB4, 0x0D, 0x7A, 0x36, 0x60, //
            0xA8, 0x9E, 0xCA, 0xF3, 0x24, 0x66, 0xEF, 0x97, //
        ];

        let cipher = BlockCipher::from_key(&key)?;
        assert_eq!(cipher.encrypt(&plaintext)?, expected);
        Ok(())
    }

    #[test]
    fn test_encrypt_block_192() -> Result<()> {
        // test case from:
        // https://csrc.nist.gov/CSRC/media/Projects/Cryptographic-Standards-and-Guidelines/documents/examples/AES_Core192.pdf
        let key: [u8; 24] = [
            0x8E, 0x73, 0xB0, 0xF7, 0xDA, 0x0E, 0x64, 0x52, //
            0xC8, 0x10, 0xF3, 0x2B, 0x80, 0x90, 0x79, 0xE5, //
            0x62, 0xF8, 0xEA, 0xD2, 0x52, 0x2C, 0x6B, 0x7B, //
        ];

        let plaintext: [u8; 16] = [
            0x6B, 0xC1, 0xBE, 0xE2, 0x2E, 0x40, 0x9F, 0x96, //
            0xE9, 0x3D, 0x7E, 0x11, 0x73, 0x93, 0x17, 0x2A, //
        ];

        let expected: [u8; 16] = [
            0xBD, 0x33, 0x4F, 0x1D, 0x6E, 0x45, 0xF2, 0x5F, //
            0xF7, 0x12, 0xA2, 0x14, 0x57, 0x1F, 0xA5, 0xCC, //
        ];

        let cipher = BlockCipher::from_key(&key)?;
        assert_eq!(cipher.encrypt(&plaintext)?, expected);
        Ok(())
    }

    #[test]
    fn test_encrypt_block_256() -> Result<()> {
        // test case from:
        // https://csrc.nist.gov/CSRC/media/Projects/Cryptographic-Standards-and-Guidelines/documents/examples/AES_Core256.pdf
        let key: [u8; 32] = [
            0x60, 0x3D, 0xEB, 0x10, 0x15, 0xCA, 0x71, 0xBE, //
            0x2B, 0x73, 0xAE, 0xF0, 0x85, 0x7D, 0x77, 0x81, //
            0x1F, 0x35, 0x2C, 0x07, 0x3B, 0x61, 0x08, 0xD7, //
            0x2D, 0x98, 0x10, 0xA3, 0x09, 0x14, 0xDF, 0xF4, //
        ];

        let plaintext: [u8; 16] = [
            0x6B, 0xC1, 0xBE, 0xE2, 0x2E, 0x40, 0x9F, 0x96, //
            0xE9, 0x3D, 0x7E, 0x11, 0x73, 0x93, 0x17, 0x2A, //
        ];

        let expected: [u8; 16] = [
            0xF3, 0xEE, 0xD1, 0xBD, 0xB5, 0xD2, 0xA0, 0x3C, //
            0x06, 0x4B, 0x5A, 0x7E, 0x3D, 0xB1, 0x81, 0xF8, //
        ];

        let cipher = BlockCipher::from_key(&key)?;
        assert_eq!(cipher.encrypt(&plaintext)?, expected);
        Ok(())
    }

    #[test]
    fn avalanche_sanity() -> Result<()> {
        // flipping one input bit should change roughly half of the 128 output
        // bits; a wiring mistake in shift_rows/mix_columns collapses this
        let key: [u8; 32] = [0xA5; 32];
        let cipher = BlockCipher::from_key(&key)?;

        let base: [u8; 16] = *b"avalanche probe!";
        let base_ct = cipher.encrypt(&base)?;

        let mut total_flipped = 0u32;
        for bit in 0..128 {
            let mut flipped = base;
            flipped[bit / 8] ^= 1 << (bit % 8);
            let ct = cipher.encrypt(&flipped)?;

            for i in 0..16 {
                total_flipped += (base_ct[i] ^ ct[i]).count_ones();
            }
        }

        let avg = f64::from(total_flipped) / 128.0;
        assert!(
            (52.0..=76.0).contains(&avg),
            "average output bits flipped per input bit flip was {avg}, expected about 64"
        );
        Ok(())
    }
}
