//! Core AES implementation for encryption of a 16 byte block.

pub mod constants;
mod encryption;
mod util;

pub(crate) use encryption::encrypt_block;
pub(crate) use util::{gmul, xor_words};
