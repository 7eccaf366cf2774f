mod block;
mod core;
mod error;
mod kdf;
mod modes;
mod util;

pub use block::BlockCipher;
pub use error::{Error, Result};
pub use kdf::{KeyDerivation, KeyLength, KeyMaterial, XorKdf};
pub use modes::CounterMode;
pub use util::random_nonce;
