mod cipher;

pub use cipher::{
    BlockCipher, CounterMode, Error, KeyDerivation, KeyLength, KeyMaterial, Result, XorKdf,
    random_nonce,
};
