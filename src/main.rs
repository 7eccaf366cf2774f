mod args;

use args::{Cli, Commands, KeySize};
use clap::Parser;

use std::fs;
use std::time::Instant;

use thiserror::Error;

use chatcipher::{BlockCipher, CounterMode, KeyLength, random_nonce};

/// Bytes of nonce prepended to every encrypted file.
const NONCE_LEN: usize = 10;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid --salt hex: {0}")]
    SaltInvalidHex(#[from] std::num::ParseIntError),

    #[error("ciphertext too short: missing {NONCE_LEN}-byte nonce header")]
    MissingNonce,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Cipher(#[from] chatcipher::Error),
}

fn main() {
    if let Err(e) = message_cli() {
        eprintln!("error: {e}");
    }
}

fn message_cli() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encrypt(common) => {
            let plaintext = fs::read(&common.input)?;
            let salt = parse_hex(&common.salt)?;

            let cipher = BlockCipher::new(&common.password, &salt, key_length(common.key_size))?;
            let nonce = random_nonce()?;
            let ctr = CounterMode::new(&cipher, &nonce)?;

            let start = Instant::now();
            let ciphertext = ctr.encrypt_stream(&plaintext, common.counter)?;
            let duration = start.elapsed();

            // output format: nonce || ciphertext
            let mut out = nonce.to_vec();
            out.extend_from_slice(&ciphertext);
            fs::write(&common.output, &out)?;

            println!(
                "Encrypted {} bytes in {} ms",
                plaintext.len(),
                duration.as_millis()
            );
            Ok(())
        }
        Commands::Decrypt(common) => {
            let input = fs::read(&common.input)?;
            if input.len() < NONCE_LEN {
                return Err(CliError::MissingNonce);
            }
            let (nonce, ciphertext) = input.split_at(NONCE_LEN);
            let salt = parse_hex(&common.salt)?;

            let cipher = BlockCipher::new(&common.password, &salt, key_length(common.key_size))?;
            let ctr = CounterMode::new(&cipher, nonce)?;

            let start = Instant::now();
            let plaintext = ctr.decrypt_stream(ciphertext, common.counter)?;
            let duration = start.elapsed();

            fs::write(&common.output, &plaintext)?;

            println!(
                "Decrypted {} bytes in {} ms",
                plaintext.len(),
                duration.as_millis()
            );
            Ok(())
        }
    }
}

fn key_length(size: KeySize) -> KeyLength {
    match size {
        KeySize::Bits128 => KeyLength::Bits128,
        KeySize::Bits192 => KeyLength::Bits192,
        KeySize::Bits256 => KeyLength::Bits256,
    }
}

fn parse_hex(s: &str) -> Result<Vec<u8>, std::num::ParseIntError> {
    let mut hex: String = s.chars().filter(|c| !c.is_whitespace()).collect();

    if hex.len() % 2 == 1 {
        hex.insert(0, '0');
    }

    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16))
        .collect::<Result<Vec<u8>, _>>()
}
