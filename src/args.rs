use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, author, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encrypt input to output (nonce is generated and prepended)
    Encrypt(CommonArgs),

    /// Decrypt input to output (nonce is read from the input header)
    Decrypt(CommonArgs),
}

#[derive(Args, Debug)]
#[command(arg_required_else_help = true)]
pub struct CommonArgs {
    /// Password the message key is derived from.
    #[arg(short = 'p', long = "password")]
    pub password: String,

    /// Salt for key derivation, provided as hex string.
    #[arg(short = 's', long = "salt", value_name = "HEX")]
    pub salt: String,

    /// Key size in bits.
    #[arg(
        long = "key-size",
        value_enum,
        default_value_t = KeySize::Bits256,
    )]
    pub key_size: KeySize,

    /// Starting message counter. Must match between encrypt and decrypt, and
    /// must never repeat under the same nonce and key.
    #[arg(short = 'c', long = "counter", default_value_t = 0)]
    pub counter: u64,

    /// Input file path.
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output file path.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

#[derive(Copy, Clone, Debug, ValueEnum, Eq, PartialEq)]
pub enum KeySize {
    #[value(name = "128")]
    Bits128,
    #[value(name = "192")]
    Bits192,
    #[value(name = "256")]
    Bits256,
}
