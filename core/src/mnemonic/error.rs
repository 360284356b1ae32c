use thiserror::Error;

use crate::keys::KeyPairError;

#[derive(Debug, Error)]
pub enum MnemonicError {
    #[error("Mnemonic must have 24 words, got {0}")]
    UnexpectedWordCount(usize),

    #[error("Unknown mnemonic word {0}")]
    InvalidWord(String),

    #[error("Mnemonic doesn't match its password (first seed byte: {0:#X})")]
    InvalidFirstByte(u8),

    #[error("Mnemonic requires a password (first seed byte: {0:#X})")]
    PasswordRequired(u8),

    #[error("Invalid hmac key length ({0})")]
    InvalidKeyLength(#[from] hmac::digest::InvalidLength),

    #[error("Key pair derivation failed ({0})")]
    KeyPair(#[from] KeyPairError),
}
