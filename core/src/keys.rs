use std::fmt::{Debug, Formatter};

use nacl::sign::{generate_keypair, signature};
use num_bigint::BigUint;
use thiserror::Error;

pub const SEED_LEN: usize = 32;
pub const SECRET_KEY_LEN: usize = 64;
pub const SIGNATURE_LEN: usize = 64;

#[derive(Error, Debug)]
pub enum KeyPairError {
    #[error("Key must be 32 byte seed or 64 byte secret key, got {0} bytes")]
    InvalidLength(usize),

    #[error("Key is not a valid hex string ({0})")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Public key half of the secret key doesn't match its seed")]
    PublicKeyMismatch,

    #[error("Signing failed ({0})")]
    SigningError(String),
}

/// Ed25519 key pair. `secret_key` is the 64-byte NaCl form: seed followed by public key.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub public_key: Vec<u8>,
    pub secret_key: Vec<u8>,
}

impl KeyPair {
    pub fn from_seed(seed: &[u8]) -> Result<KeyPair, KeyPairError> {
        if seed.len() != SEED_LEN {
            return Err(KeyPairError::InvalidLength(seed.len()));
        }
        let key_pair = generate_keypair(seed);
        Ok(KeyPair {
            public_key: key_pair.pkey.to_vec(),
            secret_key: key_pair.skey.to_vec(),
        })
    }

    pub fn from_secret_key(secret_key: &[u8]) -> Result<KeyPair, KeyPairError> {
        match secret_key.len() {
            SEED_LEN => Self::from_seed(secret_key),
            SECRET_KEY_LEN => {
                let key_pair = Self::from_seed(&secret_key[..SEED_LEN])?;
                if key_pair.public_key != secret_key[SEED_LEN..] {
                    return Err(KeyPairError::PublicKeyMismatch);
                }
                Ok(key_pair)
            }
            len => Err(KeyPairError::InvalidLength(len)),
        }
    }

    /// Accepts a hex encoded 32-byte seed or 64-byte secret key.
    pub fn from_hex(hex_key: &str) -> Result<KeyPair, KeyPairError> {
        let bytes = hex::decode(hex_key.trim())?;
        Self::from_secret_key(&bytes)
    }

    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>, KeyPairError> {
        signature(data, self.secret_key.as_slice())
            .map_err(|err| KeyPairError::SigningError(err.message))
    }

    /// Public key as the 256-bit unsigned integer contracts keep in their data.
    pub fn public_key_uint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.public_key)
    }
}

impl Debug for KeyPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &hex::encode(&self.public_key))
            .finish_non_exhaustive()
    }
}
