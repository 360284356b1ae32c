mod error;

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::str::FromStr;

pub use error::*;
use hmac::{Hmac, Mac};
use lazy_static::lazy_static;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;

use crate::keys::{KeyPair, SEED_LEN};

const WORDLIST_EN: &str = include_str!("mnemonic/wordlist.EN");
const WORD_COUNT: usize = 24;
const PBKDF_ITERATIONS: u32 = 100_000;
const SEED_VERSION_ITERATIONS: u32 = PBKDF_ITERATIONS / 256;

lazy_static! {
    pub static ref WORDLIST_EN_SET: HashMap<&'static str, usize> = WORDLIST_EN
        .lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .enumerate()
        .map(|(i, w)| (w, i))
        .collect();
}

/// 24-word TON wallet mnemonic with an optional password.
///
/// The phrase is checked the way TON wallets check it: a passwordless phrase must hash to
/// a seed starting with zero, a password protected one must not be a valid passwordless phrase.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic {
    words: Vec<String>,
    password: Option<String>,
}

impl Mnemonic {
    pub fn new(words: &[&str], password: Option<&str>) -> Result<Mnemonic, MnemonicError> {
        let words: Vec<String> = words.iter().map(|w| w.trim().to_lowercase()).collect();
        if words.len() != WORD_COUNT {
            return Err(MnemonicError::UnexpectedWordCount(words.len()));
        }
        if let Some(word) = words
            .iter()
            .find(|w| !WORDLIST_EN_SET.contains_key(w.as_str()))
        {
            return Err(MnemonicError::InvalidWord(word.clone()));
        }

        let password = password.filter(|p| !p.is_empty());
        match password {
            Some(_) => {
                let basic = pbkdf2_sha512(
                    &to_entropy(&words, None)?,
                    "TON fast seed version",
                    1,
                );
                if basic[0] != 1 {
                    return Err(MnemonicError::InvalidFirstByte(basic[0]));
                }
                let seed = pbkdf2_sha512(
                    &to_entropy(&words, password)?,
                    "TON seed version",
                    SEED_VERSION_ITERATIONS,
                );
                if seed[0] == 0 {
                    return Err(MnemonicError::InvalidFirstByte(seed[0]));
                }
            }
            None => {
                let seed = pbkdf2_sha512(
                    &to_entropy(&words, None)?,
                    "TON seed version",
                    SEED_VERSION_ITERATIONS,
                );
                if seed[0] != 0 {
                    return Err(MnemonicError::PasswordRequired(seed[0]));
                }
            }
        }

        Ok(Mnemonic {
            words,
            password: password.map(str::to_string),
        })
    }

    /// Space separated phrase, extra whitespace is ignored.
    pub fn parse(phrase: &str, password: Option<&str>) -> Result<Mnemonic, MnemonicError> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        Mnemonic::new(&words, password)
    }

    pub fn to_key_pair(&self) -> Result<KeyPair, MnemonicError> {
        let entropy = to_entropy(&self.words, self.password.as_deref())?;
        let seed = pbkdf2_sha512(&entropy, "TON default seed", PBKDF_ITERATIONS);
        Ok(KeyPair::from_seed(&seed[..SEED_LEN])?)
    }
}

impl FromStr for Mnemonic {
    type Err = MnemonicError;

    fn from_str(phrase: &str) -> Result<Self, Self::Err> {
        Mnemonic::parse(phrase, None)
    }
}

impl Debug for Mnemonic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mnemonic")
            .field("words", &self.words.len())
            .finish_non_exhaustive()
    }
}

fn to_entropy(words: &[String], password: Option<&str>) -> Result<Vec<u8>, MnemonicError> {
    let mut mac = Hmac::<Sha512>::new_from_slice(words.join(" ").as_bytes())?;
    if let Some(password) = password {
        mac.update(password.as_bytes());
    }
    Ok(mac.finalize().into_bytes().to_vec())
}

fn pbkdf2_sha512(key: &[u8], salt: &str, rounds: u32) -> [u8; 64] {
    let mut output = [0u8; 64];
    pbkdf2_hmac::<Sha512>(key, salt.as_bytes(), rounds, &mut output);
    output
}
