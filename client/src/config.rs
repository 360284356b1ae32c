use std::env;
use std::time::Duration;

use jetton_minter_core::cell::{ArcCell, BagOfCells, TonCellError};
use jetton_minter_core::keys::{KeyPair, KeyPairError};
use jetton_minter_core::mnemonic::{Mnemonic, MnemonicError};
use jetton_minter_core::{TonAddress, TonAddressParseError};
use num_bigint::BigUint;
use num_traits::Num;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transactions::PollSettings;

pub const JETTON_ADMIN_VAR: &str = "JETTON_ADMIN";
pub const JETTON_CONTENT_URI_VAR: &str = "JETTON_CONTENT_URI";
pub const PUBLIC_KEY_VAR: &str = "PUBLIC_KEY";
pub const JETTON_MINTER_CODE_VAR: &str = "JETTON_MINTER_CODE";
pub const JETTON_WALLET_CODE_VAR: &str = "JETTON_WALLET_CODE";
pub const WALLET_MNEMONIC_VAR: &str = "WALLET_MNEMONIC";
pub const WALLET_MNEMONIC_PASSWORD_VAR: &str = "WALLET_MNEMONIC_PASSWORD";
pub const WALLET_SECRET_KEY_VAR: &str = "WALLET_SECRET_KEY";
pub const PERMIT_TREASURY_VAR: &str = "PERMIT_TREASURY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing configuration value {0}")]
    MissingValue(&'static str),

    #[error("Invalid configuration value {name} ({message})")]
    InvalidValue { name: &'static str, message: String },

    #[error("Invalid address in {name} ({error})")]
    InvalidAddress {
        name: &'static str,
        error: TonAddressParseError,
    },

    #[error("Invalid code cell in {name} ({error})")]
    InvalidCode {
        name: &'static str,
        error: TonCellError,
    },

    #[error("Invalid key in {name} ({error})")]
    InvalidKey {
        name: &'static str,
        error: KeyPairError,
    },

    #[error("Invalid mnemonic in {name} ({error})")]
    InvalidMnemonic {
        name: &'static str,
        error: MnemonicError,
    },

    #[error("Invalid json ({0})")]
    Json(#[from] serde_json::Error),
}

/// Interactive console settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Chain polls made while waiting for a transaction or a deploy.
    pub attempts: usize,
    pub poll_interval_ms: u64,
    pub workchain: i32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            attempts: 10,
            poll_interval_ms: 2000,
            workchain: 0,
        }
    }
}

impl ConsoleConfig {
    pub fn from_json(config: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(config)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            attempts: self.attempts,
            interval: Duration::from_millis(self.poll_interval_ms),
        }
    }
}

/// Everything needed to deploy a new minter.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployConfig {
    pub admin: TonAddress,
    pub content_uri: String,
    pub public_key: BigUint,
    pub minter_code: ArcCell,
    pub wallet_code: ArcCell,
}

#[derive(Deserialize)]
struct DeployConfigJson {
    admin: TonAddress,
    content_uri: String,
    #[serde(default)]
    public_key: Option<String>,
    minter_code: String,
    wallet_code: String,
}

impl DeployConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Reads the deploy settings through `lookup`.
    ///
    /// An unset `PUBLIC_KEY` means zero.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::MissingValue(name));
        Ok(DeployConfig {
            admin: parse_address(JETTON_ADMIN_VAR, &required(JETTON_ADMIN_VAR)?)?,
            content_uri: required(JETTON_CONTENT_URI_VAR)?,
            public_key: parse_public_key(PUBLIC_KEY_VAR, lookup(PUBLIC_KEY_VAR).as_deref())?,
            minter_code: parse_code(JETTON_MINTER_CODE_VAR, &required(JETTON_MINTER_CODE_VAR)?)?,
            wallet_code: parse_code(JETTON_WALLET_CODE_VAR, &required(JETTON_WALLET_CODE_VAR)?)?,
        })
    }

    pub fn from_json(config: &str) -> Result<Self, ConfigError> {
        let json: DeployConfigJson = serde_json::from_str(config)?;
        Ok(DeployConfig {
            admin: json.admin,
            content_uri: json.content_uri,
            public_key: parse_public_key("public_key", json.public_key.as_deref())?,
            minter_code: parse_code("minter_code", &json.minter_code)?,
            wallet_code: parse_code("wallet_code", &json.wallet_code)?,
        })
    }
}

/// Key and addresses used by the permit console.
#[derive(Debug, Clone)]
pub struct PermitConfig {
    pub key_pair: KeyPair,
    /// Receives the excess of processed permits.
    pub treasury: TonAddress,
    /// Expected jetton wallet code, the code check is skipped when unset.
    pub wallet_code: Option<ArcCell>,
}

impl PermitConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key_pair = permit_key_pair(&lookup)?;
        let treasury = lookup(PERMIT_TREASURY_VAR)
            .ok_or(ConfigError::MissingValue(PERMIT_TREASURY_VAR))?;
        let wallet_code = lookup(JETTON_WALLET_CODE_VAR)
            .map(|code| parse_code(JETTON_WALLET_CODE_VAR, &code))
            .transpose()?;
        Ok(PermitConfig {
            key_pair,
            treasury: parse_address(PERMIT_TREASURY_VAR, &treasury)?,
            wallet_code,
        })
    }
}

/// Signing key from `WALLET_MNEMONIC` (with `WALLET_MNEMONIC_PASSWORD`),
/// or from a hex `WALLET_SECRET_KEY` when no mnemonic is set.
fn permit_key_pair<F>(lookup: &F) -> Result<KeyPair, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(phrase) = lookup(WALLET_MNEMONIC_VAR) {
        let password = lookup(WALLET_MNEMONIC_PASSWORD_VAR);
        return Mnemonic::parse(&phrase, password.as_deref())
            .and_then(|mnemonic| mnemonic.to_key_pair())
            .map_err(|error| ConfigError::InvalidMnemonic {
                name: WALLET_MNEMONIC_VAR,
                error,
            });
    }
    let secret_key =
        lookup(WALLET_SECRET_KEY_VAR).ok_or(ConfigError::MissingValue(WALLET_MNEMONIC_VAR))?;
    KeyPair::from_hex(&secret_key).map_err(|error| ConfigError::InvalidKey {
        name: WALLET_SECRET_KEY_VAR,
        error,
    })
}

/// Expected minter code for the console's code check, read from `JETTON_MINTER_CODE` if set.
pub fn expected_minter_code_from_env() -> Result<Option<ArcCell>, ConfigError> {
    env::var(JETTON_MINTER_CODE_VAR)
        .ok()
        .map(|code| parse_code(JETTON_MINTER_CODE_VAR, &code))
        .transpose()
}

fn parse_address(name: &'static str, value: &str) -> Result<TonAddress, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|error| ConfigError::InvalidAddress { name, error })
}

/// Accepts a decimal or `0x` prefixed hexadecimal number of at most 256 bits.
fn parse_public_key(name: &'static str, value: Option<&str>) -> Result<BigUint, ConfigError> {
    let value = match value.map(str::trim) {
        None | Some("") => return Ok(BigUint::default()),
        Some(value) => value,
    };
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => BigUint::from_str_radix(hex, 16),
        None => BigUint::from_str_radix(value, 10),
    };
    let key = parsed.map_err(|err| ConfigError::InvalidValue {
        name,
        message: err.to_string(),
    })?;
    if key.bits() > 256 {
        return Err(ConfigError::InvalidValue {
            name,
            message: format!("{} bits exceed 256", key.bits()),
        });
    }
    Ok(key)
}

/// Single-root bag of cells in hex or base64.
fn parse_code(name: &'static str, value: &str) -> Result<ArcCell, ConfigError> {
    let value = value.trim();
    let boc = if value.len() % 2 == 0 && value.bytes().all(|b| b.is_ascii_hexdigit()) {
        BagOfCells::parse_hex(value)
    } else {
        BagOfCells::parse_base64(value)
    };
    boc.and_then(BagOfCells::single_root)
        .map_err(|error| ConfigError::InvalidCode { name, error })
}
