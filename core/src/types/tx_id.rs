use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::{TonHash, TransactionIdParseError};

/// Logical time and hash of an account transaction.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct TonTxId {
    pub lt: i64,
    pub hash: TonHash,
}

impl TonTxId {
    pub fn new(lt: i64, hash: TonHash) -> TonTxId {
        TonTxId { lt, hash }
    }

    pub fn hash_string(&self) -> String {
        hex::encode(self.hash)
    }

    pub fn to_formatted_string(&self) -> String {
        format!("{}:{}", self.lt, self.hash_string())
    }

    /// Accepts the hash as 64 hex digits or as padded base64 (standard or url-safe).
    pub fn from_lt_hash(lt: i64, hash_str: &str) -> Result<TonTxId, TransactionIdParseError> {
        let decoded = if hash_str.len() == 64 {
            hex::decode(hash_str).ok()
        } else if hash_str.contains('-') || hash_str.contains('_') {
            URL_SAFE.decode(hash_str).ok()
        } else {
            STANDARD.decode(hash_str).ok()
        };
        let hash = decoded
            .and_then(|bytes| TonHash::try_from(bytes.as_slice()).ok())
            .ok_or_else(|| {
                TransactionIdParseError::new(
                    format!("{}, {}", lt, hash_str),
                    "Incorrect tx hash format",
                )
            })?;
        Ok(TonTxId { lt, hash })
    }
}

impl FromStr for TonTxId {
    type Err = TransactionIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lt, hash_str) = s
            .split_once(':')
            .ok_or_else(|| TransactionIdParseError::new(s, "Invalid transaction id: wrong format"))?;
        let lt: i64 = lt
            .parse()
            .map_err(|_| TransactionIdParseError::new(s, "Invalid transaction id: bad lt"))?;
        TonTxId::from_lt_hash(lt, hash_str)
    }
}

impl Display for TonTxId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_formatted_string().as_str())
    }
}

impl Debug for TonTxId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_formatted_string().as_str())
    }
}
