use std::sync::Arc;

use jetton_minter_core::cell::{ArcCell, Cell, CellBuilder};
use jetton_minter_core::TonAddress;
use num_bigint::{BigInt, BigUint};
use strum::Display;

use crate::types::StackParseError;

/// Get-method argument or result.
///
/// A `Slice` is carried as the cell it spans, from its first bit to its last reference.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum TvmStackEntry {
    Null,
    Nan,
    Int64(i64),
    Int257(BigInt),
    Cell(ArcCell),
    Slice(ArcCell),
    Unsupported,
}

impl TvmStackEntry {
    pub fn get_bool(&self) -> Result<bool, StackParseError> {
        match self.get_i64()? {
            0 => Ok(false),
            -1 => Ok(true),
            n => Err(StackParseError::InvalidEntryValue(format!(
                "expected boolean, found number:{}",
                n
            ))),
        }
    }

    pub fn get_i64(&self) -> Result<i64, StackParseError> {
        match self {
            TvmStackEntry::Int64(number) => Ok(*number),
            TvmStackEntry::Int257(number) => number.try_into().map_err(|_| {
                StackParseError::InvalidEntryValue("Received number exceeds i64".to_string())
            }),
            t => Err(StackParseError::InvalidEntryType {
                expected: "Number".to_string(),
                found: t.clone(),
            }),
        }
    }

    pub fn get_bigint(&self) -> Result<BigInt, StackParseError> {
        match self {
            TvmStackEntry::Int64(number) => Ok(BigInt::from(*number)),
            TvmStackEntry::Int257(number) => Ok(number.clone()),
            t => Err(StackParseError::InvalidEntryType {
                expected: "Number".to_string(),
                found: t.clone(),
            }),
        }
    }

    pub fn get_biguint(&self) -> Result<BigUint, StackParseError> {
        self.get_bigint()?
            .try_into()
            .map_err(|_| StackParseError::InvalidEntryValue("Positive number expected".to_string()))
    }

    pub fn get_cell(&self) -> Result<ArcCell, StackParseError> {
        match self {
            TvmStackEntry::Cell(cell) => Ok(cell.clone()),
            t => Err(StackParseError::InvalidEntryType {
                expected: "Cell".to_string(),
                found: t.clone(),
            }),
        }
    }

    pub fn get_address(&self) -> Result<TonAddress, StackParseError> {
        self.get_maybe_address()?.ok_or_else(|| {
            StackParseError::InvalidEntryValue("addr_std expected, got addr_none".to_string())
        })
    }

    /// Address slice that may hold `addr_none`.
    pub fn get_maybe_address(&self) -> Result<Option<TonAddress>, StackParseError> {
        match self {
            TvmStackEntry::Cell(cell) | TvmStackEntry::Slice(cell) => cell
                .parse_fully(|r| r.load_maybe_address())
                .map_err(StackParseError::CellError),
            t => Err(StackParseError::InvalidEntryType {
                expected: "Slice".to_string(),
                found: t.clone(),
            }),
        }
    }
}

impl From<bool> for TvmStackEntry {
    fn from(value: bool) -> Self {
        let i = if value { -1 } else { 0 };
        TvmStackEntry::Int64(i)
    }
}

impl From<i64> for TvmStackEntry {
    fn from(value: i64) -> Self {
        TvmStackEntry::Int64(value)
    }
}

impl From<BigInt> for TvmStackEntry {
    fn from(value: BigInt) -> Self {
        TvmStackEntry::Int257(value)
    }
}

impl From<BigUint> for TvmStackEntry {
    fn from(value: BigUint) -> Self {
        TvmStackEntry::Int257(value.into())
    }
}

impl From<Cell> for TvmStackEntry {
    fn from(value: Cell) -> Self {
        TvmStackEntry::Cell(Arc::new(value))
    }
}

impl TryFrom<&TonAddress> for TvmStackEntry {
    type Error = StackParseError;

    fn try_from(value: &TonAddress) -> Result<Self, Self::Error> {
        let cell = CellBuilder::new().store_address(value)?.build()?;
        Ok(TvmStackEntry::Slice(cell.to_arc()))
    }
}
