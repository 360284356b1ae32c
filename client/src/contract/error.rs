use std::borrow::Cow;

use jetton_minter_core::cell::TonCellError;
use jetton_minter_core::message::TonMessageError;
use jetton_minter_core::TonAddress;
use thiserror::Error;

use crate::provider::ChainProviderError;
use crate::types::{StackParseError, TvmStackEntry};

#[derive(Error, Debug)]
pub enum TonContractError {
    #[error("Cell error (Method: {method}, address: {address}, error {error}")]
    CellError {
        method: String,
        address: TonAddress,
        error: TonCellError,
    },

    #[error("ChainProviderError ({0})")]
    ProviderError(#[from] ChainProviderError),

    #[error("Message error ({0})")]
    MessageError(#[from] TonMessageError),

    #[error("Invalid argument ({0})")]
    InvalidArgument(String),

    #[error("Invalid method result stack size  (Method: {method}, address: {address}, actual: {actual}, expected {expected})")]
    InvalidMethodResultStackSize {
        method: String,
        address: TonAddress,
        actual: usize,
        expected: usize,
    },

    #[error(
        "Tvm stack parse  error (Method: {method}, address: {address}, stack error: {error:?})"
    )]
    TvmStackParseError {
        method: String,
        address: TonAddress,
        error: Box<StackParseError>,
    },

    #[error(
        "Tvm run error (Method: {method}, address: {address}, exit code: {exit_code}, gas used: {gas_used}, stack: {stack:?}, vm_log: {vm_log:?})"
    )]
    TvmRunError {
        method: String,
        address: TonAddress,
        vm_log: Box<Option<String>>,
        exit_code: i32,
        stack: Box<Vec<TvmStackEntry>>,
        gas_used: i32,
    },
}

pub trait MapStackError<R> {
    fn map_stack_error(
        self,
        method: impl Into<Cow<'static, str>>,
        address: &TonAddress,
    ) -> Result<R, TonContractError>;
}

pub trait MapCellError<R> {
    fn map_cell_error(
        self,
        method: impl Into<Cow<'static, str>>,
        address: &TonAddress,
    ) -> Result<R, TonContractError>;
}

impl<R> MapStackError<R> for Result<R, StackParseError> {
    fn map_stack_error(
        self,
        method: impl Into<Cow<'static, str>>,
        address: &TonAddress,
    ) -> Result<R, TonContractError> {
        self.map_err(|e| TonContractError::TvmStackParseError {
            method: method.into().into_owned(),
            address: address.clone(),
            error: e.into(),
        })
    }
}

impl<R> MapCellError<R> for Result<R, TonCellError> {
    fn map_cell_error(
        self,
        method: impl Into<Cow<'static, str>>,
        address: &TonAddress,
    ) -> Result<R, TonContractError> {
        self.map_err(|e| TonContractError::CellError {
            method: method.into().into_owned(),
            address: address.clone(),
            error: e,
        })
    }
}
