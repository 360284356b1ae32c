use jetton_minter_core::cell::TonCellError;
use jetton_minter_core::message::TonMessageError;
use jetton_minter_core::TonAddress;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainProviderError {
    #[error("Account not found (Address: {0})")]
    AccountNotFound(TonAddress),

    #[error("Message was rejected (Address: {address}, message: {message})")]
    MessageRejected { address: TonAddress, message: String },

    #[error("Get method failed (Method: {method}, address: {address}, message: {message})")]
    GetMethodFailed {
        method: String,
        address: TonAddress,
        message: String,
    },

    #[error("Transport error ({0})")]
    Transport(String),

    #[error("{0}")]
    TonCellError(#[from] TonCellError),

    #[error("{0}")]
    TonMessageError(#[from] TonMessageError),
}
