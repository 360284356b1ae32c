use jetton_minter_core::cell::TonCellError;
use jetton_minter_core::message::TonMessageError;
use jetton_minter_core::TonAddress;
use thiserror::Error;

use crate::contract::TonContractError;
use crate::provider::ChainProviderError;
use crate::ui::UiError;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("{0}")]
    ContractError(#[from] TonContractError),

    #[error("{0}")]
    ProviderError(#[from] ChainProviderError),

    #[error("{0}")]
    UiError(#[from] UiError),

    #[error("{0}")]
    MessageError(#[from] TonMessageError),

    #[error("{0}")]
    CellError(#[from] TonCellError),

    #[error("Last transaction can't be empty on deployed contract {0}")]
    MissingLastTransaction(TonAddress),

    #[error("No state init to deploy {0}")]
    MissingStateInit(TonAddress),
}
