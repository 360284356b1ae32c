//! Chain access the tooling depends on.
//!
//! Network transports (lite servers, HTTP APIs, wallets that sign outgoing messages)
//! implement [`ChainProvider`]; the rest of the crate only talks to the trait.

mod error;

use async_trait::async_trait;
pub use error::*;
use jetton_minter_core::cell::ArcCell;
use jetton_minter_core::message::TransferMessage;
use jetton_minter_core::{TonAddress, TonTxId};

use crate::types::{TvmStackEntry, TvmSuccess};

#[derive(Debug, Clone, PartialEq)]
pub enum AccountStatus {
    Active { code: ArcCell, data: ArcCell },
    Uninit,
    Frozen,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountState {
    pub status: AccountStatus,
    pub last_transaction: Option<TonTxId>,
}

impl AccountState {
    pub fn code(&self) -> Option<&ArcCell> {
        match &self.status {
            AccountStatus::Active { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, AccountStatus::Active { .. })
    }
}

#[async_trait]
pub trait ChainProvider: Send + Sync {
    /// Wallet that signs and pays for outgoing messages, if one is configured.
    fn sender_address(&self) -> Option<TonAddress>;

    /// Sends `message` from the sender wallet.
    ///
    /// The provider fills in the source address, the message is delivered with `send_mode`.
    async fn send_internal(
        &self,
        message: &TransferMessage,
        send_mode: u8,
    ) -> Result<(), ChainProviderError>;

    async fn last_block_seqno(&self) -> Result<u32, ChainProviderError>;

    async fn get_account(
        &self,
        seqno: u32,
        address: &TonAddress,
    ) -> Result<AccountState, ChainProviderError>;

    async fn is_contract_deployed(&self, address: &TonAddress) -> Result<bool, ChainProviderError>;

    async fn run_get_method(
        &self,
        address: &TonAddress,
        method: &str,
        stack: &[TvmStackEntry],
    ) -> Result<TvmSuccess, ChainProviderError>;

    /// State of `address` at the most recent block.
    async fn get_latest_account(
        &self,
        address: &TonAddress,
    ) -> Result<AccountState, ChainProviderError> {
        let seqno = self.last_block_seqno().await?;
        self.get_account(seqno, address).await
    }
}
