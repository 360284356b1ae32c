use std::sync::Arc;

use async_trait::async_trait;
pub use error::*;
pub use jetton::*;
use jetton_minter_core::message::{
    InternalMessage, TonMessage, TransferMessage, SEND_MODE_PAY_GAS_SEPARATELY,
};
use jetton_minter_core::TonAddress;
use num_bigint::BigUint;

use crate::provider::{AccountState, ChainProvider};
use crate::types::{TvmStackEntry, TvmSuccess};

mod error;
mod jetton;

/// Handle of a contract at a fixed address.
#[derive(Clone)]
pub struct TonContract {
    provider: Arc<dyn ChainProvider>,
    address: TonAddress,
}

impl TonContract {
    pub fn new(provider: &Arc<dyn ChainProvider>, address: &TonAddress) -> TonContract {
        TonContract {
            provider: provider.clone(),
            address: address.clone(),
        }
    }
}

#[async_trait]
pub trait TonContractInterface: Send + Sync {
    fn provider(&self) -> &dyn ChainProvider;

    fn address(&self) -> &TonAddress;

    async fn get_account_state(&self) -> Result<AccountState, TonContractError> {
        Ok(self.provider().get_latest_account(self.address()).await?)
    }

    async fn run_get_method(
        &self,
        method: &str,
        stack: &[TvmStackEntry],
    ) -> Result<TvmSuccess, TonContractError> {
        let address = self.address();
        log::trace!("Running get method {} on {}", method, address);
        let result = self
            .provider()
            .run_get_method(address, method, stack)
            .await?;
        if result.exit_code_is_success() {
            Ok(result)
        } else {
            Err(TonContractError::TvmRunError {
                method: method.to_string(),
                address: address.clone(),
                vm_log: Box::new(result.vm_log),
                exit_code: result.vm_exit_code,
                stack: Box::new(result.stack),
                gas_used: result.gas_used,
            })
        }
    }

    /// Sends `body` to this contract with `value` attached, fees paid separately.
    async fn send_body<M>(&self, body: &M, value: &BigUint) -> Result<(), TonContractError>
    where
        M: TonMessage + Sync,
    {
        let mut message = TransferMessage::new(InternalMessage::new(self.address(), value));
        message.with_data(body.build()?.to_arc());
        self.send_transfer(&message).await
    }

    async fn send_transfer(&self, message: &TransferMessage) -> Result<(), TonContractError> {
        log::debug!(
            "Sending {} nanoton to {}",
            message.info.value,
            message.info.dest
        );
        self.provider()
            .send_internal(message, SEND_MODE_PAY_GAS_SEPARATELY)
            .await?;
        Ok(())
    }
}

impl TonContractInterface for TonContract {
    fn provider(&self) -> &dyn ChainProvider {
        self.provider.as_ref()
    }

    fn address(&self) -> &TonAddress {
        &self.address
    }
}
