use async_trait::async_trait;
use jetton_minter_core::message::PermitMessage;
use num_bigint::BigUint;

use crate::contract::{TonContractError, TonContractInterface};

#[async_trait]
pub trait JettonWalletContract: TonContractInterface {
    /// Delivers a signed permit to this wallet.
    async fn send_permit(
        &self,
        permit: &PermitMessage,
        value: &BigUint,
    ) -> Result<(), TonContractError> {
        log::info!(
            "Sending permit for {} jettons to {}",
            permit.payload.amount,
            self.address()
        );
        self.send_body(permit, value).await
    }
}

impl<T> JettonWalletContract for T where T: TonContractInterface {}
