use async_trait::async_trait;
use jetton_minter_core::cell::{ArcCell, StateInit, EMPTY_ARC_CELL};
use jetton_minter_core::message::{
    BuyMessage, ChangeAdminMessage, ChangeContentMessage, ChangeStateMessage, InternalMessage,
    MintMessage, ProvideWalletAddressMessage, TransferMessage, WithdrawMessage,
};
use jetton_minter_core::TonAddress;
use lazy_static::lazy_static;
use num_bigint::BigUint;
use strum::IntoStaticStr;

use crate::contract::{MapCellError, MapStackError, TonContractError, TonContractInterface};
use crate::types::TvmStackEntry;

lazy_static! {
    /// Value attached to admin requests and discovery.
    pub static ref MINTER_REQUEST_VALUE: BigUint = BigUint::from(100_000_000u64);
    pub static ref MINTER_CHANGE_STATE_VALUE: BigUint = BigUint::from(200_000_000u64);
    /// Added on top of the mint's total TON amount to pay for the minter's own processing.
    pub static ref MINTER_MINT_FEE: BigUint = BigUint::from(100_000_000u64);
}

#[derive(IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
enum JettonMinterMethods {
    GetJettonData,
    GetWalletAddress,
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct JettonData {
    pub total_supply: BigUint,
    pub mintable: bool,
    /// `None` once administration has been dropped (`addr_none`).
    pub admin_address: Option<TonAddress>,
    pub content: ArcCell,
    pub wallet_code: ArcCell,
}

#[async_trait]
pub trait JettonMinterContract: TonContractInterface {
    async fn get_jetton_data(&self) -> Result<JettonData, TonContractError> {
        const JETTON_DATA_STACK_ELEMENTS: usize = 5;
        let method: &str = JettonMinterMethods::GetJettonData.into();
        let address = self.address().clone();

        let res = self.run_get_method(method, &[]).await?;

        let stack = res.stack;
        if stack.len() == JETTON_DATA_STACK_ELEMENTS {
            let total_supply = stack[0].get_biguint().map_stack_error(method, &address)?;
            let mintable = stack[1].get_i64().map_stack_error(method, &address)? != 0;
            let admin_address = stack[2]
                .get_maybe_address()
                .map_stack_error(method, &address)?;
            let content = stack[3].get_cell().map_stack_error(method, &address)?;
            let wallet_code = stack[4].get_cell().map_stack_error(method, &address)?;

            Ok(JettonData {
                total_supply,
                mintable,
                admin_address,
                content,
                wallet_code,
            })
        } else {
            Err(TonContractError::InvalidMethodResultStackSize {
                method: method.to_string(),
                address,
                actual: stack.len(),
                expected: JETTON_DATA_STACK_ELEMENTS,
            })
        }
    }

    async fn get_total_supply(&self) -> Result<BigUint, TonContractError> {
        Ok(self.get_jetton_data().await?.total_supply)
    }

    async fn get_admin_address(&self) -> Result<Option<TonAddress>, TonContractError> {
        Ok(self.get_jetton_data().await?.admin_address)
    }

    async fn get_content(&self) -> Result<ArcCell, TonContractError> {
        Ok(self.get_jetton_data().await?.content)
    }

    async fn get_mintable(&self) -> Result<bool, TonContractError> {
        Ok(self.get_jetton_data().await?.mintable)
    }

    async fn get_wallet_address(
        &self,
        owner_address: &TonAddress,
    ) -> Result<TonAddress, TonContractError> {
        let method: &str = JettonMinterMethods::GetWalletAddress.into();
        let address = self.address().clone();

        let slice = TvmStackEntry::try_from(owner_address).map_stack_error(method, &address)?;
        let res = self.run_get_method(method, &[slice]).await?;

        let stack = res.stack;
        if stack.len() == 1 {
            stack[0].get_address().map_stack_error(method, &address)
        } else {
            Err(TonContractError::InvalidMethodResultStackSize {
                method: method.to_string(),
                address,
                actual: stack.len(),
                expected: 1,
            })
        }
    }

    /// Deploys the minter described by `state_init` to this contract's address.
    async fn send_deploy(
        &self,
        state_init: &StateInit,
        value: &BigUint,
    ) -> Result<(), TonContractError> {
        let init = state_init
            .build()
            .map_cell_error("send_deploy", self.address())?;
        let mut message = TransferMessage::new(InternalMessage::new(self.address(), value));
        message.with_state_init(init).with_data(EMPTY_ARC_CELL.clone());
        self.send_transfer(&message).await
    }

    /// Mints `jetton_amount` to the wallet of `to`.
    ///
    /// Amounts are validated before anything is sent, `total_ton_amount` must exceed
    /// `forward_ton_amount`.
    async fn send_mint(
        &self,
        to: &TonAddress,
        jetton_amount: &BigUint,
        forward_ton_amount: &BigUint,
        total_ton_amount: &BigUint,
    ) -> Result<(), TonContractError> {
        let mint = MintMessage::new(
            self.address(),
            to,
            jetton_amount,
            forward_ton_amount,
            total_ton_amount,
        )?;
        let value = total_ton_amount + &*MINTER_MINT_FEE;
        self.send_body(&mint, &value).await
    }

    /// Asks the minter for the wallet address of `owner`. `value` defaults to 0.1 TON.
    async fn send_discovery(
        &self,
        owner: &TonAddress,
        include_address: bool,
        value: Option<&BigUint>,
    ) -> Result<(), TonContractError> {
        let discovery = ProvideWalletAddressMessage::new(owner, include_address);
        let value = value.unwrap_or(&*MINTER_REQUEST_VALUE);
        self.send_body(&discovery, value).await
    }

    async fn send_change_admin(&self, new_admin: &TonAddress) -> Result<(), TonContractError> {
        let change_admin = ChangeAdminMessage::new(new_admin);
        self.send_body(&change_admin, &MINTER_REQUEST_VALUE).await
    }

    async fn send_change_content(&self, content: &ArcCell) -> Result<(), TonContractError> {
        let change_content = ChangeContentMessage::new(content);
        self.send_body(&change_content, &MINTER_REQUEST_VALUE).await
    }

    async fn send_change_state(&self, state: bool) -> Result<(), TonContractError> {
        let change_state = ChangeStateMessage::new(state);
        self.send_body(&change_state, &MINTER_CHANGE_STATE_VALUE)
            .await
    }

    async fn send_withdraw(&self) -> Result<(), TonContractError> {
        self.send_body(&WithdrawMessage::new(), &MINTER_REQUEST_VALUE)
            .await
    }

    /// Buys jettons for `value` TON.
    async fn send_buy(&self, value: &BigUint) -> Result<(), TonContractError> {
        self.send_body(&BuyMessage::new(), value).await
    }
}

impl<T> JettonMinterContract for T where T: TonContractInterface {}
