use num_bigint::BigUint;

use crate::cell::{ArcCell, Cell, CellBuilder, TonCellError};
use crate::TonAddress;

/// Initial persistent data of a jetton minter.
#[derive(Clone, Debug, PartialEq)]
pub struct JettonMinterConfig {
    pub admin: TonAddress,
    /// metadata cell, see [`super::JettonMinterContent`].
    pub content: ArcCell,
    pub wallet_code: ArcCell,
    /// Ed25519 public key checked by wallets on permits.
    pub public_key: BigUint,
}

impl JettonMinterConfig {
    /// `total_supply:Coins admin:MsgAddress public_key:uint256 content:^Cell wallet_code:^Cell`,
    /// total supply starts at zero.
    pub fn to_cell(&self) -> Result<Cell, TonCellError> {
        CellBuilder::new()
            .store_coins(&BigUint::default())?
            .store_address(&self.admin)?
            .store_uint(256, &self.public_key)?
            .store_reference(&self.content)?
            .store_reference(&self.wallet_code)?
            .build()
    }
}
