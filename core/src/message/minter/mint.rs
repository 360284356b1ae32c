use num_bigint::BigUint;

use super::{JettonInternalTransferMessage, MINTER_MINT};
use crate::cell::{Cell, CellBuilder};
use crate::message::{load_header, HasOpcode, TonMessage, TonMessageError};
use crate::TonAddress;

/// Admin request to mint jettons, the minter forwards `master_msg` to the recipient's wallet:
///
/// ```raw
/// mint#00000015 query_id:uint64 to_address:MsgAddress total_ton_amount:(VarUInteger 16)
///               jetton_amount:(VarUInteger 16) master_msg:^InternalTransfer
///               = InternalMsgBody;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MintMessage {
    pub query_id: u64,
    /// owner of the wallet that receives minted jettons.
    pub to: TonAddress,
    /// TON attached to the message sent to the recipient's wallet.
    pub total_ton_amount: BigUint,
    pub jetton_amount: BigUint,
    pub master_msg: JettonInternalTransferMessage,
}

impl MintMessage {
    /// Mint request as issued by the admin of `minter`.
    ///
    /// Fails when `total_ton_amount` does not exceed `forward_ton_amount`,
    /// the difference pays for the recipient wallet's storage and gas.
    pub fn new(
        minter: &TonAddress,
        to: &TonAddress,
        jetton_amount: &BigUint,
        forward_ton_amount: &BigUint,
        total_ton_amount: &BigUint,
    ) -> Result<Self, TonMessageError> {
        validate_amounts(total_ton_amount, forward_ton_amount)?;
        let mut master_msg = JettonInternalTransferMessage::new(jetton_amount, minter);
        master_msg.with_forward_ton_amount(forward_ton_amount);
        Ok(MintMessage {
            query_id: 0,
            to: to.clone(),
            total_ton_amount: total_ton_amount.clone(),
            jetton_amount: jetton_amount.clone(),
            master_msg,
        })
    }
}

fn validate_amounts(
    total_ton_amount: &BigUint,
    forward_ton_amount: &BigUint,
) -> Result<(), TonMessageError> {
    if total_ton_amount <= forward_ton_amount {
        return Err(TonMessageError::InvalidArgument(format!(
            "Total ton amount should be > forward amount ({} <= {})",
            total_ton_amount, forward_ton_amount
        )));
    }
    Ok(())
}

impl TonMessage for MintMessage {
    fn build(&self) -> Result<Cell, TonMessageError> {
        validate_amounts(&self.total_ton_amount, &self.master_msg.forward_ton_amount)?;
        let master_msg = self.master_msg.build()?;

        let mut builder = CellBuilder::new();
        builder
            .store_u32(32, Self::opcode())?
            .store_u64(64, self.query_id)?
            .store_address(&self.to)?
            .store_coins(&self.total_ton_amount)?
            .store_coins(&self.jetton_amount)?
            .store_child(master_msg)?;
        Ok(builder.build()?)
    }

    fn parse(cell: &Cell) -> Result<Self, TonMessageError> {
        let mut parser = cell.parser();
        let (opcode, query_id) = load_header(&mut parser)?;
        let to = parser.load_address()?;
        let total_ton_amount = parser.load_coins()?;
        let jetton_amount = parser.load_coins()?;
        let master_cell = parser.next_reference()?;
        let master_msg = JettonInternalTransferMessage::parse(&master_cell)?;
        parser.ensure_empty()?;

        let result = MintMessage {
            query_id,
            to,
            total_ton_amount,
            jetton_amount,
            master_msg,
        };
        result.verify_opcode(opcode)?;
        Ok(result)
    }
}

impl HasOpcode for MintMessage {
    fn set_query_id(&mut self, query_id: u64) {
        self.query_id = query_id;
    }

    fn query_id(&self) -> u64 {
        self.query_id
    }

    fn opcode() -> u32 {
        MINTER_MINT
    }
}
