use num_bigint::BigUint;

use super::JETTON_INTERNAL_TRANSFER;
use crate::cell::{ArcCell, Cell, CellBuilder};
use crate::message::{load_header, HasOpcode, TonMessage, TonMessageError};
use crate::TonAddress;

/// Jetton wallet-to-wallet transfer body, also used by the minter to credit minted jettons:
///
/// ```raw
/// internal_transfer#178d4519 query_id:uint64 amount:(VarUInteger 16) from:MsgAddress
///                            response_address:MsgAddress forward_ton_amount:(VarUInteger 16)
///                            forward_payload:(Either Cell ^Cell)
///                            = InternalMsgBody;
/// ```
///
/// `forward_payload` is either empty (bit 0) or stored by reference (bit 1).
/// `from` is `addr_none` when the minter credits freshly minted jettons.
#[derive(Clone, Debug, PartialEq)]
pub struct JettonInternalTransferMessage {
    pub query_id: u64,
    pub amount: BigUint,
    pub from: Option<TonAddress>,
    pub response_address: TonAddress,
    pub forward_ton_amount: BigUint,
    pub forward_payload: Option<ArcCell>,
}

impl JettonInternalTransferMessage {
    pub fn new(amount: &BigUint, response_address: &TonAddress) -> Self {
        JettonInternalTransferMessage {
            query_id: 0,
            amount: amount.clone(),
            from: None,
            response_address: response_address.clone(),
            forward_ton_amount: BigUint::default(),
            forward_payload: None,
        }
    }

    pub fn with_forward_ton_amount(&mut self, forward_ton_amount: &BigUint) -> &mut Self {
        self.forward_ton_amount = forward_ton_amount.clone();
        self
    }
}

impl TonMessage for JettonInternalTransferMessage {
    fn build(&self) -> Result<Cell, TonMessageError> {
        let mut builder = CellBuilder::new();
        builder
            .store_u32(32, Self::opcode())?
            .store_u64(64, self.query_id)?
            .store_coins(&self.amount)?
            .store_maybe_address(self.from.as_ref())?
            .store_address(&self.response_address)?
            .store_coins(&self.forward_ton_amount)?
            .store_maybe_cell_ref(&self.forward_payload)?;
        Ok(builder.build()?)
    }

    fn parse(cell: &Cell) -> Result<Self, TonMessageError> {
        let mut parser = cell.parser();
        let (opcode, query_id) = load_header(&mut parser)?;
        let amount = parser.load_coins()?;
        let from = parser.load_maybe_address()?;
        let response_address = parser.load_address()?;
        let forward_ton_amount = parser.load_coins()?;
        let forward_payload = parser.load_maybe_cell_ref()?;
        parser.ensure_empty()?;

        let result = JettonInternalTransferMessage {
            query_id,
            amount,
            from,
            response_address,
            forward_ton_amount,
            forward_payload,
        };
        result.verify_opcode(opcode)?;
        Ok(result)
    }
}

impl HasOpcode for JettonInternalTransferMessage {
    fn set_query_id(&mut self, query_id: u64) {
        self.query_id = query_id;
    }

    fn query_id(&self) -> u64 {
        self.query_id
    }

    fn opcode() -> u32 {
        JETTON_INTERNAL_TRANSFER
    }
}
