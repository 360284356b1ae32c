use super::MINTER_WITHDRAW;
use crate::cell::{Cell, CellBuilder};
use crate::message::{load_header, HasOpcode, TonMessage, TonMessageError};

/// Withdraws accumulated TON from the minter to its admin:
///
/// ```raw
/// withdraw#46ed2e94 query_id:uint64 = InternalMsgBody;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WithdrawMessage {
    pub query_id: u64,
}

#[allow(clippy::new_without_default)]
impl WithdrawMessage {
    pub fn new() -> Self {
        WithdrawMessage { query_id: 0 }
    }
}

impl TonMessage for WithdrawMessage {
    fn build(&self) -> Result<Cell, TonMessageError> {
        let mut builder = CellBuilder::new();
        builder.store_u32(32, Self::opcode())?;
        builder.store_u64(64, self.query_id)?;

        Ok(builder.build()?)
    }

    fn parse(cell: &Cell) -> Result<Self, TonMessageError> {
        let mut parser = cell.parser();
        let (opcode, query_id) = load_header(&mut parser)?;
        parser.ensure_empty()?;

        let result = WithdrawMessage { query_id };
        result.verify_opcode(opcode)?;
        Ok(result)
    }
}

impl HasOpcode for WithdrawMessage {
    fn set_query_id(&mut self, query_id: u64) {
        self.query_id = query_id;
    }

    fn query_id(&self) -> u64 {
        self.query_id
    }

    fn opcode() -> u32 {
        MINTER_WITHDRAW
    }
}
