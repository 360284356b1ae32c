use super::MINTER_BUY;
use crate::cell::{Cell, CellBuilder};
use crate::message::{load_header, HasOpcode, TonMessage, TonMessageError};

/// Buys jettons for the attached TON:
///
/// ```raw
/// buy#402eff0b query_id:uint64 = InternalMsgBody;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BuyMessage {
    pub query_id: u64,
}

#[allow(clippy::new_without_default)]
impl BuyMessage {
    pub fn new() -> Self {
        BuyMessage { query_id: 0 }
    }
}

impl TonMessage for BuyMessage {
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

        let result = BuyMessage { query_id };
        result.verify_opcode(opcode)?;
        Ok(result)
    }
}

impl HasOpcode for BuyMessage {
    fn set_query_id(&mut self, query_id: u64) {
        self.query_id = query_id;
    }

    fn query_id(&self) -> u64 {
        self.query_id
    }

    fn opcode() -> u32 {
        MINTER_BUY
    }
}

#[cfg(test)]
mod tests {
    use crate::message::{BuyMessage, HasOpcode, TonMessage, TonMessageError, WithdrawMessage};

    #[test]
    fn query_only_bodies() -> Result<(), TonMessageError> {
        let withdraw = WithdrawMessage::new().build()?;
        assert_eq!(hex::encode(withdraw.data()), "46ed2e940000000000000000");
        let buy = BuyMessage::new().with_query_id(0x0102).build()?;
        assert_eq!(hex::encode(buy.data()), "402eff0b0000000000000102");

        assert_eq!(BuyMessage::parse(&buy)?.query_id, 0x0102);
        assert!(BuyMessage::parse(&withdraw).is_err());
        assert!(WithdrawMessage::parse(&buy).is_err());
        Ok(())
    }
}
