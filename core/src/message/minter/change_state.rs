use super::MINTER_CHANGE_STATE;
use crate::cell::{Cell, CellBuilder};
use crate::message::{load_header, HasOpcode, TonMessage, TonMessageError};

/// Switches the minter's state flag:
///
/// ```raw
/// change_state#58ca5361 query_id:uint64 state:Bool = InternalMsgBody;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeStateMessage {
    pub query_id: u64,
    pub state: bool,
}

impl ChangeStateMessage {
    pub fn new(state: bool) -> Self {
        ChangeStateMessage { query_id: 0, state }
    }
}

impl TonMessage for ChangeStateMessage {
    fn build(&self) -> Result<Cell, TonMessageError> {
        let mut builder = CellBuilder::new();
        builder
            .store_u32(32, Self::opcode())?
            .store_u64(64, self.query_id)?
            .store_bit(self.state)?;
        Ok(builder.build()?)
    }

    fn parse(cell: &Cell) -> Result<Self, TonMessageError> {
        let mut parser = cell.parser();
        let (opcode, query_id) = load_header(&mut parser)?;
        let state = parser.load_bit()?;
        parser.ensure_empty()?;

        let result = ChangeStateMessage { query_id, state };
        result.verify_opcode(opcode)?;
        Ok(result)
    }
}

impl HasOpcode for ChangeStateMessage {
    fn set_query_id(&mut self, query_id: u64) {
        self.query_id = query_id;
    }

    fn query_id(&self) -> u64 {
        self.query_id
    }

    fn opcode() -> u32 {
        MINTER_CHANGE_STATE
    }
}

#[cfg(test)]
mod tests {
    use crate::message::{ChangeStateMessage, TonMessage, TonMessageError};

    #[test]
    fn change_state_layout() -> Result<(), TonMessageError> {
        let cell = ChangeStateMessage::new(true).build()?;
        assert_eq!(cell.bit_len(), 97);
        assert_eq!(
            cell.data(),
            [0x58, 0xca, 0x53, 0x61, 0, 0, 0, 0, 0, 0, 0, 0, 0b1000_0000]
        );
        assert!(ChangeStateMessage::parse(&cell)?.state);
        assert!(!ChangeStateMessage::parse(&ChangeStateMessage::new(false).build()?)?.state);
        Ok(())
    }
}
