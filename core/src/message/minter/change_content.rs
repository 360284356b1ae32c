use super::MINTER_CHANGE_CONTENT;
use crate::cell::{ArcCell, Cell, CellBuilder};
use crate::message::{load_header, HasOpcode, TonMessage, TonMessageError};

/// Replaces the jetton metadata cell kept by the minter:
///
/// ```raw
/// change_content#11067aba query_id:uint64 new_content:^Cell = InternalMsgBody;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeContentMessage {
    pub query_id: u64,
    pub content: ArcCell,
}

impl ChangeContentMessage {
    pub fn new(content: &ArcCell) -> Self {
        ChangeContentMessage {
            query_id: 0,
            content: content.clone(),
        }
    }
}

impl TonMessage for ChangeContentMessage {
    fn build(&self) -> Result<Cell, TonMessageError> {
        let mut builder = CellBuilder::new();
        builder
            .store_u32(32, Self::opcode())?
            .store_u64(64, self.query_id)?
            .store_reference(&self.content)?;
        Ok(builder.build()?)
    }

    fn parse(cell: &Cell) -> Result<Self, TonMessageError> {
        let mut parser = cell.parser();
        let (opcode, query_id) = load_header(&mut parser)?;
        let content = parser.next_reference()?;
        parser.ensure_empty()?;

        let result = ChangeContentMessage { query_id, content };
        result.verify_opcode(opcode)?;
        Ok(result)
    }
}

impl HasOpcode for ChangeContentMessage {
    fn set_query_id(&mut self, query_id: u64) {
        self.query_id = query_id;
    }

    fn query_id(&self) -> u64 {
        self.query_id
    }

    fn opcode() -> u32 {
        MINTER_CHANGE_CONTENT
    }
}
