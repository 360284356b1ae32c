use super::MINTER_CHANGE_ADMIN;
use crate::cell::{Cell, CellBuilder};
use crate::message::{load_header, HasOpcode, TonMessage, TonMessageError};
use crate::TonAddress;

/// Transfers minter administration:
///
/// ```raw
/// change_admin#4840664f query_id:uint64 new_admin_address:MsgAddress = InternalMsgBody;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeAdminMessage {
    pub query_id: u64,
    pub new_admin: TonAddress,
}

impl ChangeAdminMessage {
    pub fn new(new_admin: &TonAddress) -> Self {
        ChangeAdminMessage {
            query_id: 0,
            new_admin: new_admin.clone(),
        }
    }
}

impl TonMessage for ChangeAdminMessage {
    fn build(&self) -> Result<Cell, TonMessageError> {
        let mut builder = CellBuilder::new();
        builder
            .store_u32(32, Self::opcode())?
            .store_u64(64, self.query_id)?
            .store_address(&self.new_admin)?;
        Ok(builder.build()?)
    }

    fn parse(cell: &Cell) -> Result<Self, TonMessageError> {
        let mut parser = cell.parser();
        let (opcode, query_id) = load_header(&mut parser)?;
        let new_admin = parser.load_address()?;
        parser.ensure_empty()?;

        let result = ChangeAdminMessage {
            query_id,
            new_admin,
        };
        result.verify_opcode(opcode)?;
        Ok(result)
    }
}

impl HasOpcode for ChangeAdminMessage {
    fn set_query_id(&mut self, query_id: u64) {
        self.query_id = query_id;
    }

    fn query_id(&self) -> u64 {
        self.query_id
    }

    fn opcode() -> u32 {
        MINTER_CHANGE_ADMIN
    }
}
