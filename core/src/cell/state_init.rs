use crate::cell::{ArcCell, Cell, CellBuilder, TonCellError};
use crate::TonHash;

/// `StateInit` with code and data only: no split depth, no special flags, no libraries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateInit {
    pub code: Option<ArcCell>,
    pub data: Option<ArcCell>,
}

impl StateInit {
    pub fn new(code: &ArcCell, data: &ArcCell) -> StateInit {
        StateInit {
            code: Some(code.clone()),
            data: Some(data.clone()),
        }
    }

    pub fn build(&self) -> Result<Cell, TonCellError> {
        let mut builder = CellBuilder::new();
        builder
            .store_bit(false)? // split_depth
            .store_bit(false)? // special
            .store_bit(self.code.is_some())?
            .store_bit(self.data.is_some())?
            .store_bit(false)?; // library
        if let Some(code) = &self.code {
            builder.store_reference(code)?;
        }
        if let Some(data) = &self.data {
            builder.store_reference(data)?;
        }
        builder.build()
    }

    pub fn parse(cell: &Cell) -> Result<StateInit, TonCellError> {
        cell.parse_fully(|parser| {
            if parser.load_bit()? || parser.load_bit()? {
                return Err(TonCellError::cell_parser_error(
                    "StateInit with split_depth or special flags is not supported",
                ));
            }
            let has_code = parser.load_bit()?;
            let has_data = parser.load_bit()?;
            if parser.load_bit()? {
                return Err(TonCellError::cell_parser_error(
                    "StateInit with libraries is not supported",
                ));
            }
            let code = has_code.then(|| parser.next_reference()).transpose()?;
            let data = has_data.then(|| parser.next_reference()).transpose()?;
            Ok(StateInit { code, data })
        })
    }

    /// Account id of the contract deployed with this code and data.
    pub fn create_account_id(code: &ArcCell, data: &ArcCell) -> Result<TonHash, TonCellError> {
        Ok(Self::new(code, data).build()?.cell_hash())
    }
}

#[cfg(test)]
mod tests {
    use crate::cell::{CellBuilder, StateInit, TonCellError};

    #[test]
    fn layout() -> Result<(), TonCellError> {
        let code = CellBuilder::new().store_u8(8, 1)?.build()?.to_arc();
        let data = CellBuilder::new().store_u8(8, 2)?.build()?.to_arc();
        let cell = StateInit::new(&code, &data).build()?;
        assert_eq!(cell.bit_len(), 5);
        assert_eq!(cell.data(), [0b0011_0000]);
        assert_eq!(cell.reference(0)?, &code);
        assert_eq!(cell.reference(1)?, &data);
        assert_eq!(
            StateInit::create_account_id(&code, &data)?,
            cell.cell_hash()
        );
        assert_eq!(StateInit::parse(&cell)?, StateInit::new(&code, &data));
        Ok(())
    }

    #[test]
    fn account_id_depends_on_data() -> Result<(), TonCellError> {
        let code = CellBuilder::new().store_u8(8, 1)?.build()?.to_arc();
        let data_a = CellBuilder::new().store_u8(8, 2)?.build()?.to_arc();
        let data_b = CellBuilder::new().store_u8(8, 3)?.build()?.to_arc();
        assert_ne!(
            StateInit::create_account_id(&code, &data_a)?,
            StateInit::create_account_id(&code, &data_b)?
        );
        Ok(())
    }
}
