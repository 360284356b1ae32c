use crate::cell::{Cell, CellBuilder, TonCellError};

/// Layout tag of the jetton metadata cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum JettonContentType {
    Onchain = 0,
    Offchain = 1,
}

impl TryFrom<u8> for JettonContentType {
    type Error = TonCellError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(JettonContentType::Onchain),
            1 => Ok(JettonContentType::Offchain),
            _ => Err(TonCellError::cell_parser_error(format!(
                "Unknown jetton content type: {}",
                tag
            ))),
        }
    }
}

/// Jetton metadata: an 8-bit type tag followed by the uri as a snake string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JettonMinterContent {
    pub content_type: JettonContentType,
    pub uri: String,
}

impl JettonMinterContent {
    pub fn offchain(uri: &str) -> JettonMinterContent {
        JettonMinterContent {
            content_type: JettonContentType::Offchain,
            uri: uri.to_string(),
        }
    }

    pub fn to_cell(&self) -> Result<Cell, TonCellError> {
        CellBuilder::new()
            .store_u8(8, self.content_type as u8)?
            .store_snake_string(&self.uri)?
            .build()
    }

    pub fn from_cell(cell: &Cell) -> Result<JettonMinterContent, TonCellError> {
        let mut parser = cell.parser();
        let content_type = JettonContentType::try_from(parser.load_u8(8)?)?;
        let uri = parser.load_snake_string()?;
        Ok(JettonMinterContent { content_type, uri })
    }
}
