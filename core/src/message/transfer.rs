use std::sync::Arc;

use super::{InternalMessage, InvalidMessage, TonMessage, TonMessageError};
use crate::cell::{ArcCell, Cell, CellBuilder};

/// Internal message with optional `StateInit` and body, both stored as references.
#[derive(Clone, Debug, PartialEq)]
pub struct TransferMessage {
    pub info: InternalMessage,
    pub state_init: Option<ArcCell>,
    pub data: Option<ArcCell>,
}

impl TransferMessage {
    pub fn new(info: InternalMessage) -> Self {
        TransferMessage {
            info,
            state_init: None,
            data: None,
        }
    }

    pub fn with_state_init(&mut self, state_init: Cell) -> &mut Self {
        self.with_state_init_ref(&Arc::new(state_init))
    }

    pub fn with_state_init_ref(&mut self, state_init: &ArcCell) -> &mut Self {
        self.state_init = Some(state_init.clone());
        self
    }

    pub fn with_data(&mut self, data: ArcCell) -> &mut Self {
        self.data = Some(data);
        self
    }
}

impl TonMessage for TransferMessage {
    fn build(&self) -> Result<Cell, TonMessageError> {
        let info = &self.info;
        let mut builder = CellBuilder::new();
        builder
            .store_bit(false)? // int_msg_info$0
            .store_bit(info.ihr_disabled)?
            .store_bit(info.bounce)?
            .store_bit(info.bounced)?
            .store_maybe_address(info.src.as_ref())?
            .store_address(&info.dest)?
            .store_coins(&info.value)?
            .store_bit(false)? // empty extra currencies dictionary
            .store_coins(&info.ihr_fee)?
            .store_coins(&info.fwd_fee)?
            .store_u64(64, info.created_lt)?
            .store_u32(32, info.created_at)?;
        // state_init and body are always stored as references: Maybe (Either _ ^_)
        store_maybe_ref_either(&mut builder, &self.state_init)?;
        store_maybe_ref_either(&mut builder, &self.data)?;
        Ok(builder.build()?)
    }

    fn parse(cell: &Cell) -> Result<Self, TonMessageError> {
        let mut parser = cell.parser();
        if parser.load_bit()? {
            return Err(TonMessageError::InvalidMessage(InvalidMessage {
                opcode: None,
                query_id: None,
                message: "External message where internal one expected".to_string(),
            }));
        }
        let ihr_disabled = parser.load_bit()?;
        let bounce = parser.load_bit()?;
        let bounced = parser.load_bit()?;
        let src = parser.load_maybe_address()?;
        let dest = parser.load_address()?;
        let value = parser.load_coins()?;
        if parser.load_bit()? {
            return Err(TonMessageError::InvalidMessage(InvalidMessage {
                opcode: None,
                query_id: None,
                message: "Extra currencies are not supported".to_string(),
            }));
        }
        let ihr_fee = parser.load_coins()?;
        let fwd_fee = parser.load_coins()?;
        let created_lt = parser.load_u64(64)?;
        let created_at = parser.load_u32(32)?;

        let state_init = load_maybe_ref_either(&mut parser)?;
        let data = load_maybe_ref_either(&mut parser)?;
        parser.ensure_empty()?;

        Ok(TransferMessage {
            info: InternalMessage {
                ihr_disabled,
                bounce,
                bounced,
                src,
                dest,
                value,
                ihr_fee,
                fwd_fee,
                created_lt,
                created_at,
            },
            state_init,
            data,
        })
    }
}

fn store_maybe_ref_either(
    builder: &mut CellBuilder,
    cell: &Option<ArcCell>,
) -> Result<(), TonMessageError> {
    match cell {
        Some(cell) => {
            builder.store_bit(true)?.store_bit(true)?.store_reference(cell)?;
        }
        None => {
            builder.store_bit(false)?;
        }
    }
    Ok(())
}

fn load_maybe_ref_either(
    parser: &mut crate::cell::CellParser,
) -> Result<Option<ArcCell>, TonMessageError> {
    if !parser.load_bit()? {
        return Ok(None);
    }
    if !parser.load_bit()? {
        return Err(TonMessageError::InvalidMessage(InvalidMessage {
            opcode: None,
            query_id: None,
            message: "Inline state init or body is not supported".to_string(),
        }));
    }
    Ok(Some(parser.next_reference()?))
}
