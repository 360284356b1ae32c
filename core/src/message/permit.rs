use num_bigint::BigUint;

use crate::cell::{Cell, CellBuilder, CellParser};
use crate::keys::{KeyPair, SIGNATURE_LEN};
use crate::message::{load_header, HasOpcode, InvalidMessage, TonMessage, TonMessageError};
use crate::{TonAddress, TonHash};

// crc32('permit query_id:uint64 signature:bits512 payload:^PermitPayload = InternalMsgBody') = 0x6eab7fa0
pub const JETTON_WALLET_PERMIT: u32 = 0x6eab7fa0;

/// Signed part of a permit:
///
/// ```raw
/// permit_payload$_ amount:(VarUInteger 16) destination:MsgAddress
///                  forward_ton_amount:(VarUInteger 16) response_address:MsgAddress
///                  = PermitPayload;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PermitPayload {
    pub amount: BigUint,
    pub destination: TonAddress,
    pub forward_ton_amount: BigUint,
    pub response_address: TonAddress,
}

impl PermitPayload {
    pub fn to_cell(&self) -> Result<Cell, TonMessageError> {
        let mut builder = CellBuilder::new();
        builder
            .store_coins(&self.amount)?
            .store_address(&self.destination)?
            .store_coins(&self.forward_ton_amount)?
            .store_address(&self.response_address)?;
        Ok(builder.build()?)
    }

    fn load(parser: &mut CellParser) -> Result<PermitPayload, TonMessageError> {
        let amount = parser.load_coins()?;
        let destination = parser.load_address()?;
        let forward_ton_amount = parser.load_coins()?;
        let response_address = parser.load_address()?;
        parser.ensure_empty()?;
        Ok(PermitPayload {
            amount,
            destination,
            forward_ton_amount,
            response_address,
        })
    }
}

/// Off-chain signed permission for a jetton wallet to act on `payload`:
///
/// ```raw
/// permit#6eab7fa0 query_id:uint64 signature:bits512 payload:^PermitPayload = InternalMsgBody;
/// ```
///
/// The signature covers the representation hash of the payload cell.
#[derive(Clone, Debug, PartialEq)]
pub struct PermitMessage {
    pub query_id: u64,
    pub signature: Vec<u8>,
    pub payload: PermitPayload,
}

impl PermitMessage {
    pub fn new(payload: PermitPayload, key_pair: &KeyPair) -> Result<Self, TonMessageError> {
        let hash = payload.to_cell()?.cell_hash();
        let signature = key_pair
            .sign(&hash)
            .map_err(|err| TonMessageError::NaclCryptographicError(err.to_string()))?;
        Ok(PermitMessage {
            query_id: 0,
            signature,
            payload,
        })
    }

    pub fn signed_hash(&self) -> Result<TonHash, TonMessageError> {
        Ok(self.payload.to_cell()?.cell_hash())
    }
}

impl TonMessage for PermitMessage {
    fn build(&self) -> Result<Cell, TonMessageError> {
        if self.signature.len() != SIGNATURE_LEN {
            return Err(TonMessageError::InvalidArgument(format!(
                "Signature must be {} bytes, got {}",
                SIGNATURE_LEN,
                self.signature.len()
            )));
        }
        let mut builder = CellBuilder::new();
        builder
            .store_u32(32, Self::opcode())?
            .store_u64(64, self.query_id)?
            .store_slice(&self.signature)?
            .store_child(self.payload.to_cell()?)?;
        Ok(builder.build()?)
    }

    fn parse(cell: &Cell) -> Result<Self, TonMessageError> {
        let mut parser = cell.parser();
        let (opcode, query_id) = load_header(&mut parser)?;
        if opcode != Self::opcode() {
            return Err(TonMessageError::InvalidMessage(InvalidMessage {
                opcode: Some(opcode),
                query_id: Some(query_id),
                message: format!("Unexpected opcode.  {0:08x} expected", Self::opcode()),
            }));
        }
        let signature = parser.load_bytes(SIGNATURE_LEN)?;
        let payload_cell = parser.next_reference()?;
        parser.ensure_empty()?;
        let payload = PermitPayload::load(&mut payload_cell.parser())?;

        Ok(PermitMessage {
            query_id,
            signature,
            payload,
        })
    }
}

impl HasOpcode for PermitMessage {
    fn set_query_id(&mut self, query_id: u64) {
        self.query_id = query_id;
    }

    fn query_id(&self) -> u64 {
        self.query_id
    }

    fn opcode() -> u32 {
        JETTON_WALLET_PERMIT
    }
}
