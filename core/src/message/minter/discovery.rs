use super::MINTER_PROVIDE_WALLET_ADDRESS;
use crate::cell::{Cell, CellBuilder};
use crate::message::{load_header, HasOpcode, TonMessage, TonMessageError};
use crate::TonAddress;

/// Asks the minter for the wallet address of `owner` (TEP-89 discovery):
///
/// ```raw
/// provide_wallet_address#2c76b973 query_id:uint64 owner_address:MsgAddress
///                                 include_address:Bool = InternalMsgBody;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ProvideWalletAddressMessage {
    pub query_id: u64,
    pub owner: TonAddress,
    /// the reply should also carry `owner` itself.
    pub include_address: bool,
}

impl ProvideWalletAddressMessage {
    pub fn new(owner: &TonAddress, include_address: bool) -> Self {
        ProvideWalletAddressMessage {
            query_id: 0,
            owner: owner.clone(),
            include_address,
        }
    }
}

impl TonMessage for ProvideWalletAddressMessage {
    fn build(&self) -> Result<Cell, TonMessageError> {
        let mut builder = CellBuilder::new();
        builder
            .store_u32(32, Self::opcode())?
            .store_u64(64, self.query_id)?
            .store_address(&self.owner)?
            .store_bit(self.include_address)?;
        Ok(builder.build()?)
    }

    fn parse(cell: &Cell) -> Result<Self, TonMessageError> {
        let mut parser = cell.parser();
        let (opcode, query_id) = load_header(&mut parser)?;
        let owner = parser.load_address()?;
        let include_address = parser.load_bit()?;
        parser.ensure_empty()?;

        let result = ProvideWalletAddressMessage {
            query_id,
            owner,
            include_address,
        };
        result.verify_opcode(opcode)?;
        Ok(result)
    }
}

impl HasOpcode for ProvideWalletAddressMessage {
    fn set_query_id(&mut self, query_id: u64) {
        self.query_id = query_id;
    }

    fn query_id(&self) -> u64 {
        self.query_id
    }

    fn opcode() -> u32 {
        MINTER_PROVIDE_WALLET_ADDRESS
    }
}

#[cfg(test)]
mod tests {
    use crate::message::{ProvideWalletAddressMessage, TonMessage, TonMessageError};
    use crate::TonAddress;

    #[test]
    fn discovery_layout() -> Result<(), TonMessageError> {
        let owner = TonAddress::new(0, &[5; 32]);
        let cell = ProvideWalletAddressMessage::new(&owner, true).build()?;
        assert_eq!(cell.bit_len(), 32 + 64 + 267 + 1);
        assert_eq!(&cell.data()[..4], [0x2c, 0x76, 0xb9, 0x73]);
        // include_address is the last bit
        assert_eq!(cell.data()[45] & 0b0001_0000, 0b0001_0000);

        let parsed = ProvideWalletAddressMessage::parse(&cell)?;
        assert_eq!(parsed.owner, owner);
        assert!(parsed.include_address);

        let cell = ProvideWalletAddressMessage::new(&owner, false).build()?;
        assert!(!ProvideWalletAddressMessage::parse(&cell)?.include_address);
        Ok(())
    }
}
