pub mod cell;
pub mod keys;
pub mod message;
pub mod minter;
pub mod mnemonic;
pub mod types;

pub use crate::types::{
    from_nano, to_nano, AddressFlags, NanoParseError, TonAddress, TonAddressParseError, TonHash,
    TonTxId, TransactionIdParseError,
};
