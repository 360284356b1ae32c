pub use minter_contract::*;
pub use wallet_contract::*;

mod minter_contract;
mod wallet_contract;
