// Operation codes understood by the jetton minter contract.
//
// crc32('internal_transfer query_id:uint64 amount:VarUInteger 16 from:MsgAddress response_address:MsgAddress forward_ton_amount:VarUInteger 16 forward_payload:Either Cell ^Cell = InternalMsgBody') = 0x978d4519 & 0x7fffffff = 0x178d4519
// crc32('provide_wallet_address query_id:uint64 owner_address:MsgAddress include_address:Bool = InternalMsgBody') = 0x2c76b973
// crc32('change_admin query_id:uint64 new_admin_address:MsgAddress = InternalMsgBody') = 0x4840664f
// crc32('withdraw query_id:uint64 = InternalMsgBody') = 0x46ed2e94
// crc32('buy query_id:uint64 = InternalMsgBody') = 0xc02eff0b & 0x7fffffff = 0x402eff0b

pub const MINTER_MINT: u32 = 21;
pub const JETTON_INTERNAL_TRANSFER: u32 = 0x178d4519;
pub const MINTER_PROVIDE_WALLET_ADDRESS: u32 = 0x2c76b973;
pub const MINTER_CHANGE_ADMIN: u32 = 0x4840664f;
pub const MINTER_CHANGE_CONTENT: u32 = 0x11067aba;
pub const MINTER_CHANGE_STATE: u32 = 0x58ca5361;
pub const MINTER_WITHDRAW: u32 = 0x46ed2e94;
pub const MINTER_BUY: u32 = 0x402eff0b;

mod buy;
mod change_admin;
mod change_content;
mod change_state;
mod discovery;
mod internal_transfer;
mod mint;
mod withdraw;

pub use buy::*;
pub use change_admin::*;
pub use change_content::*;
pub use change_state::*;
pub use discovery::*;
pub use internal_transfer::*;
pub use mint::*;
pub use withdraw::*;
