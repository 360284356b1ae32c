use num_bigint::BigUint;

use super::ZERO_COINS;
use crate::TonAddress;

/// `int_msg_info$0` header of an internal message.
#[derive(Clone, Debug, PartialEq)]
pub struct InternalMessage {
    /// Hyper cube routing flag.
    pub ihr_disabled: bool,
    /// Message should be bounced back to the sender if processing fails.
    pub bounce: bool,
    /// Message itself is a result of a bounce.
    pub bounced: bool,
    /// Sender; `addr_none` from wallets, filled in by validators.
    pub src: Option<TonAddress>,
    pub dest: TonAddress,
    /// Funds attached to the message, nanotons.
    pub value: BigUint,
    pub ihr_fee: BigUint,
    pub fwd_fee: BigUint,
    pub created_lt: u64,
    pub created_at: u32,
}

impl InternalMessage {
    /// Bounceable message as a wallet would emit it: source, fees and timestamps left for validators.
    pub fn new(dest: &TonAddress, value: &BigUint) -> Self {
        InternalMessage {
            ihr_disabled: true,
            bounce: true,
            bounced: false,
            src: None,
            dest: dest.clone(),
            value: value.clone(),
            ihr_fee: ZERO_COINS.clone(),
            fwd_fee: ZERO_COINS.clone(),
            created_lt: 0,
            created_at: 0,
        }
    }

    pub fn with_bounce(&mut self, bounce: bool) -> &mut Self {
        self.bounce = bounce;
        self
    }
}
