//! Jetton minter model: initial data, metadata content and the contract handle.

mod config;
mod content;

use std::sync::Arc;

pub use config::*;
pub use content::*;

use crate::cell::{ArcCell, StateInit, TonCellError};
use crate::TonAddress;

/// Minter contract handle.
///
/// `init` is known only for minters created from a config and is attached to the deploy message.
#[derive(Clone, Debug, PartialEq)]
pub struct JettonMinter {
    pub address: TonAddress,
    pub init: Option<StateInit>,
}

impl JettonMinter {
    pub fn create_from_address(address: &TonAddress) -> JettonMinter {
        JettonMinter {
            address: address.clone(),
            init: None,
        }
    }

    pub fn create_from_config(
        config: &JettonMinterConfig,
        code: &ArcCell,
        workchain: i32,
    ) -> Result<JettonMinter, TonCellError> {
        let data = Arc::new(config.to_cell()?);
        let init = StateInit::new(code, &data);
        let address = TonAddress::from_state_init(workchain, &init)?;
        Ok(JettonMinter {
            address,
            init: Some(init),
        })
    }
}
