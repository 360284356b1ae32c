use std::sync::Arc;

use jetton_minter_core::minter::{JettonMinter, JettonMinterConfig, JettonMinterContent};
use lazy_static::lazy_static;
use num_bigint::BigUint;

use super::ConsoleError;
use crate::config::{ConsoleConfig, DeployConfig};
use crate::contract::{JettonMinterContract, TonContract};
use crate::provider::ChainProvider;
use crate::transactions::wait_for_deploy;

lazy_static! {
    pub static ref DEPLOY_VALUE: BigUint = BigUint::from(50_000_000u64);
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeployReport {
    pub minter: JettonMinter,
    pub deployed: bool,
    /// Read after a successful deploy.
    pub total_supply: Option<BigUint>,
}

/// Deploys a minter with offchain content `config.content_uri` and waits for it to become active.
pub async fn deploy_jetton(
    provider: Arc<dyn ChainProvider>,
    config: &DeployConfig,
    console: &ConsoleConfig,
) -> Result<DeployReport, ConsoleError> {
    let minter_config = JettonMinterConfig {
        admin: config.admin.clone(),
        content: JettonMinterContent::offchain(&config.content_uri)
            .to_cell()?
            .to_arc(),
        wallet_code: config.wallet_code.clone(),
        public_key: config.public_key.clone(),
    };
    let minter =
        JettonMinter::create_from_config(&minter_config, &config.minter_code, console.workchain)?;
    let state_init = minter
        .init
        .as_ref()
        .ok_or_else(|| ConsoleError::MissingStateInit(minter.address.clone()))?;

    log::info!("Deploying jetton minter {}", minter.address);
    let contract = TonContract::new(&provider, &minter.address);
    contract.send_deploy(state_init, &DEPLOY_VALUE).await?;

    let deployed = wait_for_deploy(
        provider.as_ref(),
        &minter.address,
        &console.poll_settings(),
    )
    .await;
    let total_supply = if deployed {
        let total_supply = contract.get_total_supply().await?;
        log::info!("getTotalSupply {}", total_supply);
        Some(total_supply)
    } else {
        None
    };

    Ok(DeployReport {
        minter,
        deployed,
        total_supply,
    })
}
