use std::sync::Arc;

use jetton_minter_core::message::{PermitMessage, PermitPayload};
use jetton_minter_core::{from_nano, TonAddress};
use lazy_static::lazy_static;
use num_bigint::BigUint;

use super::{
    choose_action, last_transaction_lt, open_deployed_contract, report_action_error,
    ActionOutcome, ConsoleError, PermitAction, FAILED_TRANSACTION_MESSAGE,
};
use crate::config::{ConsoleConfig, PermitConfig};
use crate::contract::{JettonWalletContract, TonContract, TonContractInterface};
use crate::provider::ChainProvider;
use crate::transactions::{wait_for_transaction, PollSettings};
use crate::ui::{confirm, prompt_amount, UiProvider};

lazy_static! {
    pub static ref PERMIT_VALUE: BigUint = BigUint::from(1_000_000_000u64);
    pub static ref PERMIT_FORWARD_TON_AMOUNT: BigUint = BigUint::from(1u32);
}

/// Opened jetton wallet and the key that signs its permits.
pub struct PermitSession {
    provider: Arc<dyn ChainProvider>,
    ui: Arc<dyn UiProvider>,
    wallet: TonContract,
    config: PermitConfig,
    settings: PollSettings,
}

impl PermitSession {
    pub fn new(
        provider: Arc<dyn ChainProvider>,
        ui: Arc<dyn UiProvider>,
        wallet_address: &TonAddress,
        config: PermitConfig,
        settings: PollSettings,
    ) -> PermitSession {
        let wallet = TonContract::new(&provider, wallet_address);
        PermitSession {
            provider,
            ui,
            wallet,
            config,
            settings,
        }
    }

    /// Signs a permit for the prompted amount to this wallet and sends it.
    pub async fn permit(&self) -> Result<ActionOutcome, ConsoleError> {
        let ui = self.ui.as_ref();
        let wallet_address = self.wallet.address();
        let amount = loop {
            let amount = prompt_amount(ui, "Please provide permit amount in decimal form:").await?;
            ui.write(&format!(
                "Permit {} tokens to {}\n",
                from_nano(&amount),
                wallet_address
            ));
            if confirm(ui).await? {
                break amount;
            }
        };

        let last_lt = last_transaction_lt(&self.wallet).await?;
        let payload = PermitPayload {
            amount,
            destination: wallet_address.clone(),
            forward_ton_amount: PERMIT_FORWARD_TON_AMOUNT.clone(),
            response_address: self.config.treasury.clone(),
        };
        let permit = PermitMessage::new(payload, &self.config.key_pair)?;
        self.wallet.send_permit(&permit, &PERMIT_VALUE).await?;

        let observed = wait_for_transaction(
            self.provider.as_ref(),
            wallet_address,
            last_lt,
            &self.settings,
        )
        .await;
        if observed {
            ui.write("Permit processed\n");
            Ok(ActionOutcome::Sent)
        } else {
            ui.write(FAILED_TRANSACTION_MESSAGE);
            Ok(ActionOutcome::TransactionNotObserved)
        }
    }
}

/// Permit console: opens a deployed jetton wallet and sends permits until `Quit`.
pub async fn run_permit_console(
    provider: Arc<dyn ChainProvider>,
    ui: Arc<dyn UiProvider>,
    config: PermitConfig,
    console: &ConsoleConfig,
) -> Result<(), ConsoleError> {
    let address = open_deployed_contract(
        provider.as_ref(),
        ui.as_ref(),
        "Please enter jetton-wallet address:",
        config.wallet_code.as_ref(),
    )
    .await?;
    log::info!("Opened jetton wallet {}", address);

    let session = PermitSession::new(
        provider,
        ui.clone(),
        &address,
        config,
        console.poll_settings(),
    );
    let actions = [PermitAction::Permit, PermitAction::Quit];
    loop {
        match choose_action(ui.as_ref(), "Pick action:", &actions).await? {
            PermitAction::Permit => match session.permit().await {
                Ok(outcome) => log::info!("Permit finished with {:?}", outcome),
                Err(err) => report_action_error(ui.as_ref(), PermitAction::Permit.into(), err)?,
            },
            PermitAction::Quit => break,
        }
    }
    Ok(())
}
