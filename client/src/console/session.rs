use std::sync::Arc;

use jetton_minter_core::minter::JettonMinterContent;
use jetton_minter_core::{from_nano, TonAddress};
use lazy_static::lazy_static;
use num_bigint::BigUint;

use super::{last_transaction_lt, ActionOutcome, ConsoleError, MinterAction, FAILED_TRANSACTION_MESSAGE};
use crate::contract::{JettonMinterContract, TonContract, TonContractInterface};
use crate::provider::ChainProvider;
use crate::transactions::{wait_for_transaction, PollSettings};
use crate::ui::{
    choose_yes, confirm, display_content_cell, prompt_address, prompt_amount, prompt_bool,
    prompt_url, UiProvider, YES_NO,
};

lazy_static! {
    pub static ref MINT_FORWARD_TON_AMOUNT: BigUint = BigUint::from(50_000_000u64);
    pub static ref MINT_TOTAL_TON_AMOUNT: BigUint = BigUint::from(100_000_000u64);
}

/// Opened minter together with the collaborators every console action needs.
pub struct MinterSession {
    provider: Arc<dyn ChainProvider>,
    ui: Arc<dyn UiProvider>,
    minter: TonContract,
    settings: PollSettings,
}

impl MinterSession {
    pub fn new(
        provider: Arc<dyn ChainProvider>,
        ui: Arc<dyn UiProvider>,
        minter_address: &TonAddress,
        settings: PollSettings,
    ) -> MinterSession {
        let minter = TonContract::new(&provider, minter_address);
        MinterSession {
            provider,
            ui,
            minter,
            settings,
        }
    }

    pub fn minter(&self) -> &TonContract {
        &self.minter
    }

    /// Actions offered to the sender: everything for the admin, read-only and buy for others.
    ///
    /// Without a sender wallet nothing can be checked and all actions are offered.
    pub async fn available_actions(&self) -> Result<Vec<MinterAction>, ConsoleError> {
        let is_admin = match self.provider.sender_address() {
            Some(sender) => self.minter.get_admin_address().await? == Some(sender),
            None => true,
        };
        let mut actions = Vec::new();
        if is_admin {
            actions.extend(MinterAction::ADMIN_ACTIONS);
            self.ui().write("Current wallet is jetton admin!\n");
        } else {
            self.ui()
                .write("Current wallet is not admin!\nAvailable actions restricted\n");
        }
        actions.extend(MinterAction::USER_ACTIONS);
        Ok(actions)
    }

    pub async fn run_action(&self, action: MinterAction) -> Result<ActionOutcome, ConsoleError> {
        match action {
            MinterAction::Mint => self.mint().await,
            MinterAction::ChangeAdmin => self.change_admin().await,
            MinterAction::ChangeContent => self.change_content().await,
            MinterAction::ChangeState => self.change_state().await,
            MinterAction::Withdraw => self.withdraw().await,
            MinterAction::Info => self.info().await,
            MinterAction::Buy => self.buy().await,
            MinterAction::Quit => Ok(ActionOutcome::NotApplied),
        }
    }

    pub async fn info(&self) -> Result<ActionOutcome, ConsoleError> {
        let ui = self.ui();
        let data = self.minter.get_jetton_data().await?;
        ui.write("Jetton info:\n\n");
        match &data.admin_address {
            Some(admin) => ui.write(&format!("Admin: {}\n", admin)),
            None => ui.write("Admin: none\n"),
        }
        ui.write(&format!("Total supply: {}\n", from_nano(&data.total_supply)));
        ui.write(&format!("Mintable: {}\n", data.mintable));
        if choose_yes(ui, "Display content?").await? {
            display_content_cell(ui, &data.content);
        }
        Ok(ActionOutcome::Applied)
    }

    pub async fn mint(&self) -> Result<ActionOutcome, ConsoleError> {
        let ui = self.ui();
        let fallback = match self.provider.sender_address() {
            Some(sender) => Some(sender),
            None => self.minter.get_admin_address().await?,
        };
        let (to, amount) = loop {
            let to =
                prompt_address(ui, "Please specify address to mint to", fallback.as_ref()).await?;
            let amount = prompt_amount(ui, "Please provide mint amount in decimal form:").await?;
            ui.write(&format!("Mint {} tokens to {}\n", from_nano(&amount), to));
            if confirm(ui).await? {
                break (to, amount);
            }
        };

        ui.write(&format!("Minting {} to {}\n", from_nano(&amount), to));
        let supply_before = self.minter.get_total_supply().await?;
        let last_lt = last_transaction_lt(&self.minter).await?;
        self.minter
            .send_mint(
                &to,
                &amount,
                &MINT_FORWARD_TON_AMOUNT,
                &MINT_TOTAL_TON_AMOUNT,
            )
            .await?;
        if !self.wait_for_minter(last_lt).await {
            return Ok(self.transaction_not_observed());
        }

        let supply_after = self.minter.get_total_supply().await?;
        if supply_after == supply_before + &amount {
            ui.write(&format!(
                "Mint successful!\nCurrent supply:{}\n",
                from_nano(&supply_after)
            ));
            Ok(ActionOutcome::Applied)
        } else {
            ui.write("Mint failed!\n");
            Ok(ActionOutcome::NotApplied)
        }
    }

    pub async fn change_admin(&self) -> Result<ActionOutcome, ConsoleError> {
        let ui = self.ui();
        let current_admin = self.minter.get_admin_address().await?;
        let new_admin = loop {
            let new_admin = prompt_address(ui, "Please specify new admin address:", None).await?;
            if current_admin.as_ref() == Some(&new_admin) {
                ui.write("Address specified matched current admin address!\nPlease pick another one.\n");
                continue;
            }
            ui.write(&format!(
                "New admin address is going to be: {}\nKindly double check it!\n",
                new_admin
            ));
            if confirm(ui).await? {
                break new_admin;
            }
        };

        let last_lt = last_transaction_lt(&self.minter).await?;
        self.minter.send_change_admin(&new_admin).await?;
        if !self.wait_for_minter(last_lt).await {
            return Ok(self.transaction_not_observed());
        }

        if self.minter.get_admin_address().await? == Some(new_admin) {
            ui.write("Admin changed successfully\n");
            Ok(ActionOutcome::Applied)
        } else {
            ui.write("Admin address hasn't changed!\nSomething went wrong!\n");
            Ok(ActionOutcome::NotApplied)
        }
    }

    pub async fn change_content(&self) -> Result<ActionOutcome, ConsoleError> {
        let ui = self.ui();
        let current_content = self.minter.get_content().await?;
        let new_content = loop {
            let uri = prompt_url(ui, "Please specify new content:").await?;
            let content = JettonMinterContent::offchain(&uri).to_cell()?.to_arc();
            if content == current_content {
                ui.write("URI specified matched current content!\nPlease pick another one.\n");
                continue;
            }
            ui.write(&format!(
                "New content is going to be: {}\nKindly double check it!\n",
                uri
            ));
            if confirm(ui).await? {
                break content;
            }
        };

        let last_lt = last_transaction_lt(&self.minter).await?;
        self.minter.send_change_content(&new_content).await?;
        if !self.wait_for_minter(last_lt).await {
            return Ok(self.transaction_not_observed());
        }

        if self.minter.get_content().await? == new_content {
            ui.write("Content changed successfully\n");
            Ok(ActionOutcome::Applied)
        } else {
            ui.write("Content hasn't changed!\nSomething went wrong!\n");
            Ok(ActionOutcome::NotApplied)
        }
    }

    /// Switches minting on or off.
    pub async fn change_state(&self) -> Result<ActionOutcome, ConsoleError> {
        let ui = self.ui();
        let mintable = self.minter.get_mintable().await?;
        ui.write(&format!("Mintable: {}\n", mintable));
        let state = prompt_bool(ui, "Should the minter be mintable?(yes/no)", YES_NO).await?;
        if state == mintable {
            ui.write("Minter is already in this state!\n");
            return Ok(ActionOutcome::NotApplied);
        }
        ui.write(&format!("Mintable is going to be: {}\n", state));
        if !confirm(ui).await? {
            return Ok(ActionOutcome::NotApplied);
        }

        let last_lt = last_transaction_lt(&self.minter).await?;
        self.minter.send_change_state(state).await?;
        if !self.wait_for_minter(last_lt).await {
            return Ok(self.transaction_not_observed());
        }

        if self.minter.get_mintable().await? == state {
            ui.write("State changed successfully\n");
            Ok(ActionOutcome::Applied)
        } else {
            ui.write("State hasn't changed!\nSomething went wrong!\n");
            Ok(ActionOutcome::NotApplied)
        }
    }

    pub async fn withdraw(&self) -> Result<ActionOutcome, ConsoleError> {
        let ui = self.ui();
        ui.write(&format!(
            "Collected TON is going to be withdrawn from {}\n",
            self.minter.address()
        ));
        if !confirm(ui).await? {
            return Ok(ActionOutcome::NotApplied);
        }

        let last_lt = last_transaction_lt(&self.minter).await?;
        self.minter.send_withdraw().await?;
        if !self.wait_for_minter(last_lt).await {
            return Ok(self.transaction_not_observed());
        }
        ui.write("Withdraw processed\n");
        Ok(ActionOutcome::Sent)
    }

    pub async fn buy(&self) -> Result<ActionOutcome, ConsoleError> {
        let ui = self.ui();
        let value = loop {
            let value = prompt_amount(ui, "Please provide TON amount to spend:").await?;
            ui.write(&format!("Buy jettons for {} TON\n", from_nano(&value)));
            if confirm(ui).await? {
                break value;
            }
        };

        let supply_before = self.minter.get_total_supply().await?;
        let last_lt = last_transaction_lt(&self.minter).await?;
        self.minter.send_buy(&value).await?;
        if !self.wait_for_minter(last_lt).await {
            return Ok(self.transaction_not_observed());
        }

        let supply_after = self.minter.get_total_supply().await?;
        if supply_after > supply_before {
            ui.write(&format!(
                "Buy successful!\nCurrent supply:{}\n",
                from_nano(&supply_after)
            ));
            Ok(ActionOutcome::Applied)
        } else {
            ui.write("Buy failed!\n");
            Ok(ActionOutcome::NotApplied)
        }
    }

    fn ui(&self) -> &dyn UiProvider {
        self.ui.as_ref()
    }

    async fn wait_for_minter(&self, last_lt: i64) -> bool {
        wait_for_transaction(
            self.provider.as_ref(),
            self.minter.address(),
            last_lt,
            &self.settings,
        )
        .await
    }

    fn transaction_not_observed(&self) -> ActionOutcome {
        self.ui().write(FAILED_TRANSACTION_MESSAGE);
        ActionOutcome::TransactionNotObserved
    }
}
