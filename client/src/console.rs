//! Interactive flows: the minter console, deployment and permits.

use jetton_minter_core::cell::ArcCell;
use jetton_minter_core::TonAddress;
use strum::{Display, IntoStaticStr};

pub use controller::*;
pub use deploy::*;
pub use error::*;
pub use permit::*;
pub use session::*;

use crate::contract::{TonContract, TonContractInterface};
use crate::provider::ChainProvider;
use crate::ui::{choose_yes, prompt_address, UiError, UiProvider};

mod controller;
mod deploy;
mod error;
mod permit;
mod session;

pub const FAILED_TRANSACTION_MESSAGE: &str =
    "Failed to get indication of transaction completion from API!\nCheck result manually, or try again\n";

/// How an action ended. Errors of collaborators are reported separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Completed and, where the chain allows it, verified.
    Applied,
    /// Cancelled by the user, or the transaction went through without the expected effect.
    NotApplied,
    /// Sent, but no new transaction showed up within the poll budget.
    TransactionNotObserved,
    /// Sent and processed, the effect can't be read back.
    Sent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum MinterAction {
    Mint,
    #[strum(serialize = "Change admin")]
    ChangeAdmin,
    #[strum(serialize = "Change content")]
    ChangeContent,
    #[strum(serialize = "Change state")]
    ChangeState,
    Withdraw,
    Info,
    Buy,
    Quit,
}

impl MinterAction {
    pub const ADMIN_ACTIONS: [MinterAction; 5] = [
        MinterAction::Mint,
        MinterAction::ChangeAdmin,
        MinterAction::ChangeContent,
        MinterAction::ChangeState,
        MinterAction::Withdraw,
    ];

    pub const USER_ACTIONS: [MinterAction; 3] =
        [MinterAction::Info, MinterAction::Buy, MinterAction::Quit];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum PermitAction {
    Permit,
    Quit,
}

async fn choose_action<A>(
    ui: &dyn UiProvider,
    message: &str,
    actions: &[A],
) -> Result<A, ConsoleError>
where
    A: Copy + Into<&'static str>,
{
    let names: Vec<&'static str> = actions.iter().map(|action| (*action).into()).collect();
    let index = ui.choose(message, &names).await?;
    actions
        .get(index)
        .copied()
        .ok_or(ConsoleError::UiError(UiError::NoChoices))
}

/// Prompts until the user picks an active contract.
///
/// When `expected_code` is set and the contract runs other code the user must accept it explicitly.
pub async fn open_deployed_contract(
    provider: &dyn ChainProvider,
    ui: &dyn UiProvider,
    message: &str,
    expected_code: Option<&ArcCell>,
) -> Result<TonAddress, ConsoleError> {
    loop {
        let address = prompt_address(ui, message, None).await?;
        if !provider.is_contract_deployed(&address).await? {
            ui.write("This contract is not active!\nPlease use another address, or deploy it first\n");
            continue;
        }
        let Some(expected_code) = expected_code else {
            return Ok(address);
        };
        let state = provider.get_latest_account(&address).await?;
        if state.code() == Some(expected_code) {
            return Ok(address);
        }
        log::warn!("Code of {} differs from the expected one", address);
        ui.write("Contract code differs from the current contract version!\n");
        if choose_yes(ui, "Use address anyway").await? {
            return Ok(address);
        }
    }
}

async fn last_transaction_lt(contract: &TonContract) -> Result<i64, ConsoleError> {
    contract
        .get_account_state()
        .await?
        .last_transaction
        .map(|tx_id| tx_id.lt)
        .ok_or_else(|| ConsoleError::MissingLastTransaction(contract.address().clone()))
}

/// Logs a failed action and reports it to the user. Errors of the UI itself are returned.
fn report_action_error(
    ui: &dyn UiProvider,
    action: &str,
    err: ConsoleError,
) -> Result<(), ConsoleError> {
    if let ConsoleError::UiError(_) = err {
        return Err(err);
    }
    log::error!("{} failed: {}", action, err);
    ui.write(&format!("{} failed: {}\n", action, err));
    Ok(())
}
