use std::sync::Arc;

use jetton_minter_core::cell::ArcCell;

use super::{
    choose_action, open_deployed_contract, report_action_error, ConsoleError, MinterAction,
    MinterSession,
};
use crate::config::ConsoleConfig;
use crate::provider::ChainProvider;
use crate::ui::UiProvider;

/// Minter console: opens a deployed minter and runs the picked actions until `Quit`.
///
/// A failing action is reported and the menu is shown again. Only UI failures end the loop early.
pub async fn run_minter_controller(
    provider: Arc<dyn ChainProvider>,
    ui: Arc<dyn UiProvider>,
    config: &ConsoleConfig,
    expected_code: Option<&ArcCell>,
) -> Result<(), ConsoleError> {
    let address = open_deployed_contract(
        provider.as_ref(),
        ui.as_ref(),
        "Please enter jetton-master address:",
        expected_code,
    )
    .await?;
    log::info!("Opened jetton minter {}", address);

    let session = MinterSession::new(provider, ui.clone(), &address, config.poll_settings());
    let actions = session.available_actions().await?;
    loop {
        let action = choose_action(ui.as_ref(), "Pick action:", &actions).await?;
        if action == MinterAction::Quit {
            break;
        }
        match session.run_action(action).await {
            Ok(outcome) => log::info!("{} finished with {:?}", action, outcome),
            Err(err) => report_action_error(ui.as_ref(), action.into(), err)?,
        }
    }
    Ok(())
}
