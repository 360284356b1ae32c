use num_bigint::BigUint;
use tokio_test::{assert_err, assert_ok};

use jetton_minter_client::console::{run_minter_controller, ConsoleError, FAILED_TRANSACTION_MESSAGE};
use jetton_minter_client::types::TvmStackEntry;
use jetton_minter_client::ui::UiError;
use jetton_minter_core::cell::CellBuilder;
use jetton_minter_core::message::{ChangeAdminMessage, TonMessage};
use jetton_minter_core::minter::JettonMinterContent;
use jetton_minter_core::TonAddress;

mod common;

fn setup(sender: Option<TonAddress>) -> (std::sync::Arc<common::MockChainProvider>, String) {
    common::init_logging();
    let provider = common::MockChainProvider::new(sender);
    let address = provider.add_minter(&common::minter_config(&common::admin()), Some(1));
    (provider, address.to_string())
}

#[tokio::test]
async fn test_info() {
    let (provider, minter) = setup(Some(common::admin()));
    let ui = common::ScriptedUi::new(&[minter.as_str(), "Info", "Yes", "Quit"]);

    assert_ok!(run_minter_controller(provider, ui.clone(), &common::fast_console(), None).await);

    let output = ui.output();
    assert!(output.contains("Current wallet is jetton admin!\n"));
    assert!(output.contains("Jetton info:\n"));
    assert!(output.contains(&format!("Admin: {}\n", common::admin())));
    assert!(output.contains("Mintable: true\n"));
    assert!(output.contains(&format!("Content metadata url:{}\n", common::CONTENT_URI)));
    assert_eq!(ui.remaining_answers(), 0);
}

#[tokio::test]
async fn test_mint_to_default_address() {
    let (provider, minter) = setup(Some(common::admin()));
    let ui = common::ScriptedUi::new(&[minter.as_str(), "Mint", "", "1.5", "yes", "Quit"]);

    assert_ok!(
        run_minter_controller(provider.clone(), ui.clone(), &common::fast_console(), None).await
    );

    let output = ui.output();
    assert!(output.contains(&format!(
        "Please specify address to mint to(default:{}):",
        common::admin()
    )));
    assert!(output.contains("Mint successful!\n"));
    let state = provider.minter(&minter.parse().unwrap()).unwrap();
    assert_eq!(state.total_supply, BigUint::from(1_500_000_000u64));
}

#[tokio::test]
async fn test_mint_without_effect() {
    let (provider, minter) = setup(Some(common::admin()));
    provider.set_processing(common::Processing::IgnoreEffects);
    let user = common::user().to_string();
    let ui = common::ScriptedUi::new(&[
        minter.as_str(),
        "Mint",
        user.as_str(),
        "2",
        "yes",
        "Quit",
    ]);

    assert_ok!(run_minter_controller(provider, ui.clone(), &common::fast_console(), None).await);

    assert!(ui.output().contains("Mint failed!\n"));
}

#[tokio::test]
async fn test_change_admin() {
    let (provider, minter) = setup(Some(common::admin()));
    let admin = common::admin().to_string();
    let user = common::user().to_string();
    let ui = common::ScriptedUi::new(&[
        minter.as_str(),
        "Change admin",
        admin.as_str(),
        user.as_str(),
        "no",
        user.as_str(),
        "yes",
        "Quit",
    ]);

    assert_ok!(
        run_minter_controller(provider.clone(), ui.clone(), &common::fast_console(), None).await
    );

    let output = ui.output();
    assert!(output.contains("Address specified matched current admin address!\n"));
    assert!(output.contains("Admin changed successfully\n"));
    let state = provider.minter(&minter.parse().unwrap()).unwrap();
    assert_eq!(state.admin, common::user());
    assert_eq!(provider.sent().len(), 1);
}

#[tokio::test]
async fn test_change_admin_to_zero_address() {
    let (provider, minter) = setup(Some(common::admin()));
    let zero = "EQAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAM9c";
    let ui = common::ScriptedUi::new(&[minter.as_str(), "Change admin", zero, "yes", "Quit"]);

    assert_ok!(
        run_minter_controller(provider.clone(), ui.clone(), &common::fast_console(), None).await
    );

    assert!(ui.output().contains("Admin changed successfully\n"));
    let state = provider.minter(&minter.parse().unwrap()).unwrap();
    assert_eq!(state.admin, TonAddress::new(0, &[0; 32]));

    let sent = provider.sent();
    let body = sent[0].0.data.as_ref().unwrap();
    assert_eq!(body.bit_len(), 32 + 64 + 267);
    let change = assert_ok!(ChangeAdminMessage::parse(body));
    assert_eq!(change.new_admin, TonAddress::new(0, &[0; 32]));
}

#[tokio::test]
async fn test_info_without_admin() {
    let (provider, minter) = setup(Some(common::admin()));
    let admin_none = CellBuilder::new()
        .store_maybe_address(None)
        .unwrap()
        .build()
        .unwrap();
    provider.override_get_method(
        "get_jetton_data",
        vec![
            TvmStackEntry::from(BigUint::from(5u32)),
            TvmStackEntry::from(true),
            TvmStackEntry::Slice(admin_none.to_arc()),
            TvmStackEntry::Cell(common::content_cell(common::CONTENT_URI)),
            TvmStackEntry::Cell(common::wallet_code()),
        ],
    );
    let ui = common::ScriptedUi::new(&[minter.as_str(), "Info", "No", "Quit"]);

    assert_ok!(run_minter_controller(provider, ui.clone(), &common::fast_console(), None).await);

    let output = ui.output();
    assert!(output.contains("Current wallet is not admin!\n"));
    assert!(output.contains("Admin: none\n"));
    assert!(output.contains("Total supply: "));
    assert_eq!(ui.remaining_answers(), 0);
}

#[tokio::test]
async fn test_change_content() {
    let (provider, minter) = setup(Some(common::admin()));
    let new_uri = "ipfs://bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi";
    let ui = common::ScriptedUi::new(&[
        minter.as_str(),
        "Change content",
        "ftp://example.com/jetton.json",
        common::CONTENT_URI,
        new_uri,
        "yes",
        "Quit",
    ]);

    assert_ok!(
        run_minter_controller(provider.clone(), ui.clone(), &common::fast_console(), None).await
    );

    let output = ui.output();
    assert!(output.contains("doesn't look like a valid url!\n"));
    assert!(output.contains("URI specified matched current content!\n"));
    assert!(output.contains("Content changed successfully\n"));
    let state = provider.minter(&minter.parse().unwrap()).unwrap();
    assert_eq!(
        assert_ok!(JettonMinterContent::from_cell(&state.content)),
        JettonMinterContent::offchain(new_uri)
    );
}

#[tokio::test]
async fn test_change_state() {
    let (provider, minter) = setup(Some(common::admin()));
    let ui = common::ScriptedUi::new(&[
        minter.as_str(),
        "Change state",
        "yes",
        "Change state",
        "No",
        "yes",
        "Quit",
    ]);

    assert_ok!(
        run_minter_controller(provider.clone(), ui.clone(), &common::fast_console(), None).await
    );

    let output = ui.output();
    assert!(output.contains("Minter is already in this state!\n"));
    assert!(output.contains("State changed successfully\n"));
    let state = provider.minter(&minter.parse().unwrap()).unwrap();
    assert!(!state.mintable);
    assert_eq!(provider.sent().len(), 1);
}

#[tokio::test]
async fn test_transaction_not_observed() {
    let (provider, minter) = setup(Some(common::admin()));
    provider.set_processing(common::Processing::Drop);
    let ui = common::ScriptedUi::new(&[minter.as_str(), "Withdraw", "yes", "Quit"]);

    assert_ok!(
        run_minter_controller(provider.clone(), ui.clone(), &common::fast_console(), None).await
    );

    assert!(ui.output().contains(FAILED_TRANSACTION_MESSAGE));
    assert_eq!(provider.sent().len(), 1);
}

#[tokio::test]
async fn test_non_admin_actions_are_restricted() {
    let (provider, minter) = setup(Some(common::user()));
    let ui = common::ScriptedUi::new(&[minter.as_str(), "Mint"]);

    let err = assert_err!(
        run_minter_controller(provider, ui.clone(), &common::fast_console(), None).await
    );
    assert!(matches!(err, ConsoleError::UiError(UiError::NoChoices)));
    assert!(ui
        .output()
        .contains("Current wallet is not admin!\nAvailable actions restricted\n"));
}

#[tokio::test]
async fn test_non_admin_buy() {
    let (provider, minter) = setup(Some(common::user()));
    let ui = common::ScriptedUi::new(&[minter.as_str(), "Buy", "2", "yes", "Quit"]);

    assert_ok!(
        run_minter_controller(provider.clone(), ui.clone(), &common::fast_console(), None).await
    );

    assert!(ui.output().contains("Buy successful!\n"));
    let state = provider.minter(&minter.parse().unwrap()).unwrap();
    assert_eq!(state.total_supply, BigUint::from(2_000_000_000u64));
}

#[tokio::test]
async fn test_open_contract_with_other_code() {
    let (provider, minter) = setup(Some(common::admin()));
    let unknown = TonAddress::new(0, &[0x11; 32]).to_string();
    let expected_code = common::code_cell(0xDEAD);
    let ui = common::ScriptedUi::new(&[
        "not an address",
        unknown.as_str(),
        minter.as_str(),
        "No",
        minter.as_str(),
        "Yes",
        "Quit",
    ]);

    assert_ok!(
        run_minter_controller(
            provider,
            ui.clone(),
            &common::fast_console(),
            Some(&expected_code)
        )
        .await
    );

    let output = ui.output();
    assert!(output.contains("not an address is not valid!\n"));
    assert!(output.contains("This contract is not active!\n"));
    assert_eq!(
        output
            .matches("Contract code differs from the current contract version!\n")
            .count(),
        2
    );
}

#[tokio::test]
async fn test_open_contract_with_expected_code() {
    let (provider, minter) = setup(Some(common::admin()));
    let ui = common::ScriptedUi::new(&[minter.as_str(), "Quit"]);

    assert_ok!(
        run_minter_controller(
            provider,
            ui.clone(),
            &common::fast_console(),
            Some(&common::minter_code())
        )
        .await
    );

    assert!(!ui.output().contains("Contract code differs"));
}

#[tokio::test]
async fn test_failed_action_keeps_console_running() {
    let (provider, minter) = setup(None);
    provider.override_get_method("get_jetton_data", vec![TvmStackEntry::Null]);
    let ui = common::ScriptedUi::new(&[minter.as_str(), "Info", "Quit"]);

    assert_ok!(run_minter_controller(provider, ui.clone(), &common::fast_console(), None).await);

    let output = ui.output();
    assert!(output.contains("Current wallet is jetton admin!\n"));
    assert!(output.contains("Info failed: "));
    assert_eq!(ui.remaining_answers(), 0);
}

#[tokio::test]
async fn test_closed_input() {
    let (provider, minter) = setup(Some(common::admin()));
    let ui = common::ScriptedUi::new(&[minter.as_str()]);

    let err = assert_err!(run_minter_controller(provider, ui, &common::fast_console(), None).await);
    assert!(matches!(err, ConsoleError::UiError(UiError::InputClosed)));
}
