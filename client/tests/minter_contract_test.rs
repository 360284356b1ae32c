use std::sync::Arc;

use jetton_minter_client::contract::{
    JettonMinterContract, TonContract, TonContractError, TonContractInterface,
    MINTER_CHANGE_STATE_VALUE, MINTER_REQUEST_VALUE,
};
use jetton_minter_client::provider::ChainProvider;
use jetton_minter_client::types::TvmStackEntry;
use jetton_minter_core::message::{
    ChangeAdminMessage, ChangeStateMessage, MintMessage, ProvideWalletAddressMessage, TonMessage,
    TonMessageError, SEND_MODE_PAY_GAS_SEPARATELY,
};
use jetton_minter_core::minter::JettonMinterContent;
use num_bigint::BigUint;
use tokio_test::{assert_err, assert_ok};

mod common;

fn open_minter() -> (Arc<common::MockChainProvider>, TonContract) {
    let provider = common::MockChainProvider::new(Some(common::admin()));
    let address = provider.add_minter(&common::minter_config(&common::admin()), Some(1));
    let chain: Arc<dyn ChainProvider> = provider.clone();
    (provider, TonContract::new(&chain, &address))
}

#[tokio::test]
async fn test_get_jetton_data() {
    common::init_logging();
    let (_, minter) = open_minter();

    let data = assert_ok!(minter.get_jetton_data().await);
    assert_eq!(data.total_supply, BigUint::default());
    assert!(data.mintable);
    assert_eq!(data.admin_address, Some(common::admin()));
    assert_eq!(data.wallet_code, common::wallet_code());
    let content = assert_ok!(JettonMinterContent::from_cell(&data.content));
    assert_eq!(content, JettonMinterContent::offchain(common::CONTENT_URI));

    assert_eq!(assert_ok!(minter.get_admin_address().await), Some(common::admin()));
    assert_eq!(assert_ok!(minter.get_content().await), data.content);
    assert!(assert_ok!(minter.get_mintable().await));
}

#[tokio::test]
async fn test_get_jetton_data_wrong_stack_size() {
    common::init_logging();
    let (provider, minter) = open_minter();
    provider.override_get_method(
        "get_jetton_data",
        vec![TvmStackEntry::from(1i64), TvmStackEntry::from(true)],
    );

    let err = assert_err!(minter.get_jetton_data().await);
    match err {
        TonContractError::InvalidMethodResultStackSize {
            method,
            actual,
            expected,
            ..
        } => {
            assert_eq!(method, "get_jetton_data");
            assert_eq!(actual, 2);
            assert_eq!(expected, 5);
        }
        other => panic!("Unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_get_jetton_data_wrong_entry_type() {
    common::init_logging();
    let (provider, minter) = open_minter();
    provider.override_get_method(
        "get_jetton_data",
        vec![
            TvmStackEntry::from(1i64),
            TvmStackEntry::from(true),
            TvmStackEntry::Null,
            TvmStackEntry::Cell(common::content_cell(common::CONTENT_URI)),
            TvmStackEntry::Cell(common::wallet_code()),
        ],
    );

    let err = assert_err!(minter.get_jetton_data().await);
    assert!(matches!(err, TonContractError::TvmStackParseError { .. }));
}

#[tokio::test]
async fn test_get_wallet_address() {
    common::init_logging();
    let (_, minter) = open_minter();

    let wallet = assert_ok!(minter.get_wallet_address(&common::user()).await);
    assert_eq!(wallet, common::wallet_address_of(&common::user()));
}

#[tokio::test]
async fn test_failed_get_method() {
    common::init_logging();
    let (_, minter) = open_minter();

    let err = assert_err!(minter.run_get_method("seqno", &[]).await);
    match err {
        TonContractError::TvmRunError {
            method, exit_code, ..
        } => {
            assert_eq!(method, "seqno");
            assert_eq!(exit_code, 11);
        }
        other => panic!("Unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_send_mint() {
    common::init_logging();
    let (provider, minter) = open_minter();
    let amount = BigUint::from(1_500_000_000u64);
    let forward = BigUint::from(50_000_000u64);
    let total = BigUint::from(100_000_000u64);

    assert_ok!(
        minter
            .send_mint(&common::user(), &amount, &forward, &total)
            .await
    );

    let sent = provider.sent();
    assert_eq!(sent.len(), 1);
    let (message, mode) = &sent[0];
    assert_eq!(*mode, SEND_MODE_PAY_GAS_SEPARATELY);
    assert_eq!(&message.info.dest, minter.address());
    assert_eq!(message.info.value, BigUint::from(200_000_000u64));
    let body = assert_ok!(MintMessage::parse(message.data.as_ref().unwrap()));
    assert_eq!(body.to, common::user());
    assert_eq!(body.jetton_amount, amount);
    assert_eq!(body.total_ton_amount, total);

    let supply = assert_ok!(minter.get_total_supply().await);
    assert_eq!(supply, amount);
}

#[tokio::test]
async fn test_send_mint_rejects_forward_above_total() {
    common::init_logging();
    let (provider, minter) = open_minter();
    let amount = BigUint::from(1u32);
    let forward = BigUint::from(100_000_000u64);
    let total = BigUint::from(50_000_000u64);

    let err = assert_err!(
        minter
            .send_mint(&common::user(), &amount, &forward, &total)
            .await
    );
    assert!(matches!(
        err,
        TonContractError::MessageError(TonMessageError::InvalidArgument(_))
    ));
    assert!(provider.sent().is_empty());
}

#[tokio::test]
async fn test_admin_requests() {
    common::init_logging();
    let (provider, minter) = open_minter();

    assert_ok!(minter.send_change_admin(&common::user()).await);
    assert_ok!(minter.send_change_state(false).await);
    assert_ok!(
        minter
            .send_discovery(&common::user(), true, None)
            .await
    );

    let sent = provider.sent();
    assert_eq!(sent.len(), 3);

    let change_admin = assert_ok!(ChangeAdminMessage::parse(sent[0].0.data.as_ref().unwrap()));
    assert_eq!(change_admin.new_admin, common::user());
    assert_eq!(sent[0].0.info.value, *MINTER_REQUEST_VALUE);

    let change_state = assert_ok!(ChangeStateMessage::parse(sent[1].0.data.as_ref().unwrap()));
    assert!(!change_state.state);
    assert_eq!(sent[1].0.info.value, *MINTER_CHANGE_STATE_VALUE);

    let discovery = assert_ok!(ProvideWalletAddressMessage::parse(
        sent[2].0.data.as_ref().unwrap()
    ));
    assert_eq!(discovery.owner, common::user());
    assert!(discovery.include_address);
    assert_eq!(sent[2].0.info.value, *MINTER_REQUEST_VALUE);

    let data = assert_ok!(minter.get_jetton_data().await);
    assert_eq!(data.admin_address, Some(common::user()));
    assert!(!data.mintable);
}

#[tokio::test]
async fn test_send_buy() {
    common::init_logging();
    let (provider, minter) = open_minter();
    let value = BigUint::from(3_000_000_000u64);

    assert_ok!(minter.send_buy(&value).await);

    let sent = provider.sent();
    assert_eq!(sent[0].0.info.value, value);
    assert_eq!(assert_ok!(minter.get_total_supply().await), value);
}
