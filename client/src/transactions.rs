//! Polling for the effects of sent messages.

use std::time::Duration;

use jetton_minter_core::{TonAddress, TonTxId};
use thiserror::Error;
use tokio_retry::strategy::FixedInterval;
use tokio_retry::Retry;

use crate::provider::{ChainProvider, ChainProviderError};

/// Poll budget: how many times and how often the chain is asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub attempts: usize,
    pub interval: Duration,
}

#[derive(Error, Debug)]
enum PollError {
    #[error("No new transaction yet")]
    Pending,

    #[error("{0}")]
    Provider(#[from] ChainProviderError),
}

/// Waits until the last transaction of `address` differs from `last_lt`.
///
/// The account is polled at most `settings.attempts` times (at least once). Provider failures
/// count as unsuccessful attempts. Returns `false` when the budget is exhausted.
pub async fn wait_for_transaction(
    provider: &dyn ChainProvider,
    address: &TonAddress,
    last_lt: i64,
    settings: &PollSettings,
) -> bool {
    let strategy = retry_strategy(settings);
    let result = Retry::start(strategy, || poll_last_transaction(provider, address, last_lt)).await;
    match result {
        Ok(tx_id) => {
            log::info!("Observed transaction {} on {}", tx_id, address);
            true
        }
        Err(err) => {
            log::warn!(
                "No transaction on {} after lt {} within {} attempts: {}",
                address,
                last_lt,
                settings.attempts,
                err
            );
            false
        }
    }
}

/// Waits until `address` holds an active contract.
pub async fn wait_for_deploy(
    provider: &dyn ChainProvider,
    address: &TonAddress,
    settings: &PollSettings,
) -> bool {
    let strategy = retry_strategy(settings);
    let result = Retry::start(strategy, || poll_deployed(provider, address)).await;
    match result {
        Ok(()) => {
            log::info!("Contract {} is deployed", address);
            true
        }
        Err(err) => {
            log::warn!(
                "Contract {} is not deployed after {} attempts: {}",
                address,
                settings.attempts,
                err
            );
            false
        }
    }
}

// first attempt runs immediately, the rest follow the fixed interval
fn retry_strategy(settings: &PollSettings) -> std::iter::Take<FixedInterval> {
    FixedInterval::new(settings.interval).take(settings.attempts.saturating_sub(1))
}

async fn poll_last_transaction(
    provider: &dyn ChainProvider,
    address: &TonAddress,
    last_lt: i64,
) -> Result<TonTxId, PollError> {
    let state = provider.get_latest_account(address).await?;
    match state.last_transaction {
        Some(tx_id) if tx_id.lt != last_lt => Ok(tx_id),
        _ => Err(PollError::Pending),
    }
}

async fn poll_deployed(provider: &dyn ChainProvider, address: &TonAddress) -> Result<(), PollError> {
    if provider.is_contract_deployed(address).await? {
        Ok(())
    } else {
        Err(PollError::Pending)
    }
}
