use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use jetton_minter_client::config::ConsoleConfig;
use jetton_minter_client::logging;
use jetton_minter_client::provider::{
    AccountState, AccountStatus, ChainProvider, ChainProviderError,
};
use jetton_minter_client::types::{TvmStackEntry, TvmSuccess};
use jetton_minter_client::ui::{UiError, UiProvider};
use jetton_minter_core::cell::{ArcCell, Cell, CellBuilder, StateInit, TonCellError};
use jetton_minter_core::message::{
    BuyMessage, ChangeAdminMessage, ChangeContentMessage, ChangeStateMessage, HasOpcode,
    MintMessage, ProvideWalletAddressMessage, TonMessage, TransferMessage, WithdrawMessage,
};
use jetton_minter_core::minter::{JettonMinter, JettonMinterConfig, JettonMinterContent};
use jetton_minter_core::{TonAddress, TonTxId};
use log::LevelFilter;
use num_bigint::BigUint;

#[allow(dead_code)]
static LOG: Once = Once::new();

#[allow(dead_code)]
pub fn init_logging() {
    LOG.call_once(|| {
        logging::init_logging(LevelFilter::Info).unwrap();
    })
}

#[allow(dead_code)]
pub const CONTENT_URI: &str = "https://example.com/jetton.json";

#[allow(dead_code)]
pub fn admin() -> TonAddress {
    TonAddress::new(0, &[0xAA; 32])
}

#[allow(dead_code)]
pub fn user() -> TonAddress {
    TonAddress::new(0, &[0xBB; 32])
}

#[allow(dead_code)]
pub fn minter_code() -> ArcCell {
    code_cell(0xC0DE_0001)
}

#[allow(dead_code)]
pub fn wallet_code() -> ArcCell {
    code_cell(0xC0DE_0002)
}

#[allow(dead_code)]
pub fn code_cell(tag: u32) -> ArcCell {
    CellBuilder::new()
        .store_u32(32, tag)
        .unwrap()
        .build()
        .unwrap()
        .to_arc()
}

#[allow(dead_code)]
pub fn content_cell(uri: &str) -> ArcCell {
    JettonMinterContent::offchain(uri).to_cell().unwrap().to_arc()
}

#[allow(dead_code)]
pub fn fast_console() -> ConsoleConfig {
    ConsoleConfig {
        attempts: 3,
        poll_interval_ms: 1,
        workchain: 0,
    }
}

#[allow(dead_code)]
pub fn minter_config(admin: &TonAddress) -> JettonMinterConfig {
    JettonMinterConfig {
        admin: admin.clone(),
        content: content_cell(CONTENT_URI),
        wallet_code: wallet_code(),
        public_key: BigUint::from(7u32),
    }
}

/// Minter state as the get-methods see it.
#[derive(Clone, Debug, PartialEq)]
pub struct MinterState {
    pub total_supply: BigUint,
    pub mintable: bool,
    pub admin: TonAddress,
    pub content: ArcCell,
    pub wallet_code: ArcCell,
}

impl MinterState {
    fn from_data(data: &Cell) -> Result<MinterState, TonCellError> {
        data.parse_fully(|parser| {
            let total_supply = parser.load_coins()?;
            let admin = parser.load_address()?;
            parser.load_uint(256)?;
            let content = parser.next_reference()?;
            let wallet_code = parser.next_reference()?;
            Ok(MinterState {
                total_supply,
                mintable: true,
                admin,
                content,
                wallet_code,
            })
        })
    }

    fn jetton_data_stack(&self) -> Result<Vec<TvmStackEntry>, ChainProviderError> {
        let admin = CellBuilder::new().store_address(&self.admin)?.build()?;
        Ok(vec![
            TvmStackEntry::from(self.total_supply.clone()),
            TvmStackEntry::from(self.mintable),
            TvmStackEntry::Slice(admin.to_arc()),
            TvmStackEntry::Cell(self.content.clone()),
            TvmStackEntry::Cell(self.wallet_code.clone()),
        ])
    }

    fn apply(
        &mut self,
        address: &TonAddress,
        body: &Cell,
        value: &BigUint,
    ) -> Result<(), ChainProviderError> {
        let opcode = body.parser().load_u32(32)?;
        if opcode == MintMessage::opcode() {
            self.total_supply += &MintMessage::parse(body)?.jetton_amount;
        } else if opcode == ChangeAdminMessage::opcode() {
            self.admin = ChangeAdminMessage::parse(body)?.new_admin;
        } else if opcode == ChangeContentMessage::opcode() {
            self.content = ChangeContentMessage::parse(body)?.content;
        } else if opcode == ChangeStateMessage::opcode() {
            self.mintable = ChangeStateMessage::parse(body)?.state;
        } else if opcode == BuyMessage::opcode() {
            BuyMessage::parse(body)?;
            self.total_supply += value;
        } else if opcode == WithdrawMessage::opcode() {
            WithdrawMessage::parse(body)?;
        } else if opcode == ProvideWalletAddressMessage::opcode() {
            ProvideWalletAddressMessage::parse(body)?;
        } else {
            return Err(ChainProviderError::MessageRejected {
                address: address.clone(),
                message: format!("unknown opcode {:08x}", opcode),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct MockAccount {
    pub code: ArcCell,
    pub data: ArcCell,
    pub minter: Option<MinterState>,
    pub last_lt: Option<i64>,
}

/// What the mock chain does with sent messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Processing {
    /// Transaction is created and the minter state is updated.
    Apply,
    /// Transaction is created, the state stays the same.
    IgnoreEffects,
    /// Message gets lost.
    Drop,
}

#[derive(Default)]
struct ChainState {
    accounts: HashMap<TonAddress, MockAccount>,
    sent: Vec<(TransferMessage, u8)>,
    seqno: u32,
    overrides: HashMap<String, Vec<TvmStackEntry>>,
}

/// In-memory chain with a minter implementation good enough for console flows.
pub struct MockChainProvider {
    sender: Option<TonAddress>,
    processing: Mutex<Processing>,
    state: Mutex<ChainState>,
}

#[allow(dead_code)]
impl MockChainProvider {
    pub fn new(sender: Option<TonAddress>) -> Arc<MockChainProvider> {
        Arc::new(MockChainProvider {
            sender,
            processing: Mutex::new(Processing::Apply),
            state: Mutex::new(ChainState::default()),
        })
    }

    /// Places an already deployed minter built from `config`, returns its address.
    pub fn add_minter(&self, config: &JettonMinterConfig, last_lt: Option<i64>) -> TonAddress {
        let code = minter_code();
        let minter = JettonMinter::create_from_config(config, &code, 0).unwrap();
        let data = config.to_cell().unwrap().to_arc();
        let account = MockAccount {
            code,
            minter: Some(MinterState::from_data(&data).unwrap()),
            data,
            last_lt,
        };
        self.add_account(&minter.address, account);
        minter.address
    }

    pub fn add_account(&self, address: &TonAddress, account: MockAccount) {
        let mut state = self.state.lock().unwrap();
        state.accounts.insert(address.clone(), account);
    }

    pub fn set_processing(&self, processing: Processing) {
        *self.processing.lock().unwrap() = processing;
    }

    pub fn override_get_method(&self, method: &str, stack: Vec<TvmStackEntry>) {
        let mut state = self.state.lock().unwrap();
        state.overrides.insert(method.to_string(), stack);
    }

    pub fn minter(&self, address: &TonAddress) -> Option<MinterState> {
        let state = self.state.lock().unwrap();
        state.accounts.get(address).and_then(|a| a.minter.clone())
    }

    pub fn account(&self, address: &TonAddress) -> Option<MockAccount> {
        let state = self.state.lock().unwrap();
        state.accounts.get(address).cloned()
    }

    pub fn sent(&self) -> Vec<(TransferMessage, u8)> {
        self.state.lock().unwrap().sent.clone()
    }

    fn deploy(
        state: &mut ChainState,
        address: &TonAddress,
        state_init: &Cell,
    ) -> Result<(), ChainProviderError> {
        if state.accounts.contains_key(address) {
            return Ok(());
        }
        let init = StateInit::parse(state_init)?;
        let (Some(code), Some(data)) = (init.code, init.data) else {
            return Err(ChainProviderError::MessageRejected {
                address: address.clone(),
                message: "state init without code or data".to_string(),
            });
        };
        let account = MockAccount {
            minter: MinterState::from_data(&data).ok(),
            code,
            data,
            last_lt: Some(1),
        };
        state.accounts.insert(address.clone(), account);
        Ok(())
    }
}

#[async_trait]
impl ChainProvider for MockChainProvider {
    fn sender_address(&self) -> Option<TonAddress> {
        self.sender.clone()
    }

    async fn send_internal(
        &self,
        message: &TransferMessage,
        send_mode: u8,
    ) -> Result<(), ChainProviderError> {
        // what a transport would put on the wire
        let message = TransferMessage::parse(&message.build()?)?;
        let processing = *self.processing.lock().unwrap();
        let mut state = self.state.lock().unwrap();
        state.sent.push((message.clone(), send_mode));
        state.seqno += 1;
        if processing == Processing::Drop {
            return Ok(());
        }

        let address = &message.info.dest;
        if let Some(state_init) = &message.state_init {
            return Self::deploy(&mut state, address, state_init);
        }
        let account = state
            .accounts
            .get_mut(address)
            .ok_or_else(|| ChainProviderError::AccountNotFound(address.clone()))?;
        account.last_lt = Some(account.last_lt.unwrap_or_default() + 1);
        if processing == Processing::IgnoreEffects {
            return Ok(());
        }
        match (account.minter.as_mut(), &message.data) {
            (Some(minter), Some(body)) => minter.apply(address, body, &message.info.value),
            _ => Ok(()),
        }
    }

    async fn last_block_seqno(&self) -> Result<u32, ChainProviderError> {
        Ok(self.state.lock().unwrap().seqno)
    }

    async fn get_account(
        &self,
        _seqno: u32,
        address: &TonAddress,
    ) -> Result<AccountState, ChainProviderError> {
        let state = self.state.lock().unwrap();
        let account_state = match state.accounts.get(address) {
            Some(account) => AccountState {
                status: AccountStatus::Active {
                    code: account.code.clone(),
                    data: account.data.clone(),
                },
                last_transaction: account
                    .last_lt
                    .map(|lt| TonTxId::new(lt, [lt as u8; 32])),
            },
            None => AccountState {
                status: AccountStatus::Uninit,
                last_transaction: None,
            },
        };
        Ok(account_state)
    }

    async fn is_contract_deployed(&self, address: &TonAddress) -> Result<bool, ChainProviderError> {
        Ok(self.state.lock().unwrap().accounts.contains_key(address))
    }

    async fn run_get_method(
        &self,
        address: &TonAddress,
        method: &str,
        stack: &[TvmStackEntry],
    ) -> Result<TvmSuccess, ChainProviderError> {
        let state = self.state.lock().unwrap();
        if let Some(stack) = state.overrides.get(method) {
            return Ok(TvmSuccess::with_stack(stack.clone()));
        }
        let minter = state
            .accounts
            .get(address)
            .and_then(|account| account.minter.as_ref())
            .ok_or_else(|| ChainProviderError::AccountNotFound(address.clone()))?;
        match method {
            "get_jetton_data" => Ok(TvmSuccess::with_stack(minter.jetton_data_stack()?)),
            "get_wallet_address" => {
                let owner = stack
                    .first()
                    .and_then(|entry| entry.get_address().ok())
                    .ok_or_else(|| ChainProviderError::GetMethodFailed {
                        method: method.to_string(),
                        address: address.clone(),
                        message: "owner address expected".to_string(),
                    })?;
                let wallet = wallet_address_of(&owner);
                Ok(TvmSuccess::with_stack(vec![TvmStackEntry::try_from(
                    &wallet,
                )
                .map_err(|err| ChainProviderError::Transport(err.to_string()))?]))
            }
            _ => Ok(TvmSuccess {
                vm_log: None,
                vm_exit_code: 11,
                stack: vec![],
                gas_used: 0,
            }),
        }
    }
}

#[allow(dead_code)]
pub fn wallet_address_of(owner: &TonAddress) -> TonAddress {
    let mut hash = owner.hash_part;
    hash.reverse();
    TonAddress::new(0, &hash)
}

/// UI that answers prompts from a script and records everything shown.
pub struct ScriptedUi {
    answers: Mutex<VecDeque<String>>,
    output: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedUi {
    pub fn new(answers: &[&str]) -> Arc<ScriptedUi> {
        Arc::new(ScriptedUi {
            answers: Mutex::new(answers.iter().map(|a| a.to_string()).collect()),
            output: Mutex::new(Vec::new()),
        })
    }

    pub fn output(&self) -> String {
        self.output.lock().unwrap().concat()
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.lock().unwrap().len()
    }
}

#[async_trait]
impl UiProvider for ScriptedUi {
    fn write(&self, message: &str) {
        self.output.lock().unwrap().push(message.to_string());
    }

    async fn input(&self, message: &str) -> Result<String, UiError> {
        self.write(&format!("> {}\n", message));
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(UiError::InputClosed)
    }

    /// Answers name the choice. Unknown names fail like a closed input would.
    async fn choose(&self, message: &str, choices: &[&str]) -> Result<usize, UiError> {
        let answer = self.input(message).await?;
        choices
            .iter()
            .position(|choice| *choice == answer)
            .ok_or(UiError::NoChoices)
    }
}
