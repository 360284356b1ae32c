//! Human interface of the console and the validate-or-reprompt helpers built on it.

use std::io::{self, Write};

use async_trait::async_trait;
use jetton_minter_core::cell::Cell;
use jetton_minter_core::minter::{JettonContentType, JettonMinterContent};
use jetton_minter_core::{to_nano, TonAddress};
use num_bigint::BigUint;
use thiserror::Error;
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;

pub const URL_SCHEMES: [&str; 3] = ["http://", "https://", "ipfs://"];
pub const YES_NO: [&str; 2] = ["yes", "no"];

#[derive(Error, Debug)]
pub enum UiError {
    #[error("Input is closed")]
    InputClosed,

    #[error("Nothing to choose from")]
    NoChoices,

    #[error("IO error ({0})")]
    Io(#[from] io::Error),
}

#[async_trait]
pub trait UiProvider: Send + Sync {
    fn write(&self, message: &str);

    /// Shows `message` and returns the next line typed by the user.
    async fn input(&self, message: &str) -> Result<String, UiError>;

    /// Lets the user pick one of `choices`, returns its index.
    async fn choose(&self, message: &str, choices: &[&str]) -> Result<usize, UiError>;
}

/// Asks for an address until a valid one is typed.
///
/// Empty input selects `fallback` when one is given.
pub async fn prompt_address(
    ui: &dyn UiProvider,
    message: &str,
    fallback: Option<&TonAddress>,
) -> Result<TonAddress, UiError> {
    let prompt = match fallback {
        Some(fallback) => format!(
            "{}(default:{}):",
            message.trim_end_matches(':'),
            fallback
        ),
        None => message.to_string(),
    };
    loop {
        let input = ui.input(&prompt).await?;
        let input = input.trim();
        if input.is_empty() {
            if let Some(fallback) = fallback {
                return Ok(fallback.clone());
            }
        }
        match input.parse::<TonAddress>() {
            Ok(address) => return Ok(address),
            Err(_) => ui.write(&format!("{} is not valid!\n", input)),
        }
    }
}

/// Asks for a decimal TON amount, returns it in nanotons.
pub async fn prompt_amount(ui: &dyn UiProvider, message: &str) -> Result<BigUint, UiError> {
    loop {
        let input = ui.input(message).await?;
        match to_nano(&input) {
            Ok(amount) => return Ok(amount),
            Err(_) => ui.write(&format!("{} is not a valid amount!\n", input.trim())),
        }
    }
}

/// Asks for an `http(s)://` or `ipfs://` url.
pub async fn prompt_url(ui: &dyn UiProvider, message: &str) -> Result<String, UiError> {
    loop {
        let input = ui.input(message).await?;
        let url = input.trim();
        let valid = URL_SCHEMES.iter().any(|scheme| {
            url.strip_prefix(scheme)
                .is_some_and(|rest| !rest.is_empty() && !rest.contains(char::is_whitespace))
        });
        if valid {
            return Ok(url.to_string());
        }
        ui.write(&format!(
            "{} doesn't look like a valid url!\nUse one of: {}\n",
            url,
            URL_SCHEMES.join(", ")
        ));
    }
}

/// Asks for one of two typed answers, the first one means `true`. Case is ignored.
pub async fn prompt_bool(
    ui: &dyn UiProvider,
    message: &str,
    choices: [&str; 2],
) -> Result<bool, UiError> {
    loop {
        let input = ui.input(message).await?.trim().to_lowercase();
        if input == choices[0].to_lowercase() {
            return Ok(true);
        }
        if input == choices[1].to_lowercase() {
            return Ok(false);
        }
        ui.write(&format!("{} is not valid!\n", input));
    }
}

pub async fn confirm(ui: &dyn UiProvider) -> Result<bool, UiError> {
    prompt_bool(ui, "Is it ok?(yes/no)", YES_NO).await
}

/// Yes/No menu.
pub async fn choose_yes(ui: &dyn UiProvider, message: &str) -> Result<bool, UiError> {
    Ok(ui.choose(message, &["Yes", "No"]).await? == 0)
}

pub fn display_content_cell(ui: &dyn UiProvider, content: &Cell) {
    match JettonMinterContent::from_cell(content) {
        Ok(content) if content.content_type == JettonContentType::Offchain => {
            ui.write(&format!("Content metadata url:{}\n", content.uri))
        }
        Ok(content) => ui.write(&format!("Content:{}\n", content.uri)),
        Err(err) => ui.write(&format!("Content can't be decoded ({})\n", err)),
    }
}

/// Line-based terminal: prompts and menus on stdout, answers from stdin.
pub struct TerminalUi {
    reader: Mutex<BufReader<Stdin>>,
}

impl TerminalUi {
    pub fn new() -> TerminalUi {
        TerminalUi {
            reader: Mutex::new(BufReader::new(stdin())),
        }
    }
}

impl Default for TerminalUi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UiProvider for TerminalUi {
    fn write(&self, message: &str) {
        let mut stdout = io::stdout();
        if let Err(err) = stdout
            .write_all(message.as_bytes())
            .and_then(|_| stdout.flush())
        {
            log::error!("Failed to write to terminal: {}", err);
        }
    }

    async fn input(&self, message: &str) -> Result<String, UiError> {
        self.write(&format!("? {} ", message));
        let mut line = String::new();
        let read = self.reader.lock().await.read_line(&mut line).await?;
        if read == 0 {
            return Err(UiError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    async fn choose(&self, message: &str, choices: &[&str]) -> Result<usize, UiError> {
        if choices.is_empty() {
            return Err(UiError::NoChoices);
        }
        loop {
            let mut menu = format!("{}\n", message);
            for (i, choice) in choices.iter().enumerate() {
                menu.push_str(&format!("  {}) {}\n", i + 1, choice));
            }
            self.write(&menu);
            let answer = self.input("Choice:").await?;
            let answer = answer.trim();
            let by_number = answer
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=choices.len()).contains(n))
                .map(|n| n - 1);
            let by_name = || choices.iter().position(|c| c.eq_ignore_ascii_case(answer));
            match by_number.or_else(by_name) {
                Some(index) => return Ok(index),
                None => self.write(&format!("{} is not a valid choice!\n", answer)),
            }
        }
    }
}
