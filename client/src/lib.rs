pub mod config;
pub mod console;
pub mod contract;
pub mod logging;
pub mod provider;
pub mod transactions;
pub mod types;
pub mod ui;
