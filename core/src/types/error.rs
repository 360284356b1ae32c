use thiserror::Error;

#[derive(Error, Debug)]
#[error("Invalid address (Address: {address}, message: {message})")]
pub struct TonAddressParseError {
    address: String,
    message: String,
}

impl TonAddressParseError {
    pub fn new<A: ToString, M: ToString>(address: A, message: M) -> TonAddressParseError {
        TonAddressParseError {
            address: address.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Error, Debug)]
#[error("Invalid TransactionId (TxId: {txid}, message: {message})")]
pub struct TransactionIdParseError {
    txid: String,
    message: String,
}

impl TransactionIdParseError {
    pub fn new<T: ToString, M: ToString>(txid: T, message: M) -> TransactionIdParseError {
        TransactionIdParseError {
            txid: txid.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid TON amount (Amount: {amount}, message: {message})")]
pub struct NanoParseError {
    amount: String,
    message: String,
}

impl NanoParseError {
    pub fn new<A: ToString, M: ToString>(amount: A, message: M) -> NanoParseError {
        NanoParseError {
            amount: amount.to_string(),
            message: message.to_string(),
        }
    }
}
