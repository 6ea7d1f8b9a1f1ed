use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{AccountError, AccountId},
    money::ConversionError,
    store::StoreError,
};

pub mod interest_engine;
pub mod transaction_engine;

pub use interest_engine::{AccrualConfig, InterestAccrualEngine};
pub use transaction_engine::TransactionEngine;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Account {account_id} does not exist")]
    AccountNotFound { account_id: AccountId },
    #[error("Transfers from {from} accounts to {to} accounts are not supported")]
    UnsupportedAccountPair {
        from: &'static str,
        to: &'static str,
    },
    #[error("Amount must be greater than zero, got {amount}")]
    InvalidAmount { amount: Decimal },
    #[error("Account {account_id} cannot transfer to itself")]
    SameAccountTransfer { account_id: AccountId },
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TransactionError {
    fn not_found(account_id: &str) -> Self {
        TransactionError::AccountNotFound {
            account_id: account_id.to_owned(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccrualError {
    #[error("Adding {months} months to {date} leaves the supported calendar range")]
    ClockOutOfRange { date: NaiveDate, months: u32 },
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
