use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use crate::{
    command::{CommandError, LedgerCommand},
    engine::{
        AccrualConfig, AccrualError, InterestAccrualEngine, TransactionEngine, TransactionError,
        today,
    },
    store::{AccountStore, Ledger},
    transaction::Transaction,
};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Malformed operation: {0}")]
    ParseErr(#[from] csv::Error),
    #[error(transparent)]
    CommandErr(#[from] CommandError),
    #[error(transparent)]
    TransactionErr(#[from] TransactionError),
    #[error(transparent)]
    AccrualErr(#[from] AccrualError),
}

#[derive(Debug)]
pub enum Outcome {
    Executed(Arc<Transaction>),
    TimeAdvanced { credited: usize },
}

/// Both engines over one ledger, driven by [`LedgerCommand`]s.
pub struct Simulation<S> {
    ledger: Ledger<S>,
    transactions: TransactionEngine<S>,
    interest: InterestAccrualEngine<S>,
}

impl<S: AccountStore> Simulation<S> {
    pub fn new(ledger: Ledger<S>, config: AccrualConfig) -> Self {
        Self::starting_at(ledger, today(), config)
    }

    pub fn starting_at(ledger: Ledger<S>, start: NaiveDate, config: AccrualConfig) -> Self {
        Self {
            transactions: TransactionEngine::new(ledger.clone()),
            interest: InterestAccrualEngine::starting_at(ledger.clone(), start, config),
            ledger,
        }
    }

    pub fn ledger(&self) -> &Ledger<S> {
        &self.ledger
    }

    pub fn transactions(&self) -> &TransactionEngine<S> {
        &self.transactions
    }

    pub fn process(&mut self, command: LedgerCommand) -> Result<Outcome, ProcessError> {
        let outcome = match command {
            LedgerCommand::Transfer { from, to, amount } => {
                Outcome::Executed(self.transactions.transfer(&from, &to, amount)?)
            }
            LedgerCommand::Withdraw { account, amount } => {
                Outcome::Executed(self.transactions.withdraw(&account, amount)?)
            }
            LedgerCommand::Tick => Outcome::TimeAdvanced {
                credited: self.interest.advance_time()?,
            },
        };
        Ok(outcome)
    }
}
