//! This module could be a separate crate on its own, to bootstrap [`bank_ledger`](crate) within
//! a binary, but for simplicity it lives in the library so integration tests can drive it.

use std::io::{Read, Write};

use crate::{
    command::LedgerCommand,
    engine::{AccrualConfig, today},
    simulation::{Outcome, ProcessError, Simulation},
    store::{AccountStore, Ledger, in_memory_store::InMemoryAccountStore},
};
use anyhow::Result;
use csv_parser::CsvOperationParser;
use csv_printer::{AccountRow, print_accounts};
use tracing::{info, warn};

pub mod csv_parser;
pub mod csv_printer;
pub mod seed;

/// Seeds the demo accounts, replays an operations CSV against them and prints
/// the final balances. Rejected or malformed rows are handed to `error_printer`
/// and processing continues; only I/O failures abort the run.
pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub config: AccrualConfig,
    pub error_printer: Box<dyn FnMut(u64, ProcessError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let opened_on = today();
        let mut store = InMemoryAccountStore::default();
        seed::seed_accounts(&mut store, opened_on)?;
        let mut simulation = Simulation::starting_at(Ledger::new(store), opened_on, self.config);

        for (line, row) in CsvOperationParser::new(self.input) {
            let row = match row {
                Err(err) if err.is_io_error() => {
                    anyhow::bail!("Failed to read operation at line {line}: {err}")
                }
                row => row,
            };
            let result = row
                .map_err(ProcessError::from)
                .and_then(|row| {
                    LedgerCommand::parse_command(
                        row.kind,
                        row.from,
                        row.to,
                        row.amount,
                        row.currency,
                    )
                    .map_err(ProcessError::from)
                })
                .and_then(|command| simulation.process(command));
            match result {
                Ok(Outcome::Executed(transaction)) => {
                    info!(line, %transaction, "operation executed")
                }
                Ok(Outcome::TimeAdvanced { credited }) => {
                    info!(line, credited, "simulated time advanced")
                }
                Err(err) => {
                    warn!(line, %err, "operation rejected");
                    (self.error_printer)(line, err);
                }
            }
        }

        let store = simulation.ledger().lock()?;
        let mut accounts = store.accounts();
        accounts.sort_by(|a, b| a.id().cmp(b.id()));
        print_accounts(self.output, accounts.into_iter().map(AccountRow::from))
    }
}
