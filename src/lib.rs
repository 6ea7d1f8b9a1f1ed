/// Currencies, money values and the static exchange-rate table.
pub mod money;

/// Immutable transfer and withdrawal records.
pub mod transaction;

/// Checking and savings accounts.
/// Balances are modified using events, which are created by validating requests
pub mod account;

/// Account store interface, plus "in memory" implementation, and the shared
/// [`store::Ledger`] handle the engines operate on.
pub mod store;

/// Transaction engine (transfers, withdrawals, lookups) and the interest
/// accrual engine that advances simulated time.
pub mod engine;

/// Parse loosely typed operations into commands that are later executed by [`simulation`].
pub mod command;

/// Dispatches commands to both engines over a single ledger.
pub mod simulation;

/// Demo driver: seed accounts, replay an operations CSV, print balances.
/// Lives in the library so integration tests can run it end to end.
pub mod bin_utils;
