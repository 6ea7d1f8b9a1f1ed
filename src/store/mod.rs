use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use crate::account::{Account, AccountId};

pub mod in_memory_store;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Account {account_id} already exists")]
    DuplicateAccount { account_id: AccountId },
    #[error("Ledger is unusable, an operation panicked while holding it")]
    Poisoned,
}

/// Keyed collection of accounts consumed by the engines.
pub trait AccountStore {
    /// Adds an account under its own id. Ids are unique for the lifetime of the store.
    fn add(&mut self, account: Account) -> Result<(), StoreError>;

    fn get(&self, id: &str) -> Option<&Account>;

    fn get_mut(&mut self, id: &str) -> Option<&mut Account>;

    fn exists(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    fn remove(&mut self, id: &str) -> Option<Account>;

    /// Snapshot of every account; order carries no meaning.
    fn accounts(&self) -> Vec<&Account>;

    fn accounts_mut(&mut self) -> Vec<&mut Account>;
}

/// Shared handle to a store. Engines built from clones of the same ledger see
/// the same accounts, and every operation runs under one store-wide lock.
#[derive(Debug, Default)]
pub struct Ledger<S> {
    store: Arc<Mutex<S>>,
}

impl<S> Clone for Ledger<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: AccountStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Fails once any holder has panicked, since the accounts may be inconsistent.
    pub fn lock(&self) -> Result<MutexGuard<'_, S>, StoreError> {
        self.store.lock().map_err(|_| StoreError::Poisoned)
    }
}
