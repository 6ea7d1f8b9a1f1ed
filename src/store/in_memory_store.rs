use std::collections::{HashMap, hash_map::Entry};

use crate::account::{Account, AccountId};

use super::{AccountStore, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: HashMap<AccountId, Account>,
}

impl AccountStore for InMemoryAccountStore {
    fn add(&mut self, account: Account) -> Result<(), StoreError> {
        match self.accounts.entry(account.id().to_owned()) {
            Entry::Occupied(entry) => Err(StoreError::DuplicateAccount {
                account_id: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(account);
                Ok(())
            }
        }
    }

    fn get(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.get_mut(id)
    }

    fn remove(&mut self, id: &str) -> Option<Account> {
        self.accounts.remove(id)
    }

    fn accounts(&self) -> Vec<&Account> {
        self.accounts.values().collect()
    }

    fn accounts_mut(&mut self) -> Vec<&mut Account> {
        self.accounts.values_mut().collect()
    }
}
