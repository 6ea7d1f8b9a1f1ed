use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::{
    account::Account,
    money::Money,
    store::{AccountStore, Ledger},
    transaction::Transaction,
};

use super::{TransactionError, today};

/// Moves money between accounts of a [`Ledger`].
///
/// Every precondition, including the arithmetic of the new balances, is checked
/// before the first balance or history write, so a failed call leaves the ledger
/// untouched.
pub struct TransactionEngine<S> {
    ledger: Ledger<S>,
}

impl<S: AccountStore> TransactionEngine<S> {
    pub fn new(ledger: Ledger<S>) -> Self {
        Self { ledger }
    }

    /// Transfers `amount`, read in the source account's currency, converting it
    /// into the destination currency when the two differ. The returned transaction
    /// holds the converted amount and is appended to both histories.
    pub fn transfer(
        &self,
        from_id: &str,
        to_id: &str,
        amount: Money,
    ) -> Result<Arc<Transaction>, TransactionError> {
        let mut store = self.ledger.lock()?;
        let from = store
            .get(from_id)
            .ok_or_else(|| TransactionError::not_found(from_id))?;
        let to = store
            .get(to_id)
            .ok_or_else(|| TransactionError::not_found(to_id))?;

        if from_id == to_id {
            return Err(TransactionError::SameAccountTransfer {
                account_id: from_id.to_owned(),
            });
        }
        if from.is_savings() {
            return Err(TransactionError::UnsupportedAccountPair {
                from: from.kind().name(),
                to: to.kind().name(),
            });
        }
        ensure_positive(&amount)?;
        // compared in source currency, before conversion
        let debit = from.handle_debit(amount.amount)?;
        let credited = Money::new(amount.amount, from.currency()).convert_to(to.currency())?;
        let credit = to.handle_credit(credited.amount)?;

        let transaction = Arc::new(Transaction::new(
            from_id.to_owned(),
            to_id.to_owned(),
            credited,
            today(),
        ));
        let debit = debit.with_transaction(Arc::clone(&transaction));
        let credit = credit.with_transaction(Arc::clone(&transaction));

        account_mut(&mut *store, from_id)?.apply(&debit);
        account_mut(&mut *store, to_id)?.apply(&credit);

        info!(%transaction, debited = %amount.amount, "transfer executed");
        Ok(transaction)
    }

    /// Withdraws `amount` in the account's own currency.
    ///
    /// The resulting transaction is returned to the caller but not recorded in the
    /// account's history.
    pub fn withdraw(
        &self,
        account_id: &str,
        amount: Money,
    ) -> Result<Arc<Transaction>, TransactionError> {
        let mut store = self.ledger.lock()?;
        let account = store
            .get(account_id)
            .ok_or_else(|| TransactionError::not_found(account_id))?;
        ensure_positive(&amount)?;
        let debit = account.handle_withdrawal(&amount)?;

        let transaction = Arc::new(Transaction::new(
            account_id.to_owned(),
            account_id.to_owned(),
            amount,
            today(),
        ));
        account_mut(&mut *store, account_id)?.apply(&debit);

        info!(%transaction, "withdrawal executed");
        Ok(transaction)
    }

    pub fn check_funds(&self, account_id: &str) -> Result<Money, TransactionError> {
        let store = self.ledger.lock()?;
        store
            .get(account_id)
            .map(|account| account.balance().clone())
            .ok_or_else(|| TransactionError::not_found(account_id))
    }

    /// Copy of the account's history, oldest first.
    pub fn retrieve_transactions(
        &self,
        account_id: &str,
    ) -> Result<Vec<Arc<Transaction>>, TransactionError> {
        let store = self.ledger.lock()?;
        store
            .get(account_id)
            .map(|account| account.transactions().to_vec())
            .ok_or_else(|| TransactionError::not_found(account_id))
    }
}

fn ensure_positive(amount: &Money) -> Result<(), TransactionError> {
    if amount.amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(TransactionError::InvalidAmount {
            amount: amount.amount,
        })
    }
}

fn account_mut<'a, S: AccountStore>(
    store: &'a mut S,
    id: &str,
) -> Result<&'a mut Account, TransactionError> {
    store
        .get_mut(id)
        .ok_or_else(|| TransactionError::not_found(id))
}
