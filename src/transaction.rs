use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{account::AccountId, money::Money};

pub type TransactionId = Uuid;

/// Immutable record of a transfer or withdrawal.
///
/// A withdrawal is recorded with identical source and destination ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    id: TransactionId,
    from_account_id: AccountId,
    to_account_id: AccountId,
    amount: Money,
    date: NaiveDate,
}

impl Transaction {
    pub(crate) fn new(
        from_account_id: AccountId,
        to_account_id: AccountId,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            from_account_id,
            to_account_id,
            amount,
            date,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn from_account_id(&self) -> &str {
        &self.from_account_id
    }

    pub fn to_account_id(&self) -> &str {
        &self.to_account_id
    }

    /// Amount as credited: destination currency for transfers, account currency for withdrawals.
    pub fn amount(&self) -> &Money {
        &self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_withdrawal(&self) -> bool {
        self.from_account_id == self.to_account_id
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} {} on {}",
            self.id, self.from_account_id, self.to_account_id, self.amount, self.date
        )
    }
}
