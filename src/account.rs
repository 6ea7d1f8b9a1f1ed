use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    money::{Currency, Money},
    transaction::Transaction,
};

pub type AccountId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapitalizationFrequency {
    Monthly,
    Quarterly,
}

impl CapitalizationFrequency {
    /// Length of one capitalization period.
    pub fn months(self) -> u32 {
        match self {
            CapitalizationFrequency::Monthly => 1,
            CapitalizationFrequency::Quarterly => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavingsTerms {
    pub interest_rate: Decimal,
    pub frequency: CapitalizationFrequency,
    /// Month of the last capitalization, initially the opening date.
    pub last_interest_applied: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountKind {
    Checking { card: String },
    Savings(SavingsTerms),
}

impl AccountKind {
    pub fn name(&self) -> &'static str {
        match self {
            AccountKind::Checking { .. } => "checking",
            AccountKind::Savings(_) => "savings",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum AccountEventKind {
    Debited,
    Credited,
    InterestCapitalized { applied_on: NaiveDate },
}

/// A validated balance change. The resulting balance is computed when the event
/// is created, so applying it cannot fail.
#[derive(Debug)]
pub struct AccountEvent {
    amount: Decimal,
    balance_after: Decimal,
    kind: AccountEventKind,
    transaction: Option<Arc<Transaction>>,
}

impl AccountEvent {
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn balance_after(&self) -> Decimal {
        self.balance_after
    }

    pub fn kind(&self) -> &AccountEventKind {
        &self.kind
    }

    /// Records `transaction` in the history of the account this event is applied to.
    pub(crate) fn with_transaction(self, transaction: Arc<Transaction>) -> Self {
        Self {
            transaction: Some(transaction),
            ..self
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Insufficient funds in account {account_id}: {available} available, {requested} requested")]
    InsufficientFunds {
        account_id: AccountId,
        available: Decimal,
        requested: Decimal,
    },
    #[error("Account {account_id} holds {expected}, cannot withdraw {actual}")]
    CurrencyMismatch {
        account_id: AccountId,
        expected: Currency,
        actual: Currency,
    },
    #[error("Interest rate must not be negative, got {rate}")]
    InvalidInterestRate { rate: Decimal },
    #[error("Balance of account {account_id} cannot represent a change of {amount}")]
    BalanceOutOfRange {
        account_id: AccountId,
        amount: Decimal,
    },
}

/// A ledger account. Balance changes only through [`Account::apply`], and only
/// events produced by the `handle_*` methods can be applied.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    balance: Money,
    transactions: Vec<Arc<Transaction>>,
    kind: AccountKind,
}

impl Account {
    pub fn checking(id: impl Into<AccountId>, balance: Money, card: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            balance,
            transactions: Vec::new(),
            kind: AccountKind::Checking { card: card.into() },
        }
    }

    pub fn savings(
        id: impl Into<AccountId>,
        balance: Money,
        interest_rate: Decimal,
        frequency: CapitalizationFrequency,
        opened_on: NaiveDate,
    ) -> Result<Self, AccountError> {
        if interest_rate < Decimal::ZERO {
            return Err(AccountError::InvalidInterestRate {
                rate: interest_rate,
            });
        }
        Ok(Self {
            id: id.into(),
            balance,
            transactions: Vec::new(),
            kind: AccountKind::Savings(SavingsTerms {
                interest_rate,
                frequency,
                last_interest_applied: opened_on,
            }),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn balance(&self) -> &Money {
        &self.balance
    }

    pub fn currency(&self) -> Currency {
        self.balance.currency
    }

    pub fn transactions(&self) -> &[Arc<Transaction>] {
        &self.transactions
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    pub fn savings_terms(&self) -> Option<&SavingsTerms> {
        match &self.kind {
            AccountKind::Savings(terms) => Some(terms),
            AccountKind::Checking { .. } => None,
        }
    }

    pub fn is_savings(&self) -> bool {
        self.savings_terms().is_some()
    }

    pub fn apply(&mut self, event: &AccountEvent) {
        self.balance.amount = event.balance_after;
        if let AccountEventKind::InterestCapitalized { applied_on } = event.kind {
            if let AccountKind::Savings(terms) = &mut self.kind {
                terms.last_interest_applied = applied_on;
            }
        }
        if let Some(transaction) = &event.transaction {
            self.transactions.push(Arc::clone(transaction));
        }
    }

    /// Validates a debit of `amount`, expressed in this account's currency.
    pub fn handle_debit(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        if self.balance.amount < amount {
            return Err(AccountError::InsufficientFunds {
                account_id: self.id.clone(),
                available: self.balance.amount,
                requested: amount,
            });
        }
        let balance_after = self.checked_balance(self.balance.amount.checked_sub(amount), amount)?;
        Ok(AccountEvent {
            amount,
            balance_after,
            kind: AccountEventKind::Debited,
            transaction: None,
        })
    }

    pub fn handle_credit(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        let balance_after = self.checked_balance(self.balance.amount.checked_add(amount), amount)?;
        Ok(AccountEvent {
            amount,
            balance_after,
            kind: AccountEventKind::Credited,
            transaction: None,
        })
    }

    /// Withdrawals never convert, so the requested currency must match the balance.
    pub fn handle_withdrawal(&self, amount: &Money) -> Result<AccountEvent, AccountError> {
        let event = self.handle_debit(amount.amount)?;
        if amount.currency != self.balance.currency {
            return Err(AccountError::CurrencyMismatch {
                account_id: self.id.clone(),
                expected: self.balance.currency,
                actual: amount.currency,
            });
        }
        Ok(event)
    }

    /// Capitalizes one period of interest on the current balance. Checking accounts earn nothing.
    pub fn handle_interest(
        &self,
        applied_on: NaiveDate,
    ) -> Result<Option<AccountEvent>, AccountError> {
        let Some(terms) = self.savings_terms() else {
            return Ok(None);
        };
        let interest = self
            .balance
            .amount
            .checked_mul(terms.interest_rate)
            .ok_or_else(|| AccountError::BalanceOutOfRange {
                account_id: self.id.clone(),
                amount: terms.interest_rate,
            })?;
        let balance_after =
            self.checked_balance(self.balance.amount.checked_add(interest), interest)?;
        Ok(Some(AccountEvent {
            amount: interest,
            balance_after,
            kind: AccountEventKind::InterestCapitalized { applied_on },
            transaction: None,
        }))
    }

    fn checked_balance(
        &self,
        balance: Option<Decimal>,
        amount: Decimal,
    ) -> Result<Decimal, AccountError> {
        balance.ok_or_else(|| AccountError::BalanceOutOfRange {
            account_id: self.id.clone(),
            amount,
        })
    }
}
