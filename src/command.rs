use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    account::AccountId,
    money::{Currency, Money},
};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Transfer,
    Withdraw,
    Tick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommand {
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Money,
    },
    Withdraw {
        account: AccountId,
        amount: Money,
    },
    Tick,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Account `{field}` is required for {kind:?}")]
    AccountRequired {
        kind: OperationKind,
        field: &'static str,
    },
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: OperationKind },
    #[error("Currency is required for {kind:?}")]
    CurrencyRequired { kind: OperationKind },
}

impl LedgerCommand {
    /// Builds a command from loosely typed operation fields. Withdrawals read
    /// their account from `from`. Amount values are validated by the engines.
    pub fn parse_command(
        kind: OperationKind,
        from: Option<AccountId>,
        to: Option<AccountId>,
        amount: Option<Decimal>,
        currency: Option<Currency>,
    ) -> Result<Self, CommandError> {
        match kind {
            OperationKind::Transfer => {
                let from = Self::require_account(kind, "from", from)?;
                let to = Self::require_account(kind, "to", to)?;
                Ok(Self::Transfer {
                    from,
                    to,
                    amount: Self::require_money(kind, amount, currency)?,
                })
            }
            OperationKind::Withdraw => Ok(Self::Withdraw {
                account: Self::require_account(kind, "from", from)?,
                amount: Self::require_money(kind, amount, currency)?,
            }),
            OperationKind::Tick => Ok(Self::Tick),
        }
    }

    fn require_account(
        kind: OperationKind,
        field: &'static str,
        id: Option<AccountId>,
    ) -> Result<AccountId, CommandError> {
        match id {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(CommandError::AccountRequired { kind, field }),
        }
    }

    fn require_money(
        kind: OperationKind,
        amount: Option<Decimal>,
        currency: Option<Currency>,
    ) -> Result<Money, CommandError> {
        let Some(amount) = amount else {
            return Err(CommandError::AmountRequired { kind });
        };
        let Some(currency) = currency else {
            return Err(CommandError::CurrencyRequired { kind });
        };
        Ok(Money::new(amount, currency))
    }
}
