use chrono::{Datelike, Months, NaiveDate};
use tracing::debug;

use crate::{
    account::CapitalizationFrequency,
    store::{AccountStore, Ledger},
};

use super::{AccrualError, today};

/// How far each simulated clock moves per [`InterestAccrualEngine::advance_time`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccrualConfig {
    pub monthly_step_months: u32,
    pub quarterly_step_months: u32,
}

impl Default for AccrualConfig {
    fn default() -> Self {
        Self {
            monthly_step_months: 1,
            quarterly_step_months: 3,
        }
    }
}

impl AccrualConfig {
    /// Both clocks move one month per tick, so quarterly accounts are credited
    /// every third tick.
    pub fn calendar_aligned() -> Self {
        Self {
            monthly_step_months: 1,
            quarterly_step_months: 1,
        }
    }
}

/// Capitalizes interest on savings accounts as simulated time passes.
///
/// Two clocks advance independently, one per capitalization frequency. An
/// account is credited when its next due date (last capitalization plus one
/// period) falls in the same calendar month as its frequency's new clock value.
/// Once credited, the account's last capitalization date becomes that clock
/// value, so the same tick can never match it again.
pub struct InterestAccrualEngine<S> {
    ledger: Ledger<S>,
    monthly_clock: NaiveDate,
    quarterly_clock: NaiveDate,
    config: AccrualConfig,
}

impl<S: AccountStore> InterestAccrualEngine<S> {
    pub fn new(ledger: Ledger<S>) -> Self {
        Self::starting_at(ledger, today(), AccrualConfig::default())
    }

    pub fn starting_at(ledger: Ledger<S>, start: NaiveDate, config: AccrualConfig) -> Self {
        Self {
            ledger,
            monthly_clock: start,
            quarterly_clock: start,
            config,
        }
    }

    pub fn monthly_clock(&self) -> NaiveDate {
        self.monthly_clock
    }

    pub fn quarterly_clock(&self) -> NaiveDate {
        self.quarterly_clock
    }

    /// Advances both clocks by one step and returns how many accounts were credited.
    pub fn advance_time(&mut self) -> Result<usize, AccrualError> {
        let next_monthly = add_months(self.monthly_clock, self.config.monthly_step_months)?;
        let next_quarterly = add_months(self.quarterly_clock, self.config.quarterly_step_months)?;

        let mut store = self.ledger.lock()?;
        let mut accounts = store.accounts_mut();

        // compute every capitalization first, so an error cannot leave the tick half applied
        let mut due = Vec::new();
        for (idx, account) in accounts.iter().enumerate() {
            let Some(terms) = account.savings_terms() else {
                continue;
            };
            let tick = match terms.frequency {
                CapitalizationFrequency::Monthly => next_monthly,
                CapitalizationFrequency::Quarterly => next_quarterly,
            };
            let next_due = add_months(terms.last_interest_applied, terms.frequency.months())?;
            if !same_month(next_due, tick) {
                continue;
            }
            if let Some(event) = account.handle_interest(tick)? {
                due.push((idx, event));
            }
        }

        let credited = due.len();
        for (idx, event) in due {
            let account = &mut accounts[idx];
            account.apply(&event);
            debug!(
                account = account.id(),
                interest = %event.amount(),
                balance = %account.balance(),
                "interest capitalized"
            );
        }

        self.monthly_clock = next_monthly;
        self.quarterly_clock = next_quarterly;
        debug!(
            monthly_clock = %self.monthly_clock,
            quarterly_clock = %self.quarterly_clock,
            credited,
            "simulated time advanced"
        );
        Ok(credited)
    }
}

fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate, AccrualError> {
    date.checked_add_months(Months::new(months))
        .ok_or(AccrualError::ClockOutOfRange { date, months })
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::{
        account::{Account, AccountError},
        money::{Currency, Money},
        store::in_memory_store::InMemoryAccountStore,
    };

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn savings(
        id: &str,
        amount: i64,
        frequency: CapitalizationFrequency,
        opened_on: NaiveDate,
    ) -> Account {
        Account::savings(
            id,
            Money::new(Decimal::from(amount), Currency::Ron),
            Decimal::new(125, 4),
            frequency,
            opened_on,
        )
        .unwrap()
    }

    fn ledger(accounts: Vec<Account>) -> Ledger<InMemoryAccountStore> {
        let mut store = InMemoryAccountStore::default();
        for account in accounts {
            store.add(account).unwrap();
        }
        Ledger::new(store)
    }

    fn balance(ledger: &Ledger<InMemoryAccountStore>, id: &str) -> Decimal {
        ledger.lock().unwrap().get(id).unwrap().balance().amount
    }

    fn rate() -> Decimal {
        Decimal::ONE + Decimal::new(125, 4)
    }

    #[test]
    fn monthly_interest_is_applied_once_per_tick() {
        let start = date(2024, 1, 15);
        let ledger = ledger(vec![
            savings("S", 1000, CapitalizationFrequency::Monthly, start),
            Account::checking("A", Money::new(Decimal::from(100), Currency::Ron), "card"),
        ]);
        let mut engine =
            InterestAccrualEngine::starting_at(ledger.clone(), start, AccrualConfig::default());

        assert_eq!(engine.advance_time().unwrap(), 1);
        assert_eq!(balance(&ledger, "S"), Decimal::from(1000) * rate());
        assert_eq!(
            ledger.lock().unwrap().get("S").unwrap().savings_terms().unwrap().last_interest_applied,
            date(2024, 2, 15)
        );

        assert_eq!(engine.advance_time().unwrap(), 1);
        assert_eq!(balance(&ledger, "S"), Decimal::from(1000) * rate() * rate());
        assert_eq!(balance(&ledger, "A"), Decimal::from(100));
        assert_eq!(engine.monthly_clock(), date(2024, 3, 15));
    }

    #[test]
    fn quarterly_clock_moves_a_quarter_per_tick_by_default() {
        let start = date(2024, 1, 15);
        let ledger = ledger(vec![savings("Q", 2000, CapitalizationFrequency::Quarterly, start)]);
        let mut engine =
            InterestAccrualEngine::starting_at(ledger.clone(), start, AccrualConfig::default());

        engine.advance_time().unwrap();
        assert_eq!(engine.quarterly_clock(), date(2024, 4, 15));
        assert_eq!(balance(&ledger, "Q"), Decimal::from(2000) * rate());
        engine.advance_time().unwrap();
        assert_eq!(balance(&ledger, "Q"), Decimal::from(2000) * rate() * rate());
    }

    #[test]
    fn calendar_aligned_quarterly_gating() {
        let start = date(2024, 1, 15);
        let ledger = ledger(vec![
            savings("Q", 2000, CapitalizationFrequency::Quarterly, start),
            savings("M", 1000, CapitalizationFrequency::Monthly, start),
        ]);
        let mut engine = InterestAccrualEngine::starting_at(
            ledger.clone(),
            start,
            AccrualConfig::calendar_aligned(),
        );

        assert_eq!(engine.advance_time().unwrap(), 1);
        assert_eq!(engine.advance_time().unwrap(), 1);
        assert_eq!(balance(&ledger, "Q"), Decimal::from(2000));
        assert_eq!(engine.advance_time().unwrap(), 2);
        assert_eq!(balance(&ledger, "Q"), Decimal::from(2000) * rate());

        for _ in 0..2 {
            engine.advance_time().unwrap();
        }
        assert_eq!(balance(&ledger, "Q"), Decimal::from(2000) * rate());
        engine.advance_time().unwrap();
        assert_eq!(balance(&ledger, "Q"), Decimal::from(2000) * rate() * rate());
    }

    #[test]
    fn account_opened_later_waits_for_its_due_month() {
        let start = date(2024, 1, 15);
        let ledger = ledger(vec![savings(
            "S",
            1000,
            CapitalizationFrequency::Monthly,
            date(2024, 3, 1),
        )]);
        let mut engine =
            InterestAccrualEngine::starting_at(ledger.clone(), start, AccrualConfig::default());

        assert_eq!(engine.advance_time().unwrap(), 0);
        assert_eq!(engine.advance_time().unwrap(), 0);
        assert_eq!(engine.advance_time().unwrap(), 1);
        assert_eq!(
            ledger.lock().unwrap().get("S").unwrap().savings_terms().unwrap().last_interest_applied,
            date(2024, 4, 15)
        );
    }

    #[test]
    fn accounts_behind_the_clock_are_not_caught_up() {
        let start = date(2024, 1, 15);
        let ledger = ledger(vec![savings(
            "S",
            1000,
            CapitalizationFrequency::Monthly,
            date(2023, 6, 1),
        )]);
        let mut engine =
            InterestAccrualEngine::starting_at(ledger.clone(), start, AccrualConfig::default());
        for _ in 0..3 {
            assert_eq!(engine.advance_time().unwrap(), 0);
        }
        assert_eq!(balance(&ledger, "S"), Decimal::from(1000));
    }

    #[test]
    fn end_of_month_dates_are_clamped() {
        let start = date(2024, 1, 31);
        let ledger = ledger(vec![savings("S", 1000, CapitalizationFrequency::Monthly, start)]);
        let mut engine =
            InterestAccrualEngine::starting_at(ledger.clone(), start, AccrualConfig::default());

        assert_eq!(engine.advance_time().unwrap(), 1);
        assert_eq!(engine.monthly_clock(), date(2024, 2, 29));
        assert_eq!(engine.advance_time().unwrap(), 1);
        assert_eq!(engine.monthly_clock(), date(2024, 3, 29));
    }

    #[test]
    fn balance_overflow_fails_the_whole_tick() {
        let start = date(2024, 1, 15);
        let ledger = ledger(vec![
            savings("S", 1000, CapitalizationFrequency::Monthly, start),
            Account::savings(
                "MAX",
                Money::new(Decimal::MAX, Currency::Ron),
                Decimal::new(125, 4),
                CapitalizationFrequency::Monthly,
                start,
            )
            .unwrap(),
        ]);
        let mut engine =
            InterestAccrualEngine::starting_at(ledger.clone(), start, AccrualConfig::default());

        let err = engine.advance_time().unwrap_err();
        assert!(matches!(
            err,
            AccrualError::Account(AccountError::BalanceOutOfRange { .. })
        ));
        assert_eq!(balance(&ledger, "S"), Decimal::from(1000));
        assert_eq!(balance(&ledger, "MAX"), Decimal::MAX);
        assert_eq!(engine.monthly_clock(), start);
    }

    #[test]
    fn clock_overflow_is_reported_without_crediting() {
        let start = NaiveDate::MAX;
        let ledger = ledger(vec![savings("S", 1000, CapitalizationFrequency::Monthly, start)]);
        let mut engine =
            InterestAccrualEngine::starting_at(ledger.clone(), start, AccrualConfig::default());

        let err = engine.advance_time().unwrap_err();
        assert_eq!(
            err,
            AccrualError::ClockOutOfRange {
                date: NaiveDate::MAX,
                months: 1
            }
        );
        assert_eq!(engine.monthly_clock(), NaiveDate::MAX);
        assert_eq!(balance(&ledger, "S"), Decimal::from(1000));
    }
}
