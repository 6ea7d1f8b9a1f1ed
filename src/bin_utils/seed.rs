use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    account::{Account, CapitalizationFrequency},
    money::{Currency, Money},
    store::AccountStore,
};

/// Opens the demo accounts in `store`, all dated `opened_on`.
pub fn seed_accounts<S: AccountStore>(store: &mut S, opened_on: NaiveDate) -> Result<()> {
    let money = |amount: i64, currency| Money::new(Decimal::from(amount), currency);
    let accounts = [
        Account::savings(
            "ROBMSG100001",
            money(1000, Currency::Ron),
            Decimal::new(125, 4),
            CapitalizationFrequency::Monthly,
            opened_on,
        )?,
        Account::savings(
            "ROBMSG100002",
            money(2000, Currency::Eur),
            Decimal::new(2, 2),
            CapitalizationFrequency::Quarterly,
            opened_on,
        )?,
        Account::checking("ROBMSG200001", money(100, Currency::Ron), "4000-0000-0000-0001"),
        Account::checking("ROBMSG200002", money(300, Currency::Ron), "4000-0000-0000-0002"),
        Account::checking("ROBMSG200003", money(10, Currency::Eur), "4000-0000-0000-0003"),
        Account::checking("ROBMSG200004", money(1000, Currency::Eur), "4000-0000-0000-0004"),
    ];
    for account in accounts {
        store.add(account)?;
    }
    Ok(())
}
