use std::io::Write;

use crate::{account::Account, money::Currency};
use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AccountRow<'a> {
    pub account: &'a str,
    pub kind: &'static str,
    pub balance: Decimal,
    pub currency: Currency,
    pub transactions: usize,
}

impl<'a> From<&'a Account> for AccountRow<'a> {
    fn from(acc: &'a Account) -> Self {
        Self {
            account: acc.id(),
            kind: acc.kind().name(),
            balance: acc.balance().amount.normalize(),
            currency: acc.currency(),
            transactions: acc.transactions().len(),
        }
    }
}

pub fn print_accounts<'a, W>(
    output: &mut W,
    accounts: impl Iterator<Item = AccountRow<'a>>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for acc in accounts {
        if let Err(err) = writer.serialize(acc) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
