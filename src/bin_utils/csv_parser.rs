use std::io::Read;

use crate::{command::OperationKind, money::Currency};
use csv::{DeserializeRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<Currency>,
}

/// Parses an operation list in CSV format, yielding each row with its line number.
pub struct CsvOperationParser<R> {
    iter: DeserializeRecordsIntoIter<R, Operation>,
}

impl<R> CsvOperationParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvOperationParser<R>
where
    R: Read,
{
    type Item = (u64, csv::Result<Operation>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}
