use std::io::Read;

use crate::{account::AccountId, command::MenuAction};
use csv::{DeserializeRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CommandRecord {
    #[serde(rename = "op")]
    pub action: MenuAction,
    pub account: Option<AccountId>,
    pub target: Option<AccountId>,
    pub amount: Option<Decimal>,
    pub kind: Option<String>,
}

/// Parses menu commands in CSV format, one command per row.
///
/// Yields the line number together with the parsed row, so callers can
/// report where a bad row came from.
pub struct CsvCommandParser<R> {
    iter: DeserializeRecordsIntoIter<R, CommandRecord>,
}

impl<R> CsvCommandParser<R>
where
    R: Read,
{
    /// Reads the header row up front, so reported line numbers point at
    /// the row being parsed.
    pub fn new(source: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);
        reader.headers()?;

        Ok(Self {
            iter: reader.into_deserialize(),
        })
    }
}

impl<R> Iterator for CsvCommandParser<R>
where
    R: Read,
{
    type Item = (u64, Result<CommandRecord, csv::Error>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_rows_with_empty_fields() {
        let input = "op,account,target,amount,kind\n\
                     create,,,100,checking\n\
                     transfer, 1 , 2 , 40.5 ,\n\
                     exit,,,,\n";
        let rows: Vec<_> = CsvCommandParser::new(input.as_bytes())
            .unwrap()
            .map(|(line, row)| (line, row.unwrap()))
            .collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows.iter().map(|(line, _)| *line).collect::<Vec<_>>(),
            vec![2, 3, 4]
        );

        let (_, create) = &rows[0];
        assert_eq!(create.action, MenuAction::Create);
        assert_eq!(create.amount, Some(dec!(100)));
        assert_eq!(create.kind.as_deref(), Some("checking"));
        assert_eq!(create.account, None);

        let (_, transfer) = &rows[1];
        assert_eq!(transfer.action, MenuAction::Transfer);
        assert_eq!(transfer.account, Some(1));
        assert_eq!(transfer.target, Some(2));
        assert_eq!(transfer.amount, Some(dec!(40.5)));
        assert_eq!(transfer.kind, None);

        assert_eq!(rows[2].1.action, MenuAction::Exit);
    }

    #[test]
    fn unknown_action_is_an_error() {
        let input = "op,account,target,amount,kind\nsteal,1,,5,\n";
        let mut parser = CsvCommandParser::new(input.as_bytes()).unwrap();
        let (line, row) = parser.next().unwrap();
        assert_eq!(line, 2);
        assert!(row.is_err());
    }
}
