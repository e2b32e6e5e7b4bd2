use std::io::Write;

use crate::account::{AccountId, AccountKind};
use anyhow::Context;
use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AccountRow {
    pub account: AccountId,
    pub kind: AccountKind,
    pub balance: Decimal,
    pub closed: bool,
}

pub fn print_accounts<W>(
    output: &mut W,
    accounts: impl Iterator<Item = AccountRow>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for acc in accounts {
        let account = acc.account;
        writer
            .serialize(acc)
            .with_context(|| format!("Failed to write account {account} to CSV"))?;
    }
    writer.flush().context("Failed to flush CSV writer")?;
    Ok(())
}
