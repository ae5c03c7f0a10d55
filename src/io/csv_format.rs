//! CSV format handling for ledger input and report output
//!
//! This module centralizes all CSV format concerns, providing:
//! - Row structures for participants, expenses and settled flags
//! - Conversion from CSV rows to domain types
//! - Balance and transfer report serialization
//!
//! All functions are pure (no file I/O) for easy testing.
//!
//! # Input Formats
//!
//! ```text
//! participants: id,name
//! expenses:     id,description,amount,payer,involved,timestamp[,repaid]
//! settled:      split,from,to,amount
//! ```
//!
//! `involved` and `repaid` are `;`-separated participant id lists.

use crate::core::{Roster, SettlementKey};
use crate::types::{
    round_cents, BalanceMap, Expense, ExpenseId, LedgerError, Participant, ParticipantId,
    Transfer,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// A deserializable CSV row that converts into a domain value
pub trait CsvRow: DeserializeOwned {
    type Output;

    /// Convert the raw row, describing what is wrong on failure
    fn convert(self) -> Result<Self::Output, String>;
}

/// Participants file row: `id,name`
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ParticipantCsvRecord {
    pub id: ParticipantId,
    pub name: String,
}

impl CsvRow for ParticipantCsvRecord {
    type Output = Participant;

    fn convert(self) -> Result<Participant, String> {
        Ok(Participant::new(self.id, self.name))
    }
}

/// Expenses file row
///
/// The amount is kept as text so a bad value produces a message naming the
/// expense rather than a bare deserializer error.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ExpenseCsvRecord {
    pub id: ExpenseId,
    pub description: String,
    pub amount: String,
    pub payer: ParticipantId,
    pub involved: String,
    pub timestamp: String,
    #[serde(default)]
    pub repaid: Option<String>,
}

impl CsvRow for ExpenseCsvRecord {
    type Output = Expense;

    fn convert(self) -> Result<Expense, String> {
        let amount = Decimal::from_str(self.amount.trim())
            .map_err(|_| format!("Invalid amount '{}' for expense {}", self.amount, self.id))?;

        let involved = parse_id_list(&self.involved, "involved", self.id)?;
        let repaid = match &self.repaid {
            Some(list) => parse_id_list(list, "repaid", self.id)?.into_iter().collect(),
            None => Default::default(),
        };

        Ok(Expense {
            id: self.id,
            description: self.description.trim().to_string(),
            amount,
            payer: self.payer,
            involved,
            timestamp: self.timestamp.trim().to_string(),
            repaid,
        })
    }
}

/// Settled-flags file row: `split,from,to,amount`
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SettledCsvRecord {
    pub split: String,
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: String,
}

impl CsvRow for SettledCsvRecord {
    type Output = SettlementKey;

    fn convert(self) -> Result<SettlementKey, String> {
        let amount = Decimal::from_str(self.amount.trim()).map_err(|_| {
            format!(
                "Invalid amount '{}' for settled transfer {} -> {}",
                self.amount, self.from, self.to
            )
        })?;
        Ok(SettlementKey::new(self.split.trim(), self.from, self.to, amount))
    }
}

/// Parse a `;`-separated list of participant ids
///
/// Blank entries are ignored, so `""` is the empty list.
pub fn parse_id_list(
    list: &str,
    field: &str,
    expense: ExpenseId,
) -> Result<Vec<ParticipantId>, String> {
    list.split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse::<ParticipantId>().map_err(|_| {
                format!(
                    "Invalid participant id '{}' in {} list of expense {}",
                    item, field, expense
                )
            })
        })
        .collect()
}

/// Format money with exactly two decimals, never as `-0.00`
pub fn format_money(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    if rounded.is_zero() {
        return "0.00".to_string();
    }
    format!("{:.2}", rounded)
}

/// Write balances in CSV format
///
/// Writes one row per participant with columns: participant, name, balance,
/// on_roster. Rows follow ascending participant id. Participants that are no
/// longer on the roster show their id as name and `on_roster = false`.
pub fn write_balances_csv(
    balances: &BalanceMap,
    roster: &Roster,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["participant", "name", "balance", "on_roster"])?;

    for (id, balance) in balances {
        writer.write_record(&[
            id.to_string(),
            roster.display_name(*id),
            format_money(*balance),
            roster.contains(*id).to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write settling transfers in CSV format
///
/// Columns: from, from_name, to, to_name, amount, settled. Rows keep the order
/// the simplifier produced them in.
pub fn write_transfers_csv(
    transfers: &[(Transfer, bool)],
    roster: &Roster,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["from", "from_name", "to", "to_name", "amount", "settled"])?;

    for (transfer, settled) in transfers {
        writer.write_record(&[
            transfer.from.to_string(),
            roster.display_name(transfer.from),
            transfer.to.to_string(),
            roster.display_name(transfer.to),
            format_money(transfer.amount),
            settled.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
