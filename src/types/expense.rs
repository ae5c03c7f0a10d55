//! Expense-related types for the split ledger
//!
//! This module defines the expense record: one bill paid by a single participant
//! and divided equally among the involved participants.

use super::participant::ParticipantId;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// Expense identifier
pub type ExpenseId = u32;

/// A recorded shared expense
///
/// The payer is expected to be one of `involved`; the payer's own share then
/// nets out, leaving them owed `amount - share`.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// Unique expense identifier
    pub id: ExpenseId,

    /// Free-text description ("Dinner", "Taxi")
    pub description: String,

    /// Total amount paid, always positive for a valid expense
    pub amount: Decimal,

    /// Who paid the bill
    pub payer: ParticipantId,

    /// Who shares the bill
    ///
    /// Order is irrelevant. A duplicated id is charged once per occurrence.
    pub involved: Vec<ParticipantId>,

    /// When the expense was recorded (ISO-8601 text, opaque to the ledger)
    pub timestamp: String,

    /// Debtors that have paid their share back to the payer
    ///
    /// Display state only; never read by balance calculation.
    pub repaid: BTreeSet<ParticipantId>,
}

impl Expense {
    /// Each involved participant's share of the amount
    ///
    /// Returns `None` when nobody is involved.
    pub fn share(&self) -> Option<Decimal> {
        if self.involved.is_empty() {
            return None;
        }
        Some(self.amount / Decimal::from(self.involved.len()))
    }

    /// Whether `participant` takes part in the split
    pub fn involves(&self, participant: ParticipantId) -> bool {
        self.involved.contains(&participant)
    }

    /// Whether `participant` has paid their share back
    pub fn is_repaid_by(&self, participant: ParticipantId) -> bool {
        self.repaid.contains(&participant)
    }
}

/// Expense fields supplied by a caller before an id is assigned
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub description: String,
    pub amount: Decimal,
    pub payer: ParticipantId,
    pub involved: Vec<ParticipantId>,
    pub timestamp: String,
}

impl NewExpense {
    /// Attach an id, producing a stored expense with no repaid flags
    pub fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            description: self.description,
            amount: self.amount,
            payer: self.payer,
            involved: self.involved,
            timestamp: self.timestamp,
            repaid: BTreeSet::new(),
        }
    }
}
