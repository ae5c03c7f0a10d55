//! Error types for the split ledger
//!
//! This module defines all error types that can occur while loading, validating
//! and settling shared expenses.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed CSV, invalid data types, etc.
//! - **Expense Errors**: Non-positive amounts, empty splits, payer outside the split
//! - **Roster Errors**: Unknown, duplicate or unnamed participants
//! - **Settlement Errors**: Conflicting updates to a settled-transfer flag

use super::expense::ExpenseId;
use super::participant::ParticipantId;
use rust_decimal::Decimal;
use std::path::Path;
use thiserror::Error;

/// Main error type for the split ledger
///
/// Every failure the library can report is a variant of this enum, so callers can
/// tell a rejected input apart from a valid (possibly empty) result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Recoverable while loading: the malformed row is skipped.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Expense amount is zero or negative
    #[error("Invalid amount {amount} for expense {expense}: amounts must be positive")]
    InvalidAmount {
        /// Expense ID
        expense: ExpenseId,
        /// The rejected amount
        amount: Decimal,
    },

    /// Expense is split among nobody
    #[error("Expense {expense} has no involved participants")]
    NoInvolvedParticipants {
        /// Expense ID
        expense: ExpenseId,
    },

    /// Payer does not take part in the split
    #[error("Payer {payer} of expense {expense} is not among the involved participants")]
    PayerNotInvolved {
        /// Expense ID
        expense: ExpenseId,
        /// Payer participant ID
        payer: ParticipantId,
    },

    /// Expense references a participant missing from the roster
    #[error("Expense {expense} references unknown participant {participant}")]
    UnknownParticipant {
        /// Expense ID
        expense: ExpenseId,
        /// The unresolved participant ID
        participant: ParticipantId,
    },

    /// Participant is not on the roster
    #[error("Participant {participant} not found")]
    ParticipantNotFound {
        /// Participant ID
        participant: ParticipantId,
    },

    /// Participant ID is already taken
    #[error("Duplicate participant ID {participant}")]
    DuplicateParticipant {
        /// Participant ID
        participant: ParticipantId,
    },

    /// Participant name is already taken
    #[error("A participant named '{name}' already exists")]
    DuplicateParticipantName {
        /// The clashing name
        name: String,
    },

    /// Participant name is blank
    #[error("Participant name must not be empty")]
    EmptyName,

    /// Expense description is blank
    #[error("Expense {expense} requires a description")]
    EmptyDescription {
        /// Expense ID
        expense: ExpenseId,
    },

    /// Expense is not in the store
    #[error("Expense {expense} not found")]
    ExpenseNotFound {
        /// Expense ID
        expense: ExpenseId,
    },

    /// Expense ID is already taken
    #[error("Duplicate expense ID {expense}")]
    DuplicateExpense {
        /// Expense ID
        expense: ExpenseId,
    },

    /// Participant owes nothing on this expense, so cannot pay it back
    #[error("Participant {participant} is not a debtor on expense {expense}")]
    NotADebtor {
        /// Expense ID
        expense: ExpenseId,
        /// Participant ID
        participant: ParticipantId,
    },

    /// A balance left the representable decimal range while applying an expense
    #[error("Balance overflow while applying expense {expense}")]
    AmountOverflow {
        /// Expense ID
        expense: ExpenseId,
    },

    /// Settled flag changed underneath a compare-and-swap
    #[error("Settled flag for transfer {from} -> {to} ({amount}) was changed concurrently")]
    SettlementConflict {
        /// Debtor participant ID
        from: ParticipantId,
        /// Creditor participant ID
        to: ParticipantId,
        /// Transfer amount
        amount: Decimal,
    },
}

// Conversion from io::Error to LedgerError
impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LedgerError
impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(expense: ExpenseId, amount: Decimal) -> Self {
        LedgerError::InvalidAmount { expense, amount }
    }

    /// Create a NoInvolvedParticipants error
    pub fn no_involved_participants(expense: ExpenseId) -> Self {
        LedgerError::NoInvolvedParticipants { expense }
    }

    /// Create a PayerNotInvolved error
    pub fn payer_not_involved(expense: ExpenseId, payer: ParticipantId) -> Self {
        LedgerError::PayerNotInvolved { expense, payer }
    }

    /// Create an UnknownParticipant error
    pub fn unknown_participant(expense: ExpenseId, participant: ParticipantId) -> Self {
        LedgerError::UnknownParticipant {
            expense,
            participant,
        }
    }

    /// Create a ParticipantNotFound error
    pub fn participant_not_found(participant: ParticipantId) -> Self {
        LedgerError::ParticipantNotFound { participant }
    }

    /// Create a DuplicateParticipant error
    pub fn duplicate_participant(participant: ParticipantId) -> Self {
        LedgerError::DuplicateParticipant { participant }
    }

    /// Create a DuplicateParticipantName error
    pub fn duplicate_participant_name(name: &str) -> Self {
        LedgerError::DuplicateParticipantName {
            name: name.to_string(),
        }
    }

    /// Create an EmptyDescription error
    pub fn empty_description(expense: ExpenseId) -> Self {
        LedgerError::EmptyDescription { expense }
    }

    /// Create an ExpenseNotFound error
    pub fn expense_not_found(expense: ExpenseId) -> Self {
        LedgerError::ExpenseNotFound { expense }
    }

    /// Create a DuplicateExpense error
    pub fn duplicate_expense(expense: ExpenseId) -> Self {
        LedgerError::DuplicateExpense { expense }
    }

    /// Create a NotADebtor error
    pub fn not_a_debtor(expense: ExpenseId, participant: ParticipantId) -> Self {
        LedgerError::NotADebtor {
            expense,
            participant,
        }
    }

    /// Create an AmountOverflow error
    pub fn amount_overflow(expense: ExpenseId) -> Self {
        LedgerError::AmountOverflow { expense }
    }

    /// Create a SettlementConflict error
    pub fn settlement_conflict(from: ParticipantId, to: ParticipantId, amount: Decimal) -> Self {
        LedgerError::SettlementConflict { from, to, amount }
    }

    /// Map a failure to open `path`, keeping "not found" distinct from other I/O errors
    pub fn open_failed(path: &Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            LedgerError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            LedgerError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), error),
            }
        }
    }
}
