//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `participant`: Participant identity
//! - `expense`: Expense records and identifiers
//! - `settlement`: Balance maps, transfers and cent rounding
//! - `error`: Error types for the ledger

pub mod error;
pub mod expense;
pub mod participant;
pub mod settlement;

pub use error::LedgerError;
pub use expense::{Expense, ExpenseId, NewExpense};
pub use participant::{Participant, ParticipantId};
pub use settlement::{round_cents, BalanceMap, Transfer, SETTLED_EPSILON};
