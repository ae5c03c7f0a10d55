//! Core business logic module
//!
//! This module contains the ledger and settlement components:
//! - `balance` - Net balance per participant from a set of expenses
//! - `simplify` - Greedy debt simplification into settling transfers
//! - `roster` - Participants of a split
//! - `expense_store` - Recorded expenses of a split
//! - `ledger` - Orchestration of roster and expenses for one split
//! - `settlement_tracker` - Concurrent table of "transfer settled" flags

pub mod balance;
pub mod expense_store;
pub mod ledger;
pub mod roster;
pub mod settlement_tracker;
pub mod simplify;

pub use balance::{calculate_balances, BalanceCalculator, UnknownParticipantPolicy};
pub use expense_store::{DetachReport, ExpenseStore};
pub use ledger::Ledger;
pub use roster::Roster;
pub use settlement_tracker::{SettlementKey, SettlementTracker};
pub use simplify::{apply_transfers, min_transfers};
