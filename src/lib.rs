//! Split Ledger Library
//! # Overview
//!
//! This library tracks expenses shared within a group, computes each member's net
//! balance, and proposes a short list of transfers that settles everyone up.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Participant, Expense, BalanceMap, Transfer, LedgerError)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::balance`] - Net balance per participant from equal-split expenses
//!   - [`core::simplify`] - Greedy debt simplification into transfers
//!   - [`core::roster`] - Participant membership and naming
//!   - [`core::expense_store`] - Expense records and participant-removal cascade
//!   - [`core::ledger`] - One split: roster plus expenses, with validation
//!   - [`core::settlement_tracker`] - Concurrent settled flags for suggested transfers
//! - [`io`] - CSV input and report output
//! - [`strategy`] - Sync and async reporting pipelines
//!
//! # Money
//!
//! Amounts are `rust_decimal::Decimal`. Shares are computed exactly and only
//! transfer amounts and printed values are rounded to cents. A balance within
//! [`types::SETTLED_EPSILON`] (one cent) of zero counts as settled.
//!
//! # Balances
//!
//! For every expense the payer is credited the full amount and each involved
//! participant, the payer included, is debited one equal share. A positive
//! balance means the group owes that participant money.

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{
    apply_transfers, calculate_balances, min_transfers, BalanceCalculator, Ledger, Roster,
    SettlementTracker, UnknownParticipantPolicy,
};
pub use io::{write_balances_csv, write_transfers_csv};
pub use types::{
    BalanceMap, Expense, ExpenseId, LedgerError, NewExpense, Participant, ParticipantId,
    Transfer,
};
