//! Split ledger
//!
//! This module provides the Ledger that orchestrates one split by coordinating
//! between the Roster and ExpenseStore components.
//!
//! The ledger enforces the rules the balance calculator relies on:
//! - Expenses have a description, a positive amount and at least one participant
//! - The payer is one of the involved participants
//! - Newly recorded expenses only reference participants on the roster
//! - Removing a participant rewrites or deletes the expenses they took part in
//!
//! Repaid flags are kept alongside expenses but never influence balances.

use crate::core::balance::{self, BalanceCalculator, UnknownParticipantPolicy};
use crate::core::expense_store::{DetachReport, ExpenseStore};
use crate::core::roster::Roster;
use crate::core::simplify::min_transfers;
use crate::types::{
    BalanceMap, Expense, ExpenseId, LedgerError, NewExpense, Participant, ParticipantId, Transfer,
};
use tracing::{debug, info};

/// One split: its roster and its expenses
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    roster: Roster,
    expenses: ExpenseStore,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Ledger {
            roster: Roster::new(),
            expenses: ExpenseStore::new(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn expenses(&self) -> &ExpenseStore {
        &self.expenses
    }

    /// Add a participant by name
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or already taken.
    pub fn add_participant(&mut self, name: &str) -> Result<ParticipantId, LedgerError> {
        self.roster.add(name)
    }

    /// Add a participant with a known id
    pub fn insert_participant(&mut self, participant: Participant) -> Result<(), LedgerError> {
        self.roster.insert(participant)
    }

    /// Remove a participant and detach them from every expense
    ///
    /// # Errors
    ///
    /// Returns an error if the participant is not on the roster.
    pub fn remove_participant(&mut self, id: ParticipantId) -> Result<DetachReport, LedgerError> {
        let removed = self.roster.remove(id)?;
        let report = self.expenses.detach_participant(id);

        info!(
            participant = id,
            name = %removed.name,
            updated = report.updated.len(),
            deleted = report.deleted.len(),
            "removed participant"
        );

        Ok(report)
    }

    /// Record a new expense, assigning it the next id
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The description is blank
    /// - The amount is not positive, nobody is involved, or the payer is not involved
    /// - The payer or an involved participant is not on the roster
    pub fn record_expense(&mut self, new: NewExpense) -> Result<ExpenseId, LedgerError> {
        let expense = new.into_expense(self.expenses.next_id());
        self.check_new(&expense)?;

        let id = expense.id;
        debug!(expense = id, amount = %expense.amount, payer = expense.payer, "recorded expense");
        self.expenses.insert(expense)?;
        Ok(id)
    }

    /// Load a previously stored expense as-is
    ///
    /// Amount, split and payer are validated, but participants missing from the
    /// roster are tolerated so history survives roster changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the expense is malformed or its id is taken.
    pub fn load_expense(&mut self, expense: Expense) -> Result<(), LedgerError> {
        balance::validate(&expense)?;
        self.expenses.insert(expense)
    }

    /// Replace the fields of an existing expense
    ///
    /// Repaid flags of participants that remain debtors are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the expense does not exist or the new fields are
    /// invalid (see [`Ledger::record_expense`]).
    pub fn update_expense(&mut self, id: ExpenseId, new: NewExpense) -> Result<(), LedgerError> {
        let previous = self
            .expenses
            .get(id)
            .ok_or_else(|| LedgerError::expense_not_found(id))?;

        let mut expense = new.into_expense(id);
        expense.repaid = previous
            .repaid
            .iter()
            .copied()
            .filter(|&p| expense.involves(p) && p != expense.payer)
            .collect();

        self.check_new(&expense)?;
        self.expenses.replace(expense)?;
        Ok(())
    }

    /// Delete an expense
    pub fn delete_expense(&mut self, id: ExpenseId) -> Result<Expense, LedgerError> {
        self.expenses.remove(id)
    }

    /// Mark (or unmark) a debtor as having paid back their share of an expense
    pub fn mark_repaid(
        &mut self,
        id: ExpenseId,
        participant: ParticipantId,
        repaid: bool,
    ) -> Result<(), LedgerError> {
        self.expenses.set_repaid(id, participant, repaid)
    }

    /// Net balance per participant
    pub fn balances(&self, policy: UnknownParticipantPolicy) -> Result<BalanceMap, LedgerError> {
        BalanceCalculator::new(policy).calculate(self.roster.iter(), self.expenses.iter())
    }

    /// Transfers that settle every balance
    pub fn settlement_plan(
        &self,
        policy: UnknownParticipantPolicy,
    ) -> Result<Vec<Transfer>, LedgerError> {
        let balances = self.balances(policy)?;
        Ok(min_transfers(&balances))
    }

    fn check_new(&self, expense: &Expense) -> Result<(), LedgerError> {
        if expense.description.trim().is_empty() {
            return Err(LedgerError::empty_description(expense.id));
        }
        balance::validate(expense)?;

        let unknown = std::iter::once(&expense.payer)
            .chain(expense.involved.iter())
            .find(|id| !self.roster.contains(**id));
        match unknown {
            Some(&participant) => Err(LedgerError::unknown_participant(expense.id, participant)),
            None => Ok(()),
        }
    }
}
