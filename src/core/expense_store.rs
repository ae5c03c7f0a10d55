//! Expense storage
//!
//! This module provides the ExpenseStore component that keeps the recorded
//! expenses of one split, keyed by expense id.
//!
//! # Ordering
//!
//! Listings are newest first: by timestamp descending, then by id descending for
//! expenses recorded at the same instant.
//!
//! # Participant Removal
//!
//! [`ExpenseStore::detach_participant`] rewrites the expenses a removed
//! participant took part in, so the remaining ledger stays balanced without them.

use crate::types::{Expense, ExpenseId, LedgerError, ParticipantId};
use std::collections::BTreeMap;

/// Expenses touched by a participant removal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetachReport {
    /// Expenses rewritten without the participant
    pub updated: Vec<ExpenseId>,
    /// Expenses deleted because fewer than two participants remained
    pub deleted: Vec<ExpenseId>,
}

/// Expense store for one split
#[derive(Debug, Clone, Default)]
pub struct ExpenseStore {
    /// Map of expense ID to expense
    expenses: BTreeMap<ExpenseId, Expense>,

    /// Highest id ever stored
    last_id: ExpenseId,
}

impl ExpenseStore {
    /// Create a new empty expense store
    pub fn new() -> Self {
        ExpenseStore {
            expenses: BTreeMap::new(),
            last_id: 0,
        }
    }

    /// Id the next recorded expense should use
    pub fn next_id(&self) -> ExpenseId {
        self.last_id + 1
    }

    /// Store an expense under its own id
    ///
    /// # Errors
    ///
    /// Returns an error if an expense with the same id is already stored.
    pub fn insert(&mut self, expense: Expense) -> Result<(), LedgerError> {
        if self.expenses.contains_key(&expense.id) {
            return Err(LedgerError::duplicate_expense(expense.id));
        }
        self.last_id = self.last_id.max(expense.id);
        self.expenses.insert(expense.id, expense);
        Ok(())
    }

    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.get(&id)
    }

    pub fn get_mut(&mut self, id: ExpenseId) -> Option<&mut Expense> {
        self.expenses.get_mut(&id)
    }

    /// Replace a stored expense, returning the previous version
    ///
    /// # Errors
    ///
    /// Returns an error if no expense with that id is stored.
    pub fn replace(&mut self, expense: Expense) -> Result<Expense, LedgerError> {
        let slot = self
            .expenses
            .get_mut(&expense.id)
            .ok_or_else(|| LedgerError::expense_not_found(expense.id))?;
        Ok(std::mem::replace(slot, expense))
    }

    /// Delete an expense
    ///
    /// # Errors
    ///
    /// Returns an error if no expense with that id is stored.
    pub fn remove(&mut self, id: ExpenseId) -> Result<Expense, LedgerError> {
        self.expenses
            .remove(&id)
            .ok_or_else(|| LedgerError::expense_not_found(id))
    }

    /// All expenses, newest first
    pub fn expenses(&self) -> Vec<&Expense> {
        let mut expenses: Vec<&Expense> = self.expenses.values().collect();
        expenses.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        expenses
    }

    /// Iterate expenses in id order
    pub fn iter(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.values()
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Rewrite every expense the participant takes part in
    ///
    /// For each such expense every occurrence of the participant is dropped from
    /// the split. An expense left with fewer than two participants is deleted.
    /// Otherwise, if the participant was the payer, the first remaining involved
    /// participant becomes the payer. The participant's repaid flags go with them.
    pub fn detach_participant(&mut self, participant: ParticipantId) -> DetachReport {
        let mut report = DetachReport::default();

        for (id, expense) in self.expenses.iter_mut() {
            if !expense.involves(participant) {
                continue;
            }

            expense.involved.retain(|&p| p != participant);
            expense.repaid.remove(&participant);

            if expense.involved.len() < 2 {
                report.deleted.push(*id);
                continue;
            }

            if expense.payer == participant {
                expense.payer = expense.involved[0];
                // the new payer cannot owe themselves
                let payer = expense.payer;
                expense.repaid.remove(&payer);
            }
            report.updated.push(*id);
        }

        for id in &report.deleted {
            self.expenses.remove(id);
        }

        report
    }

    /// Set or clear the "has paid back" flag of a debtor on an expense
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The expense does not exist
    /// - The participant is not involved, or is the payer
    pub fn set_repaid(
        &mut self,
        id: ExpenseId,
        participant: ParticipantId,
        repaid: bool,
    ) -> Result<(), LedgerError> {
        let expense = self
            .get_mut(id)
            .ok_or_else(|| LedgerError::expense_not_found(id))?;

        if !expense.involves(participant) || expense.payer == participant {
            return Err(LedgerError::not_a_debtor(id, participant));
        }

        if repaid {
            expense.repaid.insert(participant);
        } else {
            expense.repaid.remove(&participant);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewExpense;
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;

    fn expense(
        id: ExpenseId,
        payer: ParticipantId,
        involved: &[ParticipantId],
        ts: &str,
    ) -> Expense {
        NewExpense {
            description: format!("expense {}", id),
            amount: Decimal::new(6000, 2),
            payer,
            involved: involved.to_vec(),
            timestamp: ts.to_string(),
        }
        .into_expense(id)
    }

    #[fixture]
    fn store() -> ExpenseStore {
        let mut store = ExpenseStore::new();
        store.insert(expense(1, 1, &[1, 2, 3], "2024-03-01T10:00:00")).unwrap();
        store.insert(expense(2, 2, &[2, 3], "2024-03-02T10:00:00")).unwrap();
        store.insert(expense(3, 3, &[1, 3], "2024-03-02T10:00:00")).unwrap();
        store
    }

    #[rstest]
    fn test_insert_rejects_duplicate_id(mut store: ExpenseStore) {
        let result = store.insert(expense(2, 1, &[1, 2], "2024-03-05T10:00:00"));

        assert_eq!(result.unwrap_err(), LedgerError::DuplicateExpense { expense: 2 });
        assert_eq!(store.len(), 3);
    }

    #[rstest]
    fn test_next_id_never_reuses_deleted_ids(mut store: ExpenseStore) {
        store.remove(3).unwrap();

        assert_eq!(store.next_id(), 4);
    }

    #[rstest]
    fn test_expenses_newest_first(store: ExpenseStore) {
        let ids: Vec<ExpenseId> = store.expenses().iter().map(|e| e.id).collect();

        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[rstest]
    fn test_replace_and_remove_missing(mut store: ExpenseStore) {
        let previous = store
            .replace(expense(1, 2, &[1, 2], "2024-03-01T10:00:00"))
            .unwrap();
        assert_eq!(previous.payer, 1);
        assert_eq!(store.get(1).unwrap().payer, 2);

        assert_eq!(
            store.replace(expense(9, 1, &[1], "x")).unwrap_err(),
            LedgerError::ExpenseNotFound { expense: 9 }
        );
        assert_eq!(
            store.remove(9).unwrap_err(),
            LedgerError::ExpenseNotFound { expense: 9 }
        );
    }

    #[rstest]
    fn test_detach_participant_cascade(mut store: ExpenseStore) {
        // participant 3 is involved everywhere and pays expense 3
        let report = store.detach_participant(3);

        assert_eq!(report.updated, vec![1]);
        assert_eq!(report.deleted, vec![2, 3]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().involved, vec![1, 2]);
    }

    #[test]
    fn test_detach_payer_reassigns_to_first_remaining() {
        let mut store = ExpenseStore::new();
        store.insert(expense(1, 2, &[2, 3, 1], "t")).unwrap();
        store.set_repaid(1, 3, true).unwrap();

        let report = store.detach_participant(2);

        let expense = store.get(1).unwrap();
        assert_eq!(report.updated, vec![1]);
        assert_eq!(expense.payer, 3);
        assert_eq!(expense.involved, vec![3, 1]);
        assert!(expense.repaid.is_empty());
    }

    #[test]
    fn test_detach_untouched_participant_is_noop() {
        let mut store = ExpenseStore::new();
        store.insert(expense(1, 1, &[1, 2], "t")).unwrap();

        let report = store.detach_participant(5);

        assert_eq!(report, DetachReport::default());
        assert_eq!(store.len(), 1);
    }

    #[rstest]
    #[case::debtor(2, true, Ok(()))]
    #[case::payer(1, true, Err(LedgerError::NotADebtor { expense: 1, participant: 1 }))]
    #[case::outsider(4, true, Err(LedgerError::NotADebtor { expense: 1, participant: 4 }))]
    fn test_set_repaid(
        mut store: ExpenseStore,
        #[case] participant: ParticipantId,
        #[case] repaid: bool,
        #[case] expected: Result<(), LedgerError>,
    ) {
        assert_eq!(store.set_repaid(1, participant, repaid), expected);
    }

    #[rstest]
    fn test_set_repaid_toggles(mut store: ExpenseStore) {
        store.set_repaid(1, 2, true).unwrap();
        assert!(store.get(1).unwrap().is_repaid_by(2));

        store.set_repaid(1, 2, false).unwrap();
        assert!(!store.get(1).unwrap().is_repaid_by(2));

        assert_eq!(
            store.set_repaid(9, 2, true).unwrap_err(),
            LedgerError::ExpenseNotFound { expense: 9 }
        );
    }
}
