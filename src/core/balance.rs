//! Balance calculation
//!
//! Reduces a set of expenses to one net balance per participant. For each expense
//! the payer is credited the full amount and every involved participant is
//! debited an equal share, so the balances of any valid expense set sum to zero.
//!
//! # Validation
//!
//! Malformed expenses are rejected, never skipped: a non-positive amount, an empty
//! split, or a payer outside the split fails the whole calculation with a typed
//! [`LedgerError`]. Participants referenced by an expense but missing from the
//! roster are handled according to [`UnknownParticipantPolicy`].
//! Amounts large enough to push a balance past the range of [`Decimal`] fail with
//! [`LedgerError::AmountOverflow`].

use crate::types::{BalanceMap, Expense, LedgerError, Participant};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use tracing::debug;

/// What to do with expense participants that are not on the roster
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownParticipantPolicy {
    /// Give them a balance entry like any other participant
    #[default]
    Tolerate,
    /// Fail with [`LedgerError::UnknownParticipant`]
    Reject,
}

/// Balance calculator configured with an unknown-participant policy
///
/// The calculator holds no state between calls; the same inputs always produce
/// the same balances.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceCalculator {
    policy: UnknownParticipantPolicy,
}

impl BalanceCalculator {
    /// Create a calculator with the given policy
    pub fn new(policy: UnknownParticipantPolicy) -> Self {
        BalanceCalculator { policy }
    }

    /// The configured unknown-participant policy
    pub fn policy(&self) -> UnknownParticipantPolicy {
        self.policy
    }

    /// Compute net balances
    ///
    /// Every roster participant starts with a zero entry. Expense order does not
    /// affect the result.
    ///
    /// # Errors
    ///
    /// Returns an error if any expense:
    /// - has an amount that is zero or negative
    /// - has no involved participants
    /// - has a payer that is not involved
    /// - references an id outside `participants` while the policy is `Reject`
    /// - pushes a balance past the range of [`Decimal`]
    pub fn calculate<'a, P, E>(
        &self,
        participants: P,
        expenses: E,
    ) -> Result<BalanceMap, LedgerError>
    where
        P: IntoIterator<Item = &'a Participant>,
        E: IntoIterator<Item = &'a Expense>,
    {
        let roster: BTreeSet<_> = participants.into_iter().map(|p| p.id).collect();

        let mut balances = BalanceMap::new();
        for &id in &roster {
            balances.touch(id);
        }

        let mut applied = 0usize;
        for expense in expenses {
            let share = validate(expense)?;

            if self.policy == UnknownParticipantPolicy::Reject {
                let unknown = std::iter::once(&expense.payer)
                    .chain(expense.involved.iter())
                    .find(|id| !roster.contains(*id));
                if let Some(&participant) = unknown {
                    return Err(LedgerError::unknown_participant(expense.id, participant));
                }
            }

            let debits = expense.involved.iter().map(|&id| (id, -share));
            let credit = std::iter::once((expense.payer, expense.amount));
            for (participant, delta) in debits.chain(credit) {
                balances
                    .checked_adjust(participant, delta)
                    .ok_or_else(|| LedgerError::amount_overflow(expense.id))?;
            }
            applied += 1;
        }

        debug!(
            expenses = applied,
            participants = balances.len(),
            "calculated balances"
        );

        Ok(balances)
    }
}

/// Compute net balances, tolerating participants missing from the roster
///
/// See [`BalanceCalculator::calculate`].
pub fn calculate_balances<'a, P, E>(
    participants: P,
    expenses: E,
) -> Result<BalanceMap, LedgerError>
where
    P: IntoIterator<Item = &'a Participant>,
    E: IntoIterator<Item = &'a Expense>,
{
    BalanceCalculator::default().calculate(participants, expenses)
}

/// Check an expense and return its per-head share
pub(crate) fn validate(expense: &Expense) -> Result<Decimal, LedgerError> {
    if expense.amount <= Decimal::ZERO {
        return Err(LedgerError::invalid_amount(expense.id, expense.amount));
    }

    let share = expense
        .share()
        .ok_or_else(|| LedgerError::no_involved_participants(expense.id))?;

    if !expense.involves(expense.payer) {
        return Err(LedgerError::payer_not_involved(expense.id, expense.payer));
    }

    Ok(share)
}
