//! Balance and transfer types
//!
//! A [`BalanceMap`] holds one signed net balance per participant: positive means
//! the participant is owed money, negative means they owe money. A [`Transfer`]
//! is one directed payment that moves a debtor towards zero.

use super::participant::ParticipantId;
use rust_decimal::Decimal;
use std::collections::btree_map::{self, BTreeMap};

/// Balances within one cent of zero are considered settled
pub const SETTLED_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Round an amount to cent precision (midpoint to even)
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}

/// Net balance per participant, iterated in ascending id order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceMap {
    balances: BTreeMap<ParticipantId, Decimal>,
}

impl BalanceMap {
    /// Create an empty balance map
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of a participant, if present
    pub fn get(&self, participant: ParticipantId) -> Option<Decimal> {
        self.balances.get(&participant).copied()
    }

    /// Add `delta` to a participant's balance, creating the entry at zero
    pub fn adjust(&mut self, participant: ParticipantId, delta: Decimal) {
        *self.balances.entry(participant).or_insert(Decimal::ZERO) += delta;
    }

    /// Add `delta` like [`adjust`](Self::adjust), returning the new balance
    ///
    /// Returns `None` and leaves the map unchanged if the balance would overflow.
    pub fn checked_adjust(
        &mut self,
        participant: ParticipantId,
        delta: Decimal,
    ) -> Option<Decimal> {
        let balance = self.balances.entry(participant).or_insert(Decimal::ZERO);
        *balance = balance.checked_add(delta)?;
        Some(*balance)
    }

    /// Ensure an entry exists without changing an existing balance
    pub fn touch(&mut self, participant: ParticipantId) {
        self.balances.entry(participant).or_insert(Decimal::ZERO);
    }

    /// Whether the participant has an entry
    pub fn contains(&self, participant: ParticipantId) -> bool {
        self.balances.contains_key(&participant)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, ParticipantId, Decimal> {
        self.balances.iter()
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Sum of all balances; zero for any valid set of expenses
    pub fn total(&self) -> Decimal {
        self.balances.values().copied().sum()
    }

    /// Whether every balance is within [`SETTLED_EPSILON`] of zero
    pub fn is_settled(&self) -> bool {
        self.balances
            .values()
            .all(|balance| balance.abs() <= SETTLED_EPSILON)
    }
}

impl FromIterator<(ParticipantId, Decimal)> for BalanceMap {
    fn from_iter<I: IntoIterator<Item = (ParticipantId, Decimal)>>(iter: I) -> Self {
        let mut map = BalanceMap::new();
        for (participant, balance) in iter {
            map.adjust(participant, balance);
        }
        map
    }
}

impl<'a> IntoIterator for &'a BalanceMap {
    type Item = (&'a ParticipantId, &'a Decimal);
    type IntoIter = btree_map::Iter<'a, ParticipantId, Decimal>;

    fn into_iter(self) -> Self::IntoIter {
        self.balances.iter()
    }
}

/// A single settling payment: `from` pays `to` the given amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    /// Debtor
    pub from: ParticipantId,

    /// Creditor
    pub to: ParticipantId,

    /// Positive, cent-rounded amount
    pub amount: Decimal,
}

impl Transfer {
    pub fn new(from: ParticipantId, to: ParticipantId, amount: Decimal) -> Self {
        Transfer { from, to, amount }
    }
}
