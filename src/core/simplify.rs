//! Debt simplification
//!
//! Turns a balance map into a short list of settling payments using greedy
//! largest-debtor/largest-creditor matching:
//!
//! 1. Participants owed more than one cent are creditors, those owing more than
//!    one cent are debtors; everyone else is settled.
//! 2. Both lists are sorted by magnitude, largest first. Equal magnitudes keep
//!    ascending participant id order.
//! 3. Two cursors walk the lists. Each step pays `min(debt, credit)` from the
//!    current debtor to the current creditor (emitted rounded to cents) and
//!    moves past whichever side dropped below one cent.
//!
//! This is not the minimum possible number of payments for every input, but it
//! is deterministic and never emits more than `debtors + creditors - 1`
//! transfers.

use crate::types::{round_cents, BalanceMap, ParticipantId, Transfer, SETTLED_EPSILON};
use rust_decimal::Decimal;
use tracing::debug;

/// Compute the settling transfers for a balance map
///
/// Returns an empty list when every balance is within one cent of zero.
pub fn min_transfers(balances: &BalanceMap) -> Vec<Transfer> {
    // BalanceMap iterates by ascending id, and sort_by is stable, so ties stay id-ordered
    let mut creditors: Vec<(ParticipantId, Decimal)> = balances
        .iter()
        .filter(|(_, balance)| **balance > SETTLED_EPSILON)
        .map(|(id, balance)| (*id, *balance))
        .collect();
    let mut debtors: Vec<(ParticipantId, Decimal)> = balances
        .iter()
        .filter(|(_, balance)| **balance < -SETTLED_EPSILON)
        .map(|(id, balance)| (*id, -*balance))
        .collect();

    creditors.sort_by(|a, b| b.1.cmp(&a.1));
    debtors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut transfers = Vec::with_capacity(creditors.len() + debtors.len());
    let (mut i, mut j) = (0, 0);

    while i < debtors.len() && j < creditors.len() {
        let (debtor, debt) = debtors[i];
        let (creditor, credit) = creditors[j];

        let amount = debt.min(credit);
        transfers.push(Transfer::new(debtor, creditor, round_cents(amount)));

        debtors[i].1 = debt - amount;
        creditors[j].1 = credit - amount;

        if debtors[i].1 < SETTLED_EPSILON {
            i += 1;
        }
        if creditors[j].1 < SETTLED_EPSILON {
            j += 1;
        }
    }

    debug!(
        creditors = creditors.len(),
        debtors = debtors.len(),
        transfers = transfers.len(),
        "simplified debts"
    );

    transfers
}

/// Apply transfers to a copy of `balances`
///
/// Each transfer raises the debtor's balance and lowers the creditor's by the
/// transfer amount.
pub fn apply_transfers(balances: &BalanceMap, transfers: &[Transfer]) -> BalanceMap {
    let mut settled = balances.clone();
    for transfer in transfers {
        settled.adjust(transfer.from, transfer.amount);
        settled.adjust(transfer.to, -transfer.amount);
    }
    settled
}
