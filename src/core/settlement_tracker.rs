//! Settled-transfer flags
//!
//! Keeps track of which suggested transfers a group has already checked off.
//! Flags live in a concurrent keyed table, one entry per
//! (split, debtor, creditor, amount in cents), and support compare-and-swap so
//! two people toggling the same checkbox cannot silently overwrite each other.
//!
//! # Thread Safety
//!
//! `SettlementTracker` uses `DashMap` internally; all methods take `&self` and
//! can be called from several threads at once.
//!
//! Flags are presentation state. Nothing in this module feeds back into balance
//! calculation or debt simplification.

use crate::types::{round_cents, LedgerError, ParticipantId, Transfer};
use dashmap::DashMap;
use rust_decimal::Decimal;

/// Identity of a suggested transfer within a split
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SettlementKey {
    pub split: String,
    pub from: ParticipantId,
    pub to: ParticipantId,
    /// Transfer amount rounded to cents, as an integer number of cents
    pub amount_cents: i128,
}

impl SettlementKey {
    /// Build a key, rounding `amount` to cents
    pub fn new(split: &str, from: ParticipantId, to: ParticipantId, amount: Decimal) -> Self {
        // Rounding leaves a scale of at most 2; amounts too wide to carry two
        // decimal places keep a smaller one.
        let rounded = round_cents(amount);
        let amount_cents = rounded.mantissa() * 10i128.pow(2u32.saturating_sub(rounded.scale()));
        SettlementKey {
            split: split.to_string(),
            from,
            to,
            amount_cents,
        }
    }

    /// Key for a transfer within `split`
    pub fn for_transfer(split: &str, transfer: &Transfer) -> Self {
        Self::new(split, transfer.from, transfer.to, transfer.amount)
    }

    /// The rounded amount as a decimal
    ///
    /// Counts of cents beyond the 96-bit mantissa drop their trailing zero
    /// decimal places; values past [`Decimal::MAX`] saturate.
    pub fn amount(&self) -> Decimal {
        (0..=2u32)
            .rev()
            .find_map(|scale| {
                let mantissa = self.amount_cents / 10i128.pow(2 - scale);
                Decimal::try_from_i128_with_scale(mantissa, scale).ok()
            })
            .unwrap_or(if self.amount_cents < 0 {
                Decimal::MIN
            } else {
                Decimal::MAX
            })
    }
}

/// Concurrent table of settled flags
#[derive(Debug, Default)]
pub struct SettlementTracker {
    flags: DashMap<SettlementKey, bool>,
}

impl SettlementTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self {
            flags: DashMap::new(),
        }
    }

    /// Whether the transfer was marked settled; unknown keys read as unsettled
    pub fn is_settled(&self, key: &SettlementKey) -> bool {
        self.flags.get(key).map(|flag| *flag).unwrap_or(false)
    }

    /// Unconditionally set a flag
    pub fn set_settled(&self, key: SettlementKey, settled: bool) {
        self.flags.insert(key, settled);
    }

    /// Set a flag only if it currently equals `expected`
    ///
    /// An absent key counts as `false`. The check and the write happen under
    /// the entry lock.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::SettlementConflict`] when the stored flag differs
    /// from `expected`; the flag is left unchanged.
    pub fn compare_and_swap(
        &self,
        key: SettlementKey,
        expected: bool,
        settled: bool,
    ) -> Result<(), LedgerError> {
        let (from, to, amount) = (key.from, key.to, key.amount());

        let mut entry = self.flags.entry(key).or_insert(false);
        if *entry.value() != expected {
            return Err(LedgerError::settlement_conflict(from, to, amount));
        }
        *entry.value_mut() = settled;
        Ok(())
    }

    /// Keys currently marked settled, sorted
    pub fn settled_keys(&self) -> Vec<SettlementKey> {
        let mut keys: Vec<SettlementKey> = self
            .flags
            .iter()
            .filter(|entry| *entry.value())
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        keys
    }

    /// Pair each transfer with its settled flag within `split`
    pub fn annotate(&self, split: &str, transfers: &[Transfer]) -> Vec<(Transfer, bool)> {
        transfers
            .iter()
            .map(|t| (*t, self.is_settled(&SettlementKey::for_transfer(split, t))))
            .collect()
    }

    /// Number of stored flags, settled or not
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}
