//! Aggregate statistics over a generated ledger.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entry::LedgerEntry;

/// Aggregate view of one generated ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    /// Balance before the first entry, reconstructed from the ledger
    /// itself. Zero for an empty ledger. This is a display convenience;
    /// the authoritative value is the one the generator was given.
    pub opening_balance: Decimal,
    /// Sum of all incoming cash.
    pub total_cash_in: Decimal,
    /// Sum of all outgoing cash.
    pub total_cash_out: Decimal,
    /// Balance after the last entry. Zero for an empty ledger.
    pub closing_balance: Decimal,
    /// `total_cash_in - total_cash_out`.
    pub net_flow: Decimal,
}

/// Derive summary statistics from a generated ledger.
///
/// The opening balance is recovered by reversing the first entry's
/// contribution out of its annotated balance, so the summary needs no
/// input other than the entries themselves.
#[must_use]
pub fn summarize(entries: &[LedgerEntry]) -> LedgerSummary {
    let total_cash_in: Decimal = entries.iter().map(|entry| entry.cash_in).sum();
    let total_cash_out: Decimal = entries.iter().map(|entry| entry.cash_out).sum();
    let opening_balance = entries
        .first()
        .map_or(Decimal::ZERO, |first| {
            first.balance - first.cash_in + first.cash_out
        });
    let closing_balance = entries.last().map_or(Decimal::ZERO, |last| last.balance);
    LedgerSummary {
        opening_balance,
        total_cash_in,
        total_cash_out,
        closing_balance,
        net_flow: total_cash_in - total_cash_out,
    }
}
