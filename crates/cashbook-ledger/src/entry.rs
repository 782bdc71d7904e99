//! Ledger entry type and same-instant ordering.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which source collection a ledger entry came from.
///
/// The discriminant doubles as the same-instant ordering precedence.
/// When two entries share an instant, incoming cash is recognized before
/// outgoing cash and manual corrections come last. The order is a house
/// convention carried over from the bookkeeping practice this ledger
/// replaces; it must stay fixed for reproducibility.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceKind {
    /// Sales recognized first.
    Sale = 0,
    /// Costs after sales on the same instant.
    Cost = 1,
    /// Manual corrections last.
    Manual = 2,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sale => write!(f, "SALE"),
            Self::Cost => write!(f, "COST"),
            Self::Manual => write!(f, "MANUAL"),
        }
    }
}

/// One line of a generated monthly ledger.
///
/// Entries are immutable once produced: the generator returns a fresh,
/// fully annotated vector on every call and never mutates its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Normalized instant of the source record.
    pub date: DateTime<Utc>,
    /// Source collection, which also fixes same-instant order.
    #[serde(rename = "sourceKind")]
    pub source: SourceKind,
    /// Source record id, for drill-down and audit.
    pub reference: String,
    /// Human-readable description rendered from master data.
    pub description: String,
    /// Incoming cash in the ledger's requested currency. Non-negative.
    pub cash_in: Decimal,
    /// Outgoing cash in the ledger's requested currency. Non-negative.
    pub cash_out: Decimal,
    /// Exchange rate carried from the source record, for audit display.
    pub exchange_rate: Option<Decimal>,
    /// Value in the local currency, regardless of the requested currency.
    pub amount_local: Decimal,
    /// Value in the foreign currency, regardless of the requested currency.
    pub amount_foreign: Decimal,
    /// Running balance after this entry.
    pub balance: Decimal,
}

impl LedgerEntry {
    /// Net effect of this entry on the running balance.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.cash_in - self.cash_out
    }
}
