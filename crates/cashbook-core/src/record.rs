//! Movement record types.
//!
//! Four record shapes feed the derived-state computations:
//!
//! - [`SaleRecord`] - a sale, always contributing cash-in
//! - [`CostRecord`] - a cost, always contributing cash-out
//! - [`ManualEntry`] - a hand-written correction, signed by its [`EntryKind`]
//! - [`InventoryMovement`] - a stock change carrying its post-movement snapshot
//!
//! The first three share the [`MovementRecord`] trait, which is the seam
//! the ledger computations work through: a stable id, a raw date, a
//! dual-currency value, and a signed cash-flow contribution. All records
//! are append-only input; nothing in this workspace mutates them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::{Currency, DualAmount};
use crate::temporal::RawDate;

/// Common surface of the three cash-book sources.
pub trait MovementRecord {
    /// Stable identifier, unique within the record's source collection.
    fn id(&self) -> &str;

    /// The stored date in whatever encoding the write path used.
    fn raw_date(&self) -> &RawDate;

    /// The dual-currency value captured at write time.
    fn amounts(&self) -> &DualAmount;

    /// Signed cash-flow contribution in the requested currency.
    ///
    /// Positive for cash-in, negative for cash-out.
    fn signed_contribution(&self, currency: Currency) -> Decimal;

    /// Normalized instant, if the stored date is well formed.
    fn instant(&self) -> Option<DateTime<Utc>> {
        self.raw_date().normalize()
    }
}

/// A recorded sale. Always cash-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    /// Stable identifier within the sales collection.
    pub id: String,
    /// Stored sale date.
    pub date: RawDate,
    /// Value of the sale in both currencies.
    #[serde(flatten)]
    pub amounts: DualAmount,
    /// Reference to the product sold.
    pub product_id: String,
    /// Reference to the business activity this sale belongs to.
    pub activity_type_id: String,
    /// Free-form sales channel label (e.g. "counter", "wholesale").
    pub channel: String,
}

impl MovementRecord for SaleRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn raw_date(&self) -> &RawDate {
        &self.date
    }

    fn amounts(&self) -> &DualAmount {
        &self.amounts
    }

    fn signed_contribution(&self, currency: Currency) -> Decimal {
        self.amounts.select(currency)
    }
}

/// A recorded cost. Always cash-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRecord {
    /// Stable identifier within the costs collection.
    pub id: String,
    /// Stored cost date.
    pub date: RawDate,
    /// Value of the cost in both currencies.
    #[serde(flatten)]
    pub amounts: DualAmount,
    /// Reference to the expense type.
    pub expense_type_id: String,
    /// Reference to the business activity this cost belongs to.
    pub activity_type_id: String,
}

impl MovementRecord for CostRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn raw_date(&self) -> &RawDate {
        &self.date
    }

    fn amounts(&self) -> &DualAmount {
        &self.amounts
    }

    fn signed_contribution(&self, currency: Currency) -> Decimal {
        -self.amounts.select(currency)
    }
}

/// Direction of a [`ManualEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryKind {
    /// Cash-in.
    Credit,
    /// Cash-out.
    Debit,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Credit => write!(f, "CREDIT"),
            Self::Debit => write!(f, "DEBIT"),
        }
    }
}

/// A hand-written ledger correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualEntry {
    /// Stable identifier within the manual-entries collection.
    pub id: String,
    /// Stored entry date.
    pub date: RawDate,
    /// Value of the entry in both currencies.
    #[serde(flatten)]
    pub amounts: DualAmount,
    /// Operator-supplied description, used verbatim in the ledger.
    pub description: String,
    /// Whether the entry is cash-in or cash-out.
    #[serde(rename = "entryKind")]
    pub kind: EntryKind,
}

impl MovementRecord for ManualEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn raw_date(&self) -> &RawDate {
        &self.date
    }

    fn amounts(&self) -> &DualAmount {
        &self.amounts
    }

    fn signed_contribution(&self, currency: Currency) -> Decimal {
        match self.kind {
            EntryKind::Credit => self.amounts.select(currency),
            EntryKind::Debit => -self.amounts.select(currency),
        }
    }
}

/// The kind of an [`InventoryMovement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementKind {
    /// First movement of a product, establishing its starting quantity.
    Opening,
    /// Stock received.
    In,
    /// Stock issued.
    Out,
    /// Absolute correction of the on-hand quantity.
    Adjustment,
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opening => write!(f, "OPENING"),
            Self::In => write!(f, "IN"),
            Self::Out => write!(f, "OUT"),
            Self::Adjustment => write!(f, "ADJUSTMENT"),
        }
    }
}

impl MovementKind {
    /// The post-movement snapshot the write path must store for this kind.
    ///
    /// OPENING and ADJUSTMENT take the moved quantity as an absolute
    /// value; IN and OUT apply it to the pre-movement quantity.
    #[must_use]
    pub fn expected_remaining(self, initial: Decimal, moved: Decimal) -> Decimal {
        match self {
            Self::Opening | Self::Adjustment => moved,
            Self::In => initial + moved,
            Self::Out => initial - moved,
        }
    }
}

/// A stock change for one product.
///
/// The `remaining_quantity` snapshot is authoritative: it is computed by
/// the write path at insertion time and the stock resolver only ever
/// reads it back. Replaying deltas is never done at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryMovement {
    /// Stable identifier within the movements collection.
    pub id: String,
    /// Stored movement date.
    pub date: RawDate,
    /// What kind of movement this is.
    #[serde(rename = "movementType")]
    pub kind: MovementKind,
    /// Product reference as stored: internal id or human-readable code.
    #[serde(rename = "productId")]
    pub product: String,
    /// On-hand quantity before the movement.
    pub initial_quantity: Decimal,
    /// Quantity moved (absolute target for OPENING and ADJUSTMENT).
    pub quantity_moved: Decimal,
    /// Post-movement stock snapshot computed by the write path.
    pub remaining_quantity: Decimal,
}

impl InventoryMovement {
    /// Whether the stored snapshot matches what the write-time rule
    /// prescribes for this movement's kind.
    #[must_use]
    pub fn snapshot_is_consistent(&self) -> bool {
        self.remaining_quantity
            == self
                .kind
                .expected_remaining(self.initial_quantity, self.quantity_moved)
    }
}
