//! Latest-wins stock resolution for cashbook
//!
//! A product's current stock is the `remaining_quantity` snapshot stored
//! on its chronologically latest [`InventoryMovement`]. The write path
//! computes that snapshot at insertion time for every movement kind, so
//! resolution never replays deltas: it selects one movement and trusts
//! its stored value.
//!
//! # Example
//!
//! ```
//! use cashbook_core::{InventoryMovement, MovementKind, RawDate};
//! use cashbook_stock::{current_stock, ProductRef};
//! use rust_decimal_macros::dec;
//!
//! let movements = vec![InventoryMovement {
//!     id: "mv1".into(),
//!     date: RawDate::Text("2024-03-01".into()),
//!     kind: MovementKind::Opening,
//!     product: "p1".into(),
//!     initial_quantity: dec!(0),
//!     quantity_moved: dec!(40),
//!     remaining_quantity: dec!(40),
//! }];
//!
//! let stock = current_stock(&ProductRef::new("p1"), &movements, None);
//! assert_eq!(stock, dec!(40));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;

use cashbook_core::InventoryMovement;

/// How a product may be referenced by a movement.
///
/// Movements written through older forms store the human-readable product
/// code where newer ones store the internal id, so resolution has to
/// accept either spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductRef<'a> {
    /// Internal product id.
    pub id: &'a str,
    /// Human-readable product code, when the catalog defines one.
    pub code: Option<&'a str>,
}

impl<'a> ProductRef<'a> {
    /// Reference a product by internal id only.
    #[must_use]
    pub const fn new(id: &'a str) -> Self {
        Self { id, code: None }
    }

    /// Reference a product by internal id and catalog code.
    #[must_use]
    pub const fn with_code(id: &'a str, code: &'a str) -> Self {
        Self {
            id,
            code: Some(code),
        }
    }

    /// Whether a movement's stored product reference points at this product.
    #[must_use]
    pub fn matches(&self, reference: &str) -> bool {
        reference == self.id || self.code.is_some_and(|code| reference == code)
    }
}

/// Resolve a product's current on-hand quantity.
///
/// Scans `movements` for this product, drops entries whose date does not
/// normalize, and returns the `remaining_quantity` of the latest one.
/// Movements sharing the latest instant are broken by slice order with
/// the last-seen movement winning, which keeps resolution deterministic
/// for second-precision dates. Returns zero when no movement qualifies.
///
/// `exclude_id` removes one movement from consideration; edit forms use
/// it to compute the stock level as it stood before the movement being
/// edited.
#[must_use]
pub fn current_stock(
    product: &ProductRef<'_>,
    movements: &[InventoryMovement],
    exclude_id: Option<&str>,
) -> Decimal {
    let mut latest: Option<(DateTime<Utc>, &InventoryMovement)> = None;
    for movement in movements {
        if !product.matches(&movement.product) {
            continue;
        }
        if exclude_id == Some(movement.id.as_str()) {
            continue;
        }
        let Some(instant) = movement.date.normalize() else {
            tracing::debug!(id = %movement.id, "movement date did not normalize, skipped");
            continue;
        };
        // Equal instants fall through to the later movement.
        match latest {
            Some((best, _)) if instant < best => {}
            _ => latest = Some((instant, movement)),
        }
    }
    latest.map_or(Decimal::ZERO, |(_, movement)| movement.remaining_quantity)
}

/// Resolve current stock for a whole catalog in one call.
///
/// The dashboard's stock overview resolves every product against the
/// same movement snapshot; the result maps each product's internal id to
/// its quantity. Products without qualifying movements map to zero, the
/// same default as [`current_stock`].
#[must_use]
pub fn stock_levels<'a, I>(products: I, movements: &[InventoryMovement]) -> HashMap<String, Decimal>
where
    I: IntoIterator<Item = ProductRef<'a>>,
{
    products
        .into_iter()
        .map(|product| {
            (
                product.id.to_owned(),
                current_stock(&product, movements, None),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashbook_core::{MovementKind, RawDate};
    use rust_decimal_macros::dec;

    fn movement(
        id: &str,
        date: RawDate,
        kind: MovementKind,
        product: &str,
        initial: Decimal,
        moved: Decimal,
        remaining: Decimal,
    ) -> InventoryMovement {
        InventoryMovement {
            id: id.into(),
            date,
            kind,
            product: product.into(),
            initial_quantity: initial,
            quantity_moved: moved,
            remaining_quantity: remaining,
        }
    }

    fn history() -> Vec<InventoryMovement> {
        vec![
            movement(
                "mv1",
                RawDate::Text("2024-03-01".into()),
                MovementKind::Opening,
                "p1",
                dec!(0),
                dec!(10),
                dec!(10),
            ),
            movement(
                "mv2",
                RawDate::Text("2024-03-10".into()),
                MovementKind::In,
                "p1",
                dec!(10),
                dec!(15),
                dec!(25),
            ),
            movement(
                "mv3",
                RawDate::Text("2024-03-20".into()),
                MovementKind::Out,
                "p1",
                dec!(25),
                dec!(18),
                dec!(7),
            ),
        ]
    }

    #[test]
    fn test_latest_wins() {
        let stock = current_stock(&ProductRef::new("p1"), &history(), None);
        assert_eq!(stock, dec!(7));
    }

    #[test]
    fn test_exclusion_rewinds_to_previous_snapshot() {
        let stock = current_stock(&ProductRef::new("p1"), &history(), Some("mv3"));
        assert_eq!(stock, dec!(25));
    }

    #[test]
    fn test_no_movements_defaults_to_zero() {
        let stock = current_stock(&ProductRef::new("p9"), &history(), None);
        assert_eq!(stock, Decimal::ZERO);
        assert_eq!(current_stock(&ProductRef::new("p1"), &[], None), Decimal::ZERO);
    }

    #[test]
    fn test_matches_by_id_or_code() {
        let mut movements = history();
        // Written through the legacy form, which stored the catalog code.
        movements.push(movement(
            "mv4",
            RawDate::Text("2024-03-25".into()),
            MovementKind::Adjustment,
            "FLOUR-25",
            dec!(7),
            dec!(9),
            dec!(9),
        ));

        assert_eq!(
            current_stock(&ProductRef::new("p1"), &movements, None),
            dec!(7)
        );
        assert_eq!(
            current_stock(&ProductRef::with_code("p1", "FLOUR-25"), &movements, None),
            dec!(9)
        );
    }

    #[test]
    fn test_same_instant_last_seen_wins() {
        let mut movements = history();
        movements.push(movement(
            "mv5",
            RawDate::Text("2024-03-20".into()),
            MovementKind::Adjustment,
            "p1",
            dec!(7),
            dec!(12),
            dec!(12),
        ));
        assert_eq!(
            current_stock(&ProductRef::new("p1"), &movements, None),
            dec!(12)
        );
    }

    #[test]
    fn test_malformed_dates_skipped() {
        let mut movements = history();
        movements.push(movement(
            "mv6",
            RawDate::Text("someday".into()),
            MovementKind::Adjustment,
            "p1",
            dec!(7),
            dec!(1000),
            dec!(1000),
        ));
        assert_eq!(
            current_stock(&ProductRef::new("p1"), &movements, None),
            dec!(7)
        );
    }

    #[test]
    fn test_stock_levels_batch() {
        let movements = history();
        let levels = stock_levels(
            [ProductRef::new("p1"), ProductRef::new("p2")],
            &movements,
        );
        assert_eq!(levels["p1"], dec!(7));
        assert_eq!(levels["p2"], Decimal::ZERO);
    }
}
