//! Core types for cashbook
//!
//! This crate provides the fundamental types used throughout the cashbook
//! workspace:
//!
//! - [`DualAmount`] and [`Currency`] - a value in both bookkeeping currencies
//! - [`RawDate`] - the heterogeneous stored date encodings, normalized once
//! - [`MonthWindow`] - the half-open UTC window of one calendar month
//! - [`SaleRecord`], [`CostRecord`], [`ManualEntry`] - the cash-book sources
//! - [`InventoryMovement`] - a stock change with its write-time snapshot
//! - [`MasterData`] and [`FallbackLabels`] - display-name resolution
//!
//! Everything here is pure data: no I/O, no logging, no interior state.
//! The derived-state computations live in `cashbook-ledger` and
//! `cashbook-stock`.
//!
//! # Example
//!
//! ```
//! use cashbook_core::{Currency, DualAmount, MovementRecord, RawDate, SaleRecord};
//! use rust_decimal_macros::dec;
//!
//! let sale = SaleRecord {
//!     id: "s1".into(),
//!     date: RawDate::Timestamp { seconds: 1_709_600_000, nanos: 0 },
//!     amounts: DualAmount::new(dec!(5000), dec!(1.79)).with_rate(dec!(2800)),
//!     product_id: "p1".into(),
//!     activity_type_id: "retail".into(),
//!     channel: "counter".into(),
//! };
//!
//! assert!(sale.instant().is_some());
//! assert_eq!(sale.signed_contribution(Currency::Local), dec!(5000));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod lookup;
pub mod money;
pub mod record;
pub mod temporal;

pub use lookup::{FallbackLabels, MasterData};
pub use money::{Currency, DualAmount};
pub use record::{
    CostRecord, EntryKind, InventoryMovement, ManualEntry, MovementKind, MovementRecord, SaleRecord,
};
pub use temporal::{MonthWindow, PeriodError, RawDate};

// Re-export commonly used external types
pub use chrono::{DateTime, Utc};
pub use rust_decimal::Decimal;
