//! Monthly cash-book derivation for cashbook
//!
//! This crate reconstructs the auditable monthly cash book from the
//! append-only record collections:
//!
//! - [`opening_balance`] - net balance carried forward from all history
//!   strictly before a target month
//! - [`generate`] - the ordered, balance-annotated [`LedgerEntry`] list
//!   for one month and currency
//! - [`summarize`] - totals, net flow, and closing balance over a
//!   generated ledger
//!
//! All functions are pure and synchronous over already-materialized
//! slices. A caller wanting fresh output re-invokes with a newer
//! snapshot; nothing is cached between calls.
//!
//! # Example
//!
//! ```
//! use cashbook_core::{Currency, DualAmount, FallbackLabels, MasterData, RawDate, SaleRecord};
//! use cashbook_ledger::{generate, opening_balance, summarize, LedgerInput};
//! use rust_decimal_macros::dec;
//!
//! let sales = vec![SaleRecord {
//!     id: "s1".into(),
//!     date: RawDate::Text("2024-03-05".into()),
//!     amounts: DualAmount::new(dec!(500), dec!(0.18)),
//!     product_id: "p1".into(),
//!     activity_type_id: "retail".into(),
//!     channel: "counter".into(),
//! }];
//!
//! let opening = opening_balance(&sales, &[], &[], 2024, 2, Currency::Local).unwrap();
//! assert_eq!(opening, dec!(0));
//!
//! let input = LedgerInput { sales: &sales, costs: &[], manual_entries: &[] };
//! let entries = generate(
//!     &input,
//!     2024,
//!     2,
//!     Currency::Local,
//!     opening,
//!     &MasterData::new(),
//!     &FallbackLabels::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].balance, dec!(500));
//! assert_eq!(summarize(&entries).net_flow, dec!(500));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod entry;
pub mod generate;
pub mod opening;
pub mod summary;

pub use entry::{LedgerEntry, SourceKind};
pub use generate::{generate, LedgerInput};
pub use opening::opening_balance;
pub use summary::{summarize, LedgerSummary};

// Re-export the error callers must handle
pub use cashbook_core::PeriodError;
