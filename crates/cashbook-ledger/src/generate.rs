//! Monthly ledger generation.
//!
//! [`generate`] merges the three cash-book sources into one ordered,
//! balance-annotated ledger for a single calendar month:
//!
//! 1. normalize every record's date and keep only valid instants inside
//!    the month window (malformed dates are skipped, never fatal),
//! 2. map each retained record to a [`LedgerEntry`], selecting cash-in or
//!    cash-out in the requested currency and rendering a description
//!    through the master-data lookups,
//! 3. sort by `(instant, source precedence)`,
//! 4. fold the running balance from the caller-supplied opening balance.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use cashbook_core::{
    CostRecord, Currency, FallbackLabels, ManualEntry, MasterData, MonthWindow, MovementRecord,
    PeriodError, SaleRecord,
};

use crate::entry::{LedgerEntry, SourceKind};

/// Borrowed record slices for one ledger generation.
///
/// The engine consumes already-loaded snapshots; it never queries a
/// store itself. An absent collection is just an empty slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerInput<'a> {
    /// The sales collection.
    pub sales: &'a [SaleRecord],
    /// The costs collection.
    pub costs: &'a [CostRecord],
    /// The manual-entries collection.
    pub manual_entries: &'a [ManualEntry],
}

/// Generate the ordered, balance-annotated ledger for one month.
///
/// `opening_balance` must come from
/// [`opening_balance`](crate::opening_balance) for the same period and
/// currency; the generator itself only folds forward from it. The output
/// is a fresh vector on every call and the inputs are never mutated, so
/// identical inputs always produce identical output.
///
/// The only error is an unrepresentable period; every data-quality
/// problem (malformed date, unresolved reference id) is absorbed per
/// record and reported through `tracing`.
pub fn generate(
    input: &LedgerInput<'_>,
    year: i32,
    month0: u32,
    currency: Currency,
    opening_balance: Decimal,
    master: &MasterData,
    labels: &FallbackLabels,
) -> Result<Vec<LedgerEntry>, PeriodError> {
    let window = MonthWindow::new(year, month0)?;
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    collect(input.sales, &window, &mut skipped, &mut entries, |sale, instant| {
        to_entry(
            sale,
            instant,
            SourceKind::Sale,
            describe_sale(sale, master, labels),
            currency,
        )
    });
    collect(input.costs, &window, &mut skipped, &mut entries, |cost, instant| {
        to_entry(
            cost,
            instant,
            SourceKind::Cost,
            describe_cost(cost, master, labels),
            currency,
        )
    });
    collect(
        input.manual_entries,
        &window,
        &mut skipped,
        &mut entries,
        |entry, instant| {
            to_entry(
                entry,
                instant,
                SourceKind::Manual,
                entry.description.clone(),
                currency,
            )
        },
    );

    if skipped > 0 {
        tracing::debug!(skipped, year, month0, "records with malformed dates excluded from ledger");
    }

    // Stable sort: same-collection records sharing an instant keep their
    // insertion order, so repeated runs cannot flip ties.
    entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.source.cmp(&b.source)));

    let mut balance = opening_balance;
    for entry in &mut entries {
        balance = balance + entry.cash_in - entry.cash_out;
        entry.balance = balance;
    }

    Ok(entries)
}

/// Push an entry for every record with a valid instant inside the window.
fn collect<R, F>(
    records: &[R],
    window: &MonthWindow,
    skipped: &mut usize,
    entries: &mut Vec<LedgerEntry>,
    mut build: F,
) where
    R: MovementRecord,
    F: FnMut(&R, DateTime<Utc>) -> LedgerEntry,
{
    for record in records {
        match record.instant() {
            Some(instant) if window.contains(instant) => entries.push(build(record, instant)),
            Some(_) => {}
            None => {
                tracing::debug!(id = record.id(), "record date did not normalize, skipped");
                *skipped += 1;
            }
        }
    }
}

/// Map a record to an entry with a zero balance; the fold fills it in.
fn to_entry<R: MovementRecord>(
    record: &R,
    instant: DateTime<Utc>,
    source: SourceKind,
    description: String,
    currency: Currency,
) -> LedgerEntry {
    let signed = record.signed_contribution(currency);
    let (cash_in, cash_out) = if signed.is_sign_negative() {
        (Decimal::ZERO, -signed)
    } else {
        (signed, Decimal::ZERO)
    };
    let amounts = record.amounts();
    LedgerEntry {
        date: instant,
        source,
        reference: record.id().to_owned(),
        description,
        cash_in,
        cash_out,
        exchange_rate: amounts.exchange_rate,
        amount_local: amounts.local,
        amount_foreign: amounts.foreign,
        balance: Decimal::ZERO,
    }
}

fn describe_sale(sale: &SaleRecord, master: &MasterData, labels: &FallbackLabels) -> String {
    let product = resolve(
        master.product(&sale.product_id),
        &labels.product,
        "product",
        &sale.product_id,
    );
    let activity = resolve(
        master.activity(&sale.activity_type_id),
        &labels.activity,
        "activity",
        &sale.activity_type_id,
    );
    format!("Sale: {product} ({activity}, {})", sale.channel)
}

fn describe_cost(cost: &CostRecord, master: &MasterData, labels: &FallbackLabels) -> String {
    let expense = resolve(
        master.expense_type(&cost.expense_type_id),
        &labels.expense_type,
        "expense_type",
        &cost.expense_type_id,
    );
    let activity = resolve(
        master.activity(&cost.activity_type_id),
        &labels.activity,
        "activity",
        &cost.activity_type_id,
    );
    format!("{expense} ({activity})")
}

fn resolve<'a>(found: Option<&'a str>, fallback: &'a str, field: &str, id: &str) -> &'a str {
    match found {
        Some(name) => name,
        None => {
            tracing::debug!(field, id, "reference id did not resolve, using fallback label");
            fallback
        }
    }
}
