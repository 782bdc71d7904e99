//! Opening-balance calculation.

use rust_decimal::Decimal;

use cashbook_core::{
    CostRecord, Currency, ManualEntry, MonthWindow, MovementRecord, PeriodError, SaleRecord,
};

/// Net balance carried forward from everything strictly before the month.
///
/// This is a full-history scan: there is no persisted running total, so
/// the result is only correct when the caller supplies the complete
/// record set. Records with malformed dates contribute nothing and are
/// counted in a `tracing` event. The sign convention matches the ledger:
/// sales add, costs subtract, manual entries follow their kind.
pub fn opening_balance(
    sales: &[SaleRecord],
    costs: &[CostRecord],
    manual_entries: &[ManualEntry],
    year: i32,
    month0: u32,
    currency: Currency,
) -> Result<Decimal, PeriodError> {
    let window = MonthWindow::new(year, month0)?;
    let mut skipped = 0usize;

    let balance = carried(sales, &window, currency, &mut skipped)
        + carried(costs, &window, currency, &mut skipped)
        + carried(manual_entries, &window, currency, &mut skipped);

    if skipped > 0 {
        tracing::debug!(
            skipped,
            year,
            month0,
            "records with malformed dates excluded from opening balance"
        );
    }
    Ok(balance)
}

/// Sum the signed contributions of records dated before the window.
fn carried<R: MovementRecord>(
    records: &[R],
    window: &MonthWindow,
    currency: Currency,
    skipped: &mut usize,
) -> Decimal {
    records
        .iter()
        .filter_map(|record| match record.instant() {
            Some(instant) if window.precedes(instant) => {
                Some(record.signed_contribution(currency))
            }
            Some(_) => None,
            None => {
                *skipped += 1;
                None
            }
        })
        .sum()
}
