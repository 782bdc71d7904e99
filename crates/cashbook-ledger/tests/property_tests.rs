//! Property-based tests for the monthly cash-book path.
//!
//! These tests verify the ledger invariants hold for arbitrary inputs
//! using proptest.
//!
//! Run with: cargo test -p cashbook-ledger --test `property_tests`

use cashbook_core::{
    CostRecord, Currency, DualAmount, EntryKind, FallbackLabels, ManualEntry, MasterData,
    MonthWindow, MovementRecord, RawDate, SaleRecord,
};
use cashbook_ledger::{generate, opening_balance, summarize, LedgerInput};
use chrono::DateTime;
use proptest::prelude::*;
use rust_decimal::Decimal;

// Target period for all properties: March 2024, month0 = 2.
const YEAR: i32 = 2024;
const MONTH0: u32 = 2;

// ============================================================================
// Arbitrary generators
// ============================================================================

fn arb_amounts() -> impl Strategy<Value = DualAmount> {
    (1i64..1_000_000i64, 1i64..100_000i64).prop_map(|(local, foreign)| {
        DualAmount::new(Decimal::new(local, 2), Decimal::new(foreign, 4))
    })
}

/// Instants from January 2024 through April 2024, spilling either side of
/// the target month, in a random stored encoding. A slice of the space
/// is unparseable text, which the engine must skip.
fn arb_raw_date() -> impl Strategy<Value = RawDate> {
    let seconds = 1_704_067_200i64..1_714_521_600i64;
    prop_oneof![
        4 => seconds.clone().prop_map(|s| RawDate::Timestamp { seconds: s, nanos: 0 }),
        2 => seconds.clone().prop_map(|s| RawDate::EpochMillis(s * 1000)),
        2 => seconds.clone().prop_map(|s| {
            RawDate::Instant(DateTime::from_timestamp(s, 0).unwrap())
        }),
        2 => seconds.prop_map(|s| {
            RawDate::Text(DateTime::from_timestamp(s, 0).unwrap().to_rfc3339())
        }),
        1 => Just(RawDate::Text("pending".into())),
    ]
}

fn arb_sales() -> impl Strategy<Value = Vec<SaleRecord>> {
    prop::collection::vec((arb_raw_date(), arb_amounts()), 0..20).prop_map(|seeds| {
        seeds
            .into_iter()
            .enumerate()
            .map(|(i, (date, amounts))| SaleRecord {
                id: format!("s{i}"),
                date,
                amounts,
                product_id: format!("p{}", i % 3),
                activity_type_id: "retail".into(),
                channel: "counter".into(),
            })
            .collect()
    })
}

fn arb_costs() -> impl Strategy<Value = Vec<CostRecord>> {
    prop::collection::vec((arb_raw_date(), arb_amounts()), 0..20).prop_map(|seeds| {
        seeds
            .into_iter()
            .enumerate()
            .map(|(i, (date, amounts))| CostRecord {
                id: format!("c{i}"),
                date,
                amounts,
                expense_type_id: format!("e{}", i % 3),
                activity_type_id: "retail".into(),
            })
            .collect()
    })
}

fn arb_manual_entries() -> impl Strategy<Value = Vec<ManualEntry>> {
    prop::collection::vec((arb_raw_date(), arb_amounts(), any::<bool>()), 0..10).prop_map(
        |seeds| {
            seeds
                .into_iter()
                .enumerate()
                .map(|(i, (date, amounts, credit))| ManualEntry {
                    id: format!("m{i}"),
                    date,
                    amounts,
                    description: format!("correction {i}"),
                    kind: if credit { EntryKind::Credit } else { EntryKind::Debit },
                })
                .collect()
        },
    )
}

fn arb_opening() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn run(
    sales: &[SaleRecord],
    costs: &[CostRecord],
    manual_entries: &[ManualEntry],
    currency: Currency,
    opening: Decimal,
) -> Vec<cashbook_ledger::LedgerEntry> {
    let input = LedgerInput {
        sales,
        costs,
        manual_entries,
    };
    generate(
        &input,
        YEAR,
        MONTH0,
        currency,
        opening,
        &MasterData::new(),
        &FallbackLabels::default(),
    )
    .unwrap()
}

/// References of the records that must appear in the target month's ledger.
fn expected_references(
    sales: &[SaleRecord],
    costs: &[CostRecord],
    manual_entries: &[ManualEntry],
) -> Vec<String> {
    let window = MonthWindow::new(YEAR, MONTH0).unwrap();
    let mut refs = Vec::new();
    for record in sales {
        if record.instant().is_some_and(|t| window.contains(t)) {
            refs.push(record.id.clone());
        }
    }
    for record in costs {
        if record.instant().is_some_and(|t| window.contains(t)) {
            refs.push(record.id.clone());
        }
    }
    for record in manual_entries {
        if record.instant().is_some_and(|t| window.contains(t)) {
            refs.push(record.id.clone());
        }
    }
    refs
}

// ============================================================================
// Ledger properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Same inputs, same output, down to every balance.
    #[test]
    fn prop_generate_is_deterministic(
        sales in arb_sales(),
        costs in arb_costs(),
        manual_entries in arb_manual_entries(),
        opening in arb_opening(),
    ) {
        let first = run(&sales, &costs, &manual_entries, Currency::Local, opening);
        let second = run(&sales, &costs, &manual_entries, Currency::Local, opening);
        prop_assert_eq!(first, second);
    }

    /// balance[i] = balance[i-1] + cash_in[i] - cash_out[i], seeded by the
    /// opening balance.
    #[test]
    fn prop_balance_fold_identity(
        sales in arb_sales(),
        costs in arb_costs(),
        manual_entries in arb_manual_entries(),
        opening in arb_opening(),
    ) {
        let entries = run(&sales, &costs, &manual_entries, Currency::Local, opening);
        let mut expected = opening;
        for entry in &entries {
            expected = expected + entry.cash_in - entry.cash_out;
            prop_assert_eq!(entry.balance, expected);
        }
    }

    /// Every record with a valid in-month date appears exactly once; every
    /// other record appears zero times.
    #[test]
    fn prop_partition_invariant(
        sales in arb_sales(),
        costs in arb_costs(),
        manual_entries in arb_manual_entries(),
    ) {
        let entries = run(&sales, &costs, &manual_entries, Currency::Local, Decimal::ZERO);

        let mut expected = expected_references(&sales, &costs, &manual_entries);
        let mut produced: Vec<String> =
            entries.iter().map(|entry| entry.reference.clone()).collect();
        expected.sort();
        produced.sort();
        prop_assert_eq!(produced, expected);
    }

    /// Entries are ordered by instant, with source precedence breaking ties.
    #[test]
    fn prop_ordering_invariant(
        sales in arb_sales(),
        costs in arb_costs(),
        manual_entries in arb_manual_entries(),
    ) {
        let entries = run(&sales, &costs, &manual_entries, Currency::Local, Decimal::ZERO);
        for pair in entries.windows(2) {
            let earlier = (&pair[0].date, pair[0].source);
            let later = (&pair[1].date, pair[1].source);
            prop_assert!(earlier <= later, "out of order: {earlier:?} then {later:?}");
        }
    }

    /// At most one of cash_in / cash_out is non-zero, and neither is negative.
    #[test]
    fn prop_cash_columns_are_exclusive(
        sales in arb_sales(),
        costs in arb_costs(),
        manual_entries in arb_manual_entries(),
    ) {
        let entries = run(&sales, &costs, &manual_entries, Currency::Local, Decimal::ZERO);
        for entry in &entries {
            prop_assert!(!entry.cash_in.is_sign_negative());
            prop_assert!(!entry.cash_out.is_sign_negative());
            prop_assert!(
                entry.cash_in.is_zero() || entry.cash_out.is_zero(),
                "both columns set on {}",
                entry.reference
            );
        }
    }

    /// Switching the requested currency changes magnitudes only, never
    /// which records appear or in what order.
    #[test]
    fn prop_currency_selection_preserves_shape(
        sales in arb_sales(),
        costs in arb_costs(),
        manual_entries in arb_manual_entries(),
    ) {
        let local = run(&sales, &costs, &manual_entries, Currency::Local, Decimal::ZERO);
        let foreign = run(&sales, &costs, &manual_entries, Currency::Foreign, Decimal::ZERO);

        prop_assert_eq!(local.len(), foreign.len());
        for (a, b) in local.iter().zip(&foreign) {
            prop_assert_eq!(&a.reference, &b.reference);
            prop_assert_eq!(a.source, b.source);
            prop_assert_eq!(a.date, b.date);
            prop_assert_eq!(a.amount_local, b.amount_local);
            prop_assert_eq!(a.amount_foreign, b.amount_foreign);
        }
    }

    /// Next month's opening balance equals this month's opening balance
    /// plus this month's net flow.
    #[test]
    fn prop_opening_balance_recurrence(
        sales in arb_sales(),
        costs in arb_costs(),
        manual_entries in arb_manual_entries(),
    ) {
        let this_month =
            opening_balance(&sales, &costs, &manual_entries, YEAR, MONTH0, Currency::Local)
                .unwrap();
        let next_month =
            opening_balance(&sales, &costs, &manual_entries, YEAR, MONTH0 + 1, Currency::Local)
                .unwrap();

        let entries = run(&sales, &costs, &manual_entries, Currency::Local, this_month);
        let summary = summarize(&entries);

        prop_assert_eq!(next_month, this_month + summary.net_flow);
    }

    /// The summary recovers the opening balance the generator was seeded
    /// with whenever the ledger is non-empty.
    #[test]
    fn prop_summary_recovers_opening(
        sales in arb_sales(),
        costs in arb_costs(),
        manual_entries in arb_manual_entries(),
        opening in arb_opening(),
    ) {
        let entries = run(&sales, &costs, &manual_entries, Currency::Local, opening);
        prop_assume!(!entries.is_empty());

        let summary = summarize(&entries);
        prop_assert_eq!(summary.opening_balance, opening);
        prop_assert_eq!(summary.closing_balance, entries.last().unwrap().balance);
    }
}
