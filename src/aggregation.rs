//! Pure aggregation of transactions into chart and table views.
//!
//! Every function here is deterministic and stateless: transactions come in
//! by reference, views come out by value, and the input is never mutated.
//! Empty input yields empty groupings and zero totals.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use time::{Date, OffsetDateTime};

use crate::transaction::{Transaction, TransactionKind};

/// The sentinel month filter value that keeps every transaction.
pub const ALL_MONTHS: &str = "all";

/// The bucket width used by [group_by_period].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// One bucket per calendar date.
    Daily,
    /// One bucket per ISO-8601 week.
    Weekly,
    /// One bucket per calendar month.
    Monthly,
    /// One bucket per calendar year.
    Yearly,
}

/// Income and expense sums for one time bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodTotals {
    /// The bucket key, e.g. `2024-01` for monthly grouping.
    pub period: String,
    /// Sum of the amounts of income transactions in the bucket.
    pub income: f64,
    /// Sum of the amounts of expense transactions in the bucket.
    pub expense: f64,
}

/// A per-category expense sum for the spending chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category name.
    pub name: String,
    /// The summed expense amount for the category.
    pub value: f64,
}

/// The column to sort the transactions table by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Chronological order.
    Timestamp,
    /// Lexicographic order of the category name.
    Category,
    /// Expense before income, matching their wire labels.
    Kind,
    /// Numeric order of the amount.
    Amount,
}

/// The direction to sort the transactions table in.
///
/// Toggling direction on a repeated sort of the same column is the caller's
/// policy, not the engine's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// Bucket transactions by time period, summing income and expense amounts
/// per bucket.
///
/// Output is sorted ascending by period key. The key formats are chosen so
/// lexicographic order equals chronological order: daily `YYYY-MM-DD`,
/// monthly `YYYY-MM`, yearly `YYYY`, and weekly `YYYY-Www` with the week
/// number zero-padded to two digits and the year to four.
pub fn group_by_period(transactions: &[Transaction], granularity: Granularity) -> Vec<PeriodTotals> {
    let mut buckets: HashMap<String, (f64, f64)> = HashMap::new();

    for transaction in transactions {
        let key = period_key(transaction.timestamp, granularity);
        let sums = buckets.entry(key).or_insert((0.0, 0.0));

        match transaction.kind {
            TransactionKind::Income => sums.0 += transaction.amount,
            TransactionKind::Expense => sums.1 += transaction.amount,
        }
    }

    let mut totals: Vec<PeriodTotals> = buckets
        .into_iter()
        .map(|(period, (income, expense))| PeriodTotals {
            period,
            income,
            expense,
        })
        .collect();
    totals.sort_by(|a, b| a.period.cmp(&b.period));

    totals
}

/// Sum expense amounts per category for the spending donut chart.
///
/// Income transactions are excluded entirely; there is no UI path that
/// charts income by category. Output is sorted by category name so repeated
/// calls render identically.
pub fn category_totals(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut sums: HashMap<&str, f64> = HashMap::new();

    for transaction in transactions {
        if transaction.kind != TransactionKind::Expense {
            continue;
        }

        *sums.entry(transaction.category.as_str()).or_insert(0.0) += transaction.amount;
    }

    let mut totals: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(name, value)| CategoryTotal {
            name: name.to_owned(),
            value,
        })
        .collect();
    totals.sort_by(|a, b| a.name.cmp(&b.name));

    totals
}

/// The month-filter options present in `transactions`, as `MM:YYYY` keys
/// sorted chronologically and always led by the sentinel [ALL_MONTHS].
pub fn distinct_months(transactions: &[Transaction]) -> Vec<String> {
    let mut months: HashSet<(i32, u8)> = HashSet::new();

    for transaction in transactions {
        let date = transaction.timestamp.date();
        months.insert((date.year(), u8::from(date.month())));
    }

    let mut sorted: Vec<(i32, u8)> = months.into_iter().collect();
    sorted.sort();

    let mut options = vec![ALL_MONTHS.to_owned()];
    options.extend(
        sorted
            .into_iter()
            .map(|(year, month)| format!("{month:02}:{year}")),
    );

    options
}

/// Keep only transactions falling in the `MM:YYYY` month `filter`, or all of
/// them for the sentinel [ALL_MONTHS].
pub fn filter_by_month(transactions: &[Transaction], filter: &str) -> Vec<Transaction> {
    if filter == ALL_MONTHS {
        return transactions.to_vec();
    }

    transactions
        .iter()
        .filter(|transaction| month_key(transaction.timestamp) == filter)
        .cloned()
        .collect()
}

/// Return the transactions stably sorted by `key` in `direction`.
///
/// The sort is stable in both directions: descending inverts the comparator
/// rather than reversing the result, so transactions that compare equal keep
/// their original relative order.
pub fn sort_transactions(
    transactions: &[Transaction],
    key: SortKey,
    direction: SortDirection,
) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();

    sorted.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Timestamp => a.timestamp.cmp(&b.timestamp),
            SortKey::Category => a.category.cmp(&b.category),
            SortKey::Kind => a.kind.as_str().cmp(b.kind.as_str()),
            SortKey::Amount => a.amount.partial_cmp(&b.amount).unwrap_or(Ordering::Equal),
        };

        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    sorted
}

fn period_key(timestamp: OffsetDateTime, granularity: Granularity) -> String {
    let date = timestamp.date();

    match granularity {
        Granularity::Daily => format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            u8::from(date.month()),
            date.day()
        ),
        Granularity::Weekly => iso_week_key(date),
        Granularity::Monthly => format!("{:04}-{:02}", date.year(), u8::from(date.month())),
        Granularity::Yearly => format!("{:04}", date.year()),
    }
}

/// ISO-8601 week key, e.g. `2025-W01`.
///
/// Uses the ISO week date, so the week year may differ from the calendar
/// year near year boundaries: a date belongs to the year containing the
/// Thursday of its week.
fn iso_week_key(date: Date) -> String {
    let (year, week, _) = date.to_iso_week_date();

    format!("{year:04}-W{week:02}")
}

fn month_key(timestamp: OffsetDateTime) -> String {
    let date = timestamp.date();

    format!("{:02}:{}", u8::from(date.month()), date.year())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::transaction::{Transaction, TransactionKind};

    use super::{
        ALL_MONTHS, CategoryTotal, Granularity, PeriodTotals, SortDirection, SortKey,
        category_totals, distinct_months, filter_by_month, group_by_period, sort_transactions,
    };

    fn transaction(
        amount: f64,
        kind: TransactionKind,
        category: &str,
        timestamp: time::OffsetDateTime,
    ) -> Transaction {
        Transaction {
            id: format!("txn-{category}-{amount}"),
            user_id: "test-user-123".to_owned(),
            amount,
            category: category.to_owned(),
            kind,
            timestamp,
        }
    }

    #[test]
    fn group_by_period_sums_income_and_expense_per_month() {
        let transactions = vec![
            transaction(
                10.0,
                TransactionKind::Income,
                "Salary",
                datetime!(2024-01-15 12:00 UTC),
            ),
            transaction(
                5.0,
                TransactionKind::Expense,
                "Food",
                datetime!(2024-01-20 12:00 UTC),
            ),
        ];

        let got = group_by_period(&transactions, Granularity::Monthly);

        assert_eq!(
            got,
            vec![PeriodTotals {
                period: "2024-01".to_owned(),
                income: 10.0,
                expense: 5.0,
            }]
        );
    }

    #[test]
    fn group_by_period_uses_expected_keys_per_granularity() {
        let transactions = vec![transaction(
            1.0,
            TransactionKind::Expense,
            "Food",
            datetime!(2024-01-15 12:00 UTC),
        )];

        let cases = [
            (Granularity::Daily, "2024-01-15"),
            (Granularity::Weekly, "2024-W03"),
            (Granularity::Monthly, "2024-01"),
            (Granularity::Yearly, "2024"),
        ];

        for (granularity, want) in cases {
            let got = group_by_period(&transactions, granularity);
            assert_eq!(got[0].period, want, "wrong key for {granularity:?}");
        }
    }

    #[test]
    fn weekly_keys_cross_year_boundaries_per_iso_rule() {
        // 2024-12-30 is a Monday in the week containing Thursday 2025-01-02,
        // so it belongs to ISO week 2025-W01.
        let transactions = vec![
            transaction(
                1.0,
                TransactionKind::Expense,
                "Food",
                datetime!(2024-12-30 12:00 UTC),
            ),
            transaction(
                2.0,
                TransactionKind::Expense,
                "Food",
                datetime!(2024-12-23 12:00 UTC),
            ),
        ];

        let got = group_by_period(&transactions, Granularity::Weekly);

        assert_eq!(got.len(), 2);
        assert_eq!(got[0].period, "2024-W52");
        assert_eq!(got[1].period, "2025-W01");
    }

    #[test]
    fn weekly_keys_are_zero_padded_so_string_order_is_chronological() {
        let transactions = vec![
            transaction(
                1.0,
                TransactionKind::Expense,
                "Food",
                datetime!(2024-03-05 12:00 UTC),
            ),
            transaction(
                2.0,
                TransactionKind::Expense,
                "Food",
                datetime!(2024-01-04 12:00 UTC),
            ),
        ];

        let got = group_by_period(&transactions, Granularity::Weekly);

        assert_eq!(got[0].period, "2024-W01");
        assert_eq!(got[1].period, "2024-W10");
    }

    #[test]
    fn group_by_period_sorts_periods_ascending() {
        let transactions = vec![
            transaction(
                1.0,
                TransactionKind::Expense,
                "Food",
                datetime!(2024-03-01 12:00 UTC),
            ),
            transaction(
                2.0,
                TransactionKind::Income,
                "Salary",
                datetime!(2023-11-01 12:00 UTC),
            ),
            transaction(
                3.0,
                TransactionKind::Expense,
                "Rent",
                datetime!(2024-01-01 12:00 UTC),
            ),
        ];

        let got = group_by_period(&transactions, Granularity::Monthly);
        let periods: Vec<&str> = got.iter().map(|totals| totals.period.as_str()).collect();

        assert_eq!(periods, vec!["2023-11", "2024-01", "2024-03"]);
    }

    #[test]
    fn group_by_period_handles_empty_input() {
        let got = group_by_period(&[], Granularity::Weekly);

        assert!(got.is_empty());
    }

    #[test]
    fn category_totals_excludes_income() {
        let transactions = vec![
            transaction(
                50.0,
                TransactionKind::Income,
                "X",
                datetime!(2024-01-15 12:00 UTC),
            ),
            transaction(
                20.0,
                TransactionKind::Expense,
                "Y",
                datetime!(2024-01-16 12:00 UTC),
            ),
        ];

        let got = category_totals(&transactions);

        assert_eq!(
            got,
            vec![CategoryTotal {
                name: "Y".to_owned(),
                value: 20.0,
            }]
        );
    }

    #[test]
    fn category_totals_sums_per_category_sorted_by_name() {
        let transactions = vec![
            transaction(
                30.0,
                TransactionKind::Expense,
                "Transport",
                datetime!(2024-01-15 12:00 UTC),
            ),
            transaction(
                10.0,
                TransactionKind::Expense,
                "Food",
                datetime!(2024-01-16 12:00 UTC),
            ),
            transaction(
                5.0,
                TransactionKind::Expense,
                "Food",
                datetime!(2024-02-01 12:00 UTC),
            ),
        ];

        let got = category_totals(&transactions);

        assert_eq!(got.len(), 2);
        assert_eq!(got[0].name, "Food");
        assert_eq!(got[0].value, 15.0);
        assert_eq!(got[1].name, "Transport");
        assert_eq!(got[1].value, 30.0);
    }

    #[test]
    fn category_totals_handles_empty_input() {
        assert!(category_totals(&[]).is_empty());
    }

    #[test]
    fn distinct_months_leads_with_sentinel_and_sorts_chronologically() {
        let transactions = vec![
            transaction(
                1.0,
                TransactionKind::Expense,
                "Food",
                datetime!(2024-02-10 12:00 UTC),
            ),
            transaction(
                2.0,
                TransactionKind::Income,
                "Salary",
                datetime!(2023-11-01 12:00 UTC),
            ),
            // Same month as the first transaction, must not duplicate.
            transaction(
                3.0,
                TransactionKind::Expense,
                "Rent",
                datetime!(2024-02-28 12:00 UTC),
            ),
            transaction(
                4.0,
                TransactionKind::Expense,
                "Food",
                datetime!(2024-01-05 12:00 UTC),
            ),
        ];

        let got = distinct_months(&transactions);

        assert_eq!(got, vec![ALL_MONTHS, "11:2023", "01:2024", "02:2024"]);
    }

    #[test]
    fn distinct_months_of_no_transactions_is_just_the_sentinel() {
        assert_eq!(distinct_months(&[]), vec![ALL_MONTHS]);
    }

    #[test]
    fn filter_by_month_keeps_everything_for_the_sentinel() {
        let transactions = vec![transaction(
            1.0,
            TransactionKind::Expense,
            "Food",
            datetime!(2024-01-15 12:00 UTC),
        )];

        let got = filter_by_month(&transactions, ALL_MONTHS);

        assert_eq!(got, transactions);
    }

    #[test]
    fn filter_by_month_matches_month_and_year_exactly() {
        let transactions = vec![
            transaction(
                1.0,
                TransactionKind::Expense,
                "Food",
                datetime!(2024-01-15 12:00 UTC),
            ),
            transaction(
                2.0,
                TransactionKind::Expense,
                "Rent",
                datetime!(2023-01-15 12:00 UTC),
            ),
            transaction(
                3.0,
                TransactionKind::Expense,
                "Food",
                datetime!(2024-02-15 12:00 UTC),
            ),
        ];

        let got = filter_by_month(&transactions, "01:2024");

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].amount, 1.0);
    }

    #[test]
    fn sort_transactions_is_stable_for_equal_categories() {
        let transactions = vec![
            transaction(
                1.0,
                TransactionKind::Expense,
                "Food",
                datetime!(2024-01-15 12:00 UTC),
            ),
            transaction(
                2.0,
                TransactionKind::Expense,
                "Food",
                datetime!(2024-01-10 12:00 UTC),
            ),
            transaction(
                3.0,
                TransactionKind::Expense,
                "Abc",
                datetime!(2024-01-12 12:00 UTC),
            ),
        ];

        let once = sort_transactions(&transactions, SortKey::Category, SortDirection::Ascending);
        let twice = sort_transactions(&once, SortKey::Category, SortDirection::Ascending);

        let amounts: Vec<f64> = twice.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn sort_transactions_by_timestamp_descending() {
        let transactions = vec![
            transaction(
                1.0,
                TransactionKind::Expense,
                "Food",
                datetime!(2024-01-10 12:00 UTC),
            ),
            transaction(
                2.0,
                TransactionKind::Expense,
                "Rent",
                datetime!(2024-03-10 12:00 UTC),
            ),
            transaction(
                3.0,
                TransactionKind::Expense,
                "Gas",
                datetime!(2024-02-10 12:00 UTC),
            ),
        ];

        let got = sort_transactions(&transactions, SortKey::Timestamp, SortDirection::Descending);

        let amounts: Vec<f64> = got.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![2.0, 3.0, 1.0]);
    }

    #[test]
    fn sort_transactions_by_kind_puts_expense_before_income_ascending() {
        let transactions = vec![
            transaction(
                1.0,
                TransactionKind::Income,
                "Salary",
                datetime!(2024-01-10 12:00 UTC),
            ),
            transaction(
                2.0,
                TransactionKind::Expense,
                "Food",
                datetime!(2024-01-11 12:00 UTC),
            ),
        ];

        let got = sort_transactions(&transactions, SortKey::Kind, SortDirection::Ascending);

        assert_eq!(got[0].kind, TransactionKind::Expense);
        assert_eq!(got[1].kind, TransactionKind::Income);
    }

    #[test]
    fn sort_transactions_by_amount() {
        let transactions = vec![
            transaction(
                20.0,
                TransactionKind::Expense,
                "Rent",
                datetime!(2024-01-10 12:00 UTC),
            ),
            transaction(
                5.0,
                TransactionKind::Expense,
                "Food",
                datetime!(2024-01-11 12:00 UTC),
            ),
        ];

        let got = sort_transactions(&transactions, SortKey::Amount, SortDirection::Ascending);

        assert_eq!(got[0].amount, 5.0);
        assert_eq!(got[1].amount, 20.0);
    }

    #[test]
    fn aggregation_functions_are_pure() {
        let transactions = vec![
            transaction(
                10.0,
                TransactionKind::Income,
                "Salary",
                datetime!(2024-01-15 12:00 UTC),
            ),
            transaction(
                5.0,
                TransactionKind::Expense,
                "Food",
                datetime!(2024-02-20 12:00 UTC),
            ),
        ];
        let original = transactions.clone();

        let grouped_first = group_by_period(&transactions, Granularity::Monthly);
        let grouped_second = group_by_period(&transactions, Granularity::Monthly);
        let totals_first = category_totals(&transactions);
        let totals_second = category_totals(&transactions);
        let sorted = sort_transactions(&transactions, SortKey::Amount, SortDirection::Descending);
        let filtered = filter_by_month(&transactions, "01:2024");

        assert_eq!(grouped_first, grouped_second);
        assert_eq!(totals_first, totals_second);
        assert_eq!(sorted.len(), 2);
        assert_eq!(filtered.len(), 1);
        assert_eq!(transactions, original, "input list must not be mutated");
    }
}
