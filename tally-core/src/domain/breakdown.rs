//! Derived views over records and summaries: chart slices, monthly totals,
//! period filtering and validation reports

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::color::ColorDescriptor;
use super::summary::{classify, Summary};
use super::transaction::TransactionRecord;
use super::transaction_type::TransactionType;

/// One category's share of a type total
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySlice {
    pub category: String,
    pub amount: Decimal,
    /// Percentage of the type total, rounded to 2 places
    pub share: Decimal,
    pub colors: &'static ColorDescriptor,
}

/// Chart slices for one type, largest first
///
/// Every slice carries the descriptor of `kind`; slice position plays no
/// part in coloring.
pub fn category_breakdown(summary: &Summary, kind: TransactionType) -> Vec<CategorySlice> {
    let total = summary.total(kind);
    let colors = kind.colors();

    let mut slices: Vec<CategorySlice> = summary
        .categories(kind)
        .iter()
        .map(|(category, amount)| CategorySlice {
            category: category.clone(),
            amount: *amount,
            share: percent_of(*amount, total),
            colors,
        })
        .collect();

    slices.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
    slices
}

/// `part / whole * 100` rounded to 2 places, zero when `whole` is zero
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or(Decimal::ZERO)
}

/// Income, expenses and balance for one month
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    pub count: usize,
}

/// Totals per `YYYY-MM`, in chronological order
///
/// Only valid records with a readable date are included.
pub fn monthly_totals<'a, I>(records: I) -> BTreeMap<String, PeriodTotals>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut months: BTreeMap<String, PeriodTotals> = BTreeMap::new();

    for record in records {
        let Some((kind, amount)) = classify(record) else {
            continue;
        };
        let Some(period) = record.period() else {
            continue;
        };
        let totals = months.entry(period).or_default();
        match kind {
            TransactionType::Income => totals.income = totals.income.saturating_add(amount),
            TransactionType::Expense => totals.expenses = totals.expenses.saturating_add(amount),
        }
        totals.count += 1;
    }

    for totals in months.values_mut() {
        totals.balance = totals.income - totals.expenses;
    }
    months
}

/// Records dated within `period` (`YYYY-MM`), in their original order
pub fn filter_by_period<'a>(
    records: &'a [TransactionRecord],
    period: &str,
) -> Vec<&'a TransactionRecord> {
    let period = period.trim();
    records
        .iter()
        .filter(|r| r.period().as_deref() == Some(period))
        .collect()
}

/// Which records of a collection count toward totals
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: usize,
    pub skipped: usize,
    pub skipped_indices: Vec<usize>,
}

pub fn validate_records(records: &[TransactionRecord]) -> ValidationReport {
    let mut report = ValidationReport::default();
    for (idx, record) in records.iter().enumerate() {
        if classify(record).is_some() {
            report.valid += 1;
        } else {
            report.skipped += 1;
            report.skipped_indices.push(idx);
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::color::{EXPENSE_COLORS, INCOME_COLORS};
    use crate::domain::summary::calculate_totals;

    fn records() -> Vec<TransactionRecord> {
        vec![
            TransactionRecord::new("income", 3000).with_category("Salary").with_date("2024-01-05"),
            TransactionRecord::new("expense", 900).with_category("Rent").with_date("2024-01-10"),
            TransactionRecord::new("expense", 300).with_category("Food").with_date("2024-01-20"),
            TransactionRecord::new("expense", 300).with_category("Bills").with_date("2024-02-01"),
            TransactionRecord::new("income", 500).with_category("Freelance").with_date("02/02/2024"),
            TransactionRecord::new("expense", 50).with_category("Food"),
            TransactionRecord::new("bogus", 70).with_date("2024-02-03"),
        ]
    }

    #[test]
    fn test_breakdown_order_and_share() {
        let summary = calculate_totals(&records());
        let slices = category_breakdown(&summary, TransactionType::Expense);

        let names: Vec<&str> = slices.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Food", "Bills"]);
        assert_eq!(slices[0].share, Decimal::new(5806, 2));
        assert_eq!(slices[1].amount, Decimal::from(350));
    }

    #[test]
    fn test_breakdown_colors_follow_type_not_position() {
        let summary = calculate_totals(&records());
        for slice in category_breakdown(&summary, TransactionType::Expense) {
            assert!(std::ptr::eq(slice.colors, &EXPENSE_COLORS));
        }
        for slice in category_breakdown(&summary, TransactionType::Income) {
            assert!(std::ptr::eq(slice.colors, &INCOME_COLORS));
        }
    }

    #[test]
    fn test_breakdown_of_empty_summary() {
        let summary = Summary::default();
        assert!(category_breakdown(&summary, TransactionType::Income).is_empty());
        assert_eq!(percent_of(Decimal::ONE, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_monthly_totals() {
        let months = monthly_totals(&records());
        let keys: Vec<&str> = months.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["2024-01", "2024-02"]);

        let jan = &months["2024-01"];
        assert_eq!(jan.income, Decimal::from(3000));
        assert_eq!(jan.expenses, Decimal::from(1200));
        assert_eq!(jan.balance, Decimal::from(1800));
        assert_eq!(jan.count, 3);

        let feb = &months["2024-02"];
        assert_eq!(feb.balance, Decimal::from(200));
        assert_eq!(feb.count, 2);
    }

    #[test]
    fn test_filter_by_period() {
        let records = records();
        let feb = filter_by_period(&records, "2024-02");
        assert_eq!(feb.len(), 3);
        assert_eq!(feb[0].category_label(), "Bills");
        assert!(filter_by_period(&records, "2023-12").is_empty());
    }

    #[test]
    fn test_validation_report() {
        let report = validate_records(&records());
        assert_eq!(report.valid, 6);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.skipped_indices, vec![6]);
    }
}
