//! Aggregation of transaction records into totals and category breakdowns

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::normalize_amount;
use super::transaction::TransactionRecord;
use super::transaction_type::{normalize_type, TransactionType};
use super::value::RawValue;

/// Totals, balance and per-category sub-totals of a record collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    /// `total_income - total_expenses`, may be negative
    pub balance: Decimal,
    pub income_categories: BTreeMap<String, Decimal>,
    pub expense_categories: BTreeMap<String, Decimal>,
}

impl Summary {
    /// Total for one type
    pub fn total(&self, kind: TransactionType) -> Decimal {
        match kind {
            TransactionType::Income => self.total_income,
            TransactionType::Expense => self.total_expenses,
        }
    }

    /// Category map for one type
    pub fn categories(&self, kind: TransactionType) -> &BTreeMap<String, Decimal> {
        match kind {
            TransactionType::Income => &self.income_categories,
            TransactionType::Expense => &self.expense_categories,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.income_categories.is_empty() && self.expense_categories.is_empty()
    }
}

/// Canonical type and amount of a record that counts toward totals
pub fn classify(record: &TransactionRecord) -> Option<(TransactionType, Decimal)> {
    let kind = normalize_type(&record.kind)?;
    let amount = normalize_amount(&record.amount);
    (amount > Decimal::ZERO).then_some((kind, amount))
}

/// A record is valid when its type is recognized and its amount is positive
pub fn is_valid_transaction(record: &TransactionRecord) -> bool {
    classify(record).is_some()
}

/// Records whose type matches `type_input`, in their original order
///
/// An unrecognized `type_input` matches nothing.
pub fn filter_by_type<'a>(
    records: &'a [TransactionRecord],
    type_input: &RawValue,
) -> Vec<&'a TransactionRecord> {
    let Some(wanted) = normalize_type(type_input) else {
        return Vec::new();
    };
    records
        .iter()
        .filter(|r| normalize_type(&r.kind) == Some(wanted))
        .collect()
}

/// Reduce a record collection to totals in a single pass
///
/// Records with an unrecognized type or a zero amount are skipped.
pub fn calculate_totals<'a, I>(records: I) -> Summary
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut summary = Summary::default();

    for record in records {
        let Some((kind, amount)) = classify(record) else {
            continue;
        };
        let (total, categories) = match kind {
            TransactionType::Income => (&mut summary.total_income, &mut summary.income_categories),
            TransactionType::Expense => {
                (&mut summary.total_expenses, &mut summary.expense_categories)
            }
        };
        *total = total.saturating_add(amount);
        let entry = categories
            .entry(record.category_label().to_string())
            .or_insert(Decimal::ZERO);
        *entry = entry.saturating_add(amount);
    }

    summary.balance = summary.total_income - summary.total_expenses;
    summary
}
