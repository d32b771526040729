//! Canonical transaction type

use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::RawValue;

const INCOME_LABELS: [&str; 3] = ["income", "receita", "receitas"];
const EXPENSE_LABELS: [&str; 3] = ["expense", "despesa", "despesas"];

/// The two recognized transaction classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an arbitrary type label
///
/// Matching is case-insensitive after trimming and accepts the English and
/// Portuguese spellings. Anything that is not recognized text is `None`.
pub fn normalize_type(input: &RawValue) -> Option<TransactionType> {
    let label = input.as_text()?.trim().to_lowercase();
    if INCOME_LABELS.contains(&label.as_str()) {
        Some(TransactionType::Income)
    } else if EXPENSE_LABELS.contains(&label.as_str()) {
        Some(TransactionType::Expense)
    } else {
        None
    }
}
