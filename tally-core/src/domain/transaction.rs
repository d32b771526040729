//! Transaction records
//!
//! [`TransactionRecord`] is the untrusted shape records arrive in from any
//! storage backend. [`Transaction`] is the strictly validated form used when
//! new records are accepted into storage.

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::amount::normalize_amount;
use super::result::{Error, Result};
use super::transaction_type::{normalize_type, TransactionType};
use super::value::RawValue;

/// Category label for records without one
pub const FALLBACK_CATEGORY: &str = "Other";

/// Accepted date layouts besides RFC 3339
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];

/// A transaction-like record as fetched, with no guarantees on its fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(default, skip_serializing_if = "RawValue::is_null")]
    pub id: RawValue,
    #[serde(rename = "type", default)]
    pub kind: RawValue,
    #[serde(default)]
    pub amount: RawValue,
    #[serde(default, skip_serializing_if = "RawValue::is_null")]
    pub category: RawValue,
    #[serde(default, skip_serializing_if = "RawValue::is_null")]
    pub description: RawValue,
    #[serde(default, skip_serializing_if = "RawValue::is_null")]
    pub date: RawValue,
}

impl TransactionRecord {
    /// Create a record from a type label and an amount
    pub fn new(kind: impl Into<RawValue>, amount: impl Into<RawValue>) -> Self {
        Self {
            kind: kind.into(),
            amount: amount.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<RawValue>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<RawValue>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<RawValue>) -> Self {
        self.description = description.into();
        self
    }

    /// Trimmed category, or [`FALLBACK_CATEGORY`] when absent or blank
    pub fn category_label(&self) -> &str {
        self.category.as_label().unwrap_or(FALLBACK_CATEGORY)
    }

    /// Record ID as text, if it has one
    pub fn id_str(&self) -> Option<&str> {
        self.id.as_label()
    }

    /// Parsed calendar date, if the record carries a readable one
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(self.date.as_label()?)
    }

    /// Month bucket (`YYYY-MM`) of the record date
    pub fn period(&self) -> Option<String> {
        self.parsed_date().map(|d| d.format("%Y-%m").to_string())
    }
}

/// Parse a date in one of the layouts records are stored with
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Turn a JSON document into a record collection
///
/// Anything other than an array is an empty collection. Array elements that
/// are not objects become empty records, which classify to nothing.
pub fn records_from_json(value: &JsonValue) -> Vec<TransactionRecord> {
    match value {
        JsonValue::Array(items) => items
            .iter()
            .map(|item| match item {
                JsonValue::Object(_) => {
                    serde_json::from_value(item.clone()).unwrap_or_default()
                }
                _ => TransactionRecord::default(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// A validated transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

impl TryFrom<&TransactionRecord> for Transaction {
    type Error = Error;

    fn try_from(record: &TransactionRecord) -> Result<Self> {
        let kind = normalize_type(&record.kind).ok_or_else(|| {
            Error::validation(format!("unrecognized transaction type: {:?}", record.kind))
        })?;

        let amount = normalize_amount(&record.amount);
        if amount <= Decimal::ZERO {
            return Err(Error::validation(format!(
                "amount must be a positive number: {:?}",
                record.amount
            )));
        }

        let date = match record.date.as_label() {
            Some(text) => Some(
                parse_date(text)
                    .ok_or_else(|| Error::validation(format!("unreadable date: {}", text)))?,
            ),
            None => None,
        };

        Ok(Self {
            id: record.id_str().map(str::to_string),
            kind,
            amount,
            category: record.category_label().to_string(),
            description: record.description.as_label().map(str::to_string),
            date,
        })
    }
}

impl From<&Transaction> for TransactionRecord {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id.clone().into(),
            kind: tx.kind.as_str().into(),
            amount: tx.amount.into(),
            category: tx.category.as_str().into(),
            description: tx.description.clone().into(),
            date: tx.date.map(|d| d.format("%Y-%m-%d").to_string()).into(),
        }
    }
}
