//! Record service - adding, listing and removing transactions

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::result::Error;
use crate::domain::{filter_by_type, RawValue, Transaction, TransactionRecord};
use crate::ports::TransactionRepository;

/// Optional restrictions for listing records
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Type label; an unrecognized label matches nothing
    pub kind: Option<String>,
    /// `YYYY-MM` period
    pub period: Option<String>,
}

/// Record service for transaction storage
pub struct RecordService {
    repository: Arc<dyn TransactionRepository>,
}

impl RecordService {
    pub fn new(repository: Arc<dyn TransactionRepository>) -> Self {
        Self { repository }
    }

    /// Validate and store a new record, returning the stored transaction
    ///
    /// Strict on purpose: unlike aggregation, storage refuses records that
    /// would not count toward any total.
    pub fn add(&self, record: &TransactionRecord) -> Result<Transaction> {
        let mut tx = Transaction::try_from(record)?;
        let id = self
            .repository
            .add_record(&TransactionRecord::from(&tx))
            .context("Failed to store record")?;
        info!(id = %id, kind = %tx.kind, "added record");
        tx.id = Some(id);
        Ok(tx)
    }

    /// Stored records matching `filter`, in storage order
    pub fn list(&self, filter: &RecordFilter) -> Result<Vec<TransactionRecord>> {
        let records = self
            .repository
            .list_records(filter.period.as_deref())
            .context("Failed to load records")?;

        Ok(match &filter.kind {
            Some(kind) => filter_by_type(&records, &RawValue::from(kind.as_str()))
                .into_iter()
                .cloned()
                .collect(),
            None => records,
        })
    }

    /// Remove a record by ID
    pub fn remove(&self, id: &str) -> Result<()> {
        if !self.repository.remove_record(id)? {
            return Err(Error::not_found(format!("record {}", id)).into());
        }
        info!(id = %id, "removed record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryRepository;
    use crate::domain::TransactionType;
    use rust_decimal::Decimal;

    fn service() -> RecordService {
        RecordService::new(Arc::new(InMemoryRepository::new()))
    }

    #[test]
    fn test_add_stores_canonical_record() {
        let service = service();
        let tx = service
            .add(&TransactionRecord::new(" Despesas ", "R$ 1.234,56").with_date("2024-06-02"))
            .unwrap();

        assert!(tx.id.is_some());
        assert_eq!(tx.kind, TransactionType::Expense);
        assert_eq!(tx.amount, Decimal::new(123456, 2));

        let stored = service.list(&RecordFilter::default()).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].kind, RawValue::from("expense"));
        assert_eq!(stored[0].amount, RawValue::from("1234.56"));
        assert_eq!(stored[0].category_label(), "Other");
    }

    #[test]
    fn test_add_rejects_invalid() {
        let service = service();
        assert!(service.add(&TransactionRecord::new("loan", 10)).is_err());
        assert!(service.add(&TransactionRecord::new("income", 0)).is_err());
        assert!(service.list(&RecordFilter::default()).unwrap().is_empty());
    }

    #[test]
    fn test_list_filters() {
        let service = service();
        service.add(&TransactionRecord::new("income", 5).with_date("2024-01-01")).unwrap();
        service.add(&TransactionRecord::new("expense", 3).with_date("2024-01-02")).unwrap();
        service.add(&TransactionRecord::new("expense", 8).with_date("2024-02-02")).unwrap();

        let filter = RecordFilter {
            kind: Some("DESPESA".to_string()),
            period: None,
        };
        assert_eq!(service.list(&filter).unwrap().len(), 2);

        let filter = RecordFilter {
            kind: Some("expense".to_string()),
            period: Some("2024-01".to_string()),
        };
        assert_eq!(service.list(&filter).unwrap().len(), 1);

        let filter = RecordFilter {
            kind: Some("refund".to_string()),
            period: None,
        };
        assert!(service.list(&filter).unwrap().is_empty());
    }

    #[test]
    fn test_remove() {
        let service = service();
        let tx = service.add(&TransactionRecord::new("income", 5)).unwrap();
        let id = tx.id.unwrap();
        service.remove(&id).unwrap();
        let err = service.remove(&id).unwrap_err();
        assert!(err.to_string().contains("Not found: record"));
    }
}
