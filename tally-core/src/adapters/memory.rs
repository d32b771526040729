//! In-memory repository keyed by period

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::domain::result::{Error, Result};
use crate::domain::TransactionRecord;
use crate::ports::repository::{period_key, with_id};
use crate::ports::TransactionRepository;

/// Records held in process memory, bucketed by `YYYY-MM`
///
/// Each instance owns its data; share one through an `Arc` when several
/// services need the same store.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    periods: RwLock<BTreeMap<String, Vec<TransactionRecord>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-filled with records
    pub fn with_records(records: impl IntoIterator<Item = TransactionRecord>) -> Result<Self> {
        let repo = Self::new();
        for record in records {
            repo.add_record(&record)?;
        }
        Ok(repo)
    }

    /// Periods that currently hold at least one record
    pub fn periods(&self) -> Result<Vec<String>> {
        let periods = self.periods.read().map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        Ok(periods.keys().cloned().collect())
    }
}

impl TransactionRepository for InMemoryRepository {
    fn name(&self) -> &str {
        "memory"
    }

    fn list_records(&self, period: Option<&str>) -> Result<Vec<TransactionRecord>> {
        let periods = self.periods.read().map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        let records = match period {
            Some(p) => periods.get(p.trim()).cloned().unwrap_or_default(),
            None => periods.values().flatten().cloned().collect(),
        };
        Ok(records)
    }

    fn add_record(&self, record: &TransactionRecord) -> Result<String> {
        let (id, stored) = with_id(record);
        let mut periods = self.periods.write().map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        periods.entry(period_key(&stored)).or_default().push(stored);
        Ok(id)
    }

    fn remove_record(&self, id: &str) -> Result<bool> {
        let mut periods = self.periods.write().map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        let mut removed = false;
        for records in periods.values_mut() {
            let before = records.len();
            records.retain(|r| r.id_str() != Some(id));
            removed |= records.len() != before;
        }
        periods.retain(|_, records| !records.is_empty());
        Ok(removed)
    }

    fn clear(&self) -> Result<()> {
        let mut periods = self.periods.write().map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        periods.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::UNDATED_PERIOD;

    #[test]
    fn test_records_bucketed_by_period() {
        let repo = InMemoryRepository::with_records(vec![
            TransactionRecord::new("income", 100).with_date("2024-01-03"),
            TransactionRecord::new("expense", 30).with_date("2024-02-11"),
            TransactionRecord::new("expense", 5),
        ])
        .unwrap();

        assert_eq!(repo.periods().unwrap(), vec!["2024-01", "2024-02", UNDATED_PERIOD]);
        assert_eq!(repo.list_records(Some("2024-02")).unwrap().len(), 1);
        assert_eq!(repo.list_records(Some(UNDATED_PERIOD)).unwrap().len(), 1);
        assert!(repo.list_records(Some("1999-01")).unwrap().is_empty());
        assert_eq!(repo.list_records(None).unwrap().len(), 3);
    }

    #[test]
    fn test_ids_assigned_and_kept() {
        let repo = InMemoryRepository::new();
        let generated = repo.add_record(&TransactionRecord::new("income", 1)).unwrap();
        assert_eq!(generated.len(), 36);

        let mut record = TransactionRecord::new("income", 2);
        record.id = "fixed-id".into();
        assert_eq!(repo.add_record(&record).unwrap(), "fixed-id");

        let stored = repo.list_records(None).unwrap();
        assert!(stored.iter().all(|r| r.id_str().is_some()));
    }

    #[test]
    fn test_remove_and_clear() {
        let repo = InMemoryRepository::new();
        let id = repo
            .add_record(&TransactionRecord::new("expense", 9).with_date("2024-05-01"))
            .unwrap();
        repo.add_record(&TransactionRecord::new("income", 3)).unwrap();

        assert!(repo.remove_record(&id).unwrap());
        assert!(!repo.remove_record(&id).unwrap());
        assert_eq!(repo.periods().unwrap(), vec![UNDATED_PERIOD]);

        repo.clear().unwrap();
        assert!(repo.list_records(None).unwrap().is_empty());
    }

    #[test]
    fn test_independent_instances() {
        let a = InMemoryRepository::new();
        let b = InMemoryRepository::new();
        a.add_record(&TransactionRecord::new("income", 1)).unwrap();
        assert!(b.list_records(None).unwrap().is_empty());
    }
}
