//! Repository port - record storage abstraction

use crate::domain::result::Result;
use crate::domain::TransactionRecord;

/// Period bucket for records without a readable date
pub const UNDATED_PERIOD: &str = "undated";

/// Record storage abstraction
///
/// Implementations hand back records exactly as stored. Nothing here
/// validates them; aggregation copes with whatever comes back.
pub trait TransactionRepository: Send + Sync {
    /// Storage backend name (e.g., "memory", "json")
    fn name(&self) -> &str;

    /// All records, or only those in `period` (`YYYY-MM` or [`UNDATED_PERIOD`])
    fn list_records(&self, period: Option<&str>) -> Result<Vec<TransactionRecord>>;

    /// Store a record, assigning an ID when it has none. Returns the ID.
    fn add_record(&self, record: &TransactionRecord) -> Result<String>;

    /// Remove a record by ID. Returns false when no record had that ID.
    fn remove_record(&self, id: &str) -> Result<bool>;

    /// Remove every record
    fn clear(&self) -> Result<()>;
}

/// Period bucket a record is stored under
pub(crate) fn period_key(record: &TransactionRecord) -> String {
    record.period().unwrap_or_else(|| UNDATED_PERIOD.to_string())
}

/// Copy of `record` with an ID, generating one if missing
pub(crate) fn with_id(record: &TransactionRecord) -> (String, TransactionRecord) {
    let id = record
        .id_str()
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let mut stored = record.clone();
    stored.id = id.as_str().into();
    (id, stored)
}
