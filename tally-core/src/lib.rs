//! Tally Core - Transaction normalization and aggregation
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Normalization, color descriptors, totals and breakdowns
//! - **ports**: Trait definitions for record storage
//! - **services**: Business logic orchestration (summaries, records, CSV import)
//! - **adapters**: Concrete implementations (in-memory, JSON file)
//! - **config**: `settings.json` handling

pub mod domain;
pub mod ports;
pub mod services;
pub mod adapters;
pub mod config;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use adapters::JsonFileRepository;
use config::Config;
use ports::TransactionRepository;
use services::*;

// Re-export commonly used types at crate root
pub use domain::{
    calculate_totals, filter_by_type, get_color_by_type, is_valid_transaction, normalize_amount,
    normalize_type, ColorDescriptor, RawValue, Summary, Transaction, TransactionRecord,
    TransactionType,
};
pub use domain::result::Error;

/// Main context for Tally operations
///
/// This is the primary entry point for all business logic. It holds
/// the record store, configuration, and all services.
pub struct TallyContext {
    pub config: Config,
    pub repository: Arc<dyn TransactionRepository>,
    pub summary_service: SummaryService,
    pub record_service: RecordService,
    pub import_service: ImportService,
}

impl TallyContext {
    /// Create a context backed by `transactions.json` in `data_dir`
    pub fn new(data_dir: &Path) -> Result<Self> {
        let repository: Arc<dyn TransactionRepository> = Arc::new(JsonFileRepository::in_dir(data_dir));
        Self::with_repository(data_dir, repository)
    }

    /// Create a context over any record store
    pub fn with_repository(data_dir: &Path, repository: Arc<dyn TransactionRepository>) -> Result<Self> {
        let config = Config::load(data_dir)?;
        debug!(storage = repository.name(), data_dir = ?data_dir, "opening tally context");

        let summary_service = SummaryService::new(Arc::clone(&repository));
        let record_service = RecordService::new(Arc::clone(&repository));
        let import_service = ImportService::new(Arc::clone(&repository), data_dir.to_path_buf());

        Ok(Self {
            config,
            repository,
            summary_service,
            record_service,
            import_service,
        })
    }
}
