//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

pub mod import;
mod record;
mod summary;

pub use import::{DetectedColumns, ImportResult, ImportService, RowPreview};
pub use record::{RecordFilter, RecordService};
pub use summary::{Report, SummaryService};
