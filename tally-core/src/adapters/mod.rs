//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - In-process memory, bucketed by month, for tests and embedding
//! - A JSON document in the data directory for the CLI

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileRepository;
pub use memory::InMemoryRepository;
