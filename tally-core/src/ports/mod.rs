//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these traits, not on concrete implementations.

pub(crate) mod repository;

pub use repository::{TransactionRepository, UNDATED_PERIOD};
