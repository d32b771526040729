//! CLI command implementations

pub mod add;
pub mod color;
pub mod goal;
pub mod import;
pub mod list;
pub mod months;
pub mod remove;
pub mod summary;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tally_core::domain::{records_from_json, TransactionRecord};
use tally_core::TallyContext;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "TALLY_DIR";

/// Get the tally directory from environment or default
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".tally"))
}

/// Get or create tally context
pub fn get_context() -> Result<TallyContext> {
    let data_dir = get_data_dir()?;

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create tally directory: {:?}", data_dir))?;

    TallyContext::new(&data_dir).context("Failed to initialize tally context")
}

/// Records piped on stdin as a JSON array, if stdin is not a terminal
///
/// Anything that is not an array reads as an empty collection.
pub fn piped_records() -> Result<Option<Vec<TransactionRecord>>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
    if input.trim().is_empty() {
        return Ok(None);
    }
    let value: serde_json::Value =
        serde_json::from_str(&input).context("Stdin is not valid JSON")?;
    Ok(Some(records_from_json(&value)))
}
