//! Remove command - delete a record by ID

use anyhow::Result;
use colored::Colorize;

use super::get_context;

pub fn run(id: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    ctx.record_service.remove(id)?;

    if json {
        println!("{}", serde_json::json!({ "removed": id }));
    } else {
        println!("{} Record '{}' removed", "✓".green(), id);
    }
    Ok(())
}
