//! Add command - store a new record

use anyhow::Result;
use colored::Colorize;
use tally_core::domain::TransactionRecord;

use super::get_context;
use crate::output::{format_amount, paint};

pub fn run(
    kind: String,
    amount: String,
    category: Option<String>,
    description: Option<String>,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;

    let record = TransactionRecord::new(kind, amount)
        .with_category(category)
        .with_description(description)
        .with_date(date);
    let tx = ctx.record_service.add(&record)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tx)?);
        return Ok(());
    }

    let line = format!(
        "{} {} in {}",
        tx.kind,
        format_amount(&ctx.config.currency_symbol, tx.amount),
        tx.category
    );
    println!("{} Added {}", "✓".green(), paint(&line, tx.kind.colors()));
    if let Some(id) = &tx.id {
        println!("{}", format!("ID: {}", id).dimmed());
    }
    Ok(())
}
