//! Months command - totals per month

use anyhow::Result;
use tally_core::domain::TransactionType;

use super::get_context;
use crate::output::{create_table, format_amount, tone_cell};

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let months = ctx.summary_service.monthly()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&months)?);
        return Ok(());
    }

    if months.is_empty() {
        println!("No dated records.");
        return Ok(());
    }

    let symbol = &ctx.config.currency_symbol;
    let mut table = create_table();
    table.set_header(vec!["Month", "Income", "Expenses", "Balance", "Records"]);
    for (month, totals) in &months {
        table.add_row(vec![
            comfy_table::Cell::new(month),
            tone_cell(format_amount(symbol, totals.income), TransactionType::Income.colors()),
            tone_cell(format_amount(symbol, totals.expenses), TransactionType::Expense.colors()),
            comfy_table::Cell::new(format_amount(symbol, totals.balance)),
            comfy_table::Cell::new(totals.count),
        ]);
    }
    println!("{}", table);
    Ok(())
}
