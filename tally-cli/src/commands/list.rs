//! List command - show stored records

use anyhow::Result;
use tally_core::domain::{get_color_by_type, normalize_amount};
use tally_core::services::RecordFilter;

use super::get_context;
use crate::output::{create_table, format_amount, tone_cell};

pub fn run(kind: Option<String>, period: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let records = ctx.record_service.list(&RecordFilter { kind, period })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No records.");
        return Ok(());
    }

    let symbol = &ctx.config.currency_symbol;
    let mut table = create_table();
    table.set_header(vec!["ID", "Date", "Type", "Amount", "Category", "Description"]);

    for record in &records {
        let colors = get_color_by_type(&record.kind);
        table.add_row(vec![
            tone_cell(record.id_str().unwrap_or("-"), colors),
            tone_cell(record.date.as_label().unwrap_or("-"), colors),
            tone_cell(record.kind.as_label().unwrap_or("?"), colors),
            tone_cell(format_amount(symbol, normalize_amount(&record.amount)), colors),
            tone_cell(record.category_label(), colors),
            tone_cell(record.description.as_label().unwrap_or(""), colors),
        ]);
    }

    println!("{}", table);
    println!("{} record(s)", records.len());
    Ok(())
}
