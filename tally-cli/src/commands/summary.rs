//! Summary command - totals, balance and category breakdowns

use anyhow::Result;
use colored::Colorize;
use tally_core::domain::{
    calculate_totals, category_breakdown, filter_by_period, validate_records, CategorySlice,
    TransactionType,
};
use tally_core::services::Report;

use super::{get_context, piped_records};
use crate::output::{create_table, format_amount, paint, tone_cell, warning};

pub fn run(period: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context()?;

    let report = match piped_records()? {
        Some(records) => {
            let records: Vec<_> = match period {
                Some(p) => filter_by_period(&records, p).into_iter().cloned().collect(),
                None => records,
            };
            let summary = calculate_totals(&records);
            Report {
                period: period.map(str::to_string),
                income_breakdown: category_breakdown(&summary, TransactionType::Income),
                expense_breakdown: category_breakdown(&summary, TransactionType::Expense),
                summary,
                validation: validate_records(&records),
            }
        }
        None => ctx.summary_service.report(period)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let symbol = &ctx.config.currency_symbol;
    let summary = &report.summary;

    match &report.period {
        Some(p) => println!("{}", format!("Summary for {}", p).bold()),
        None => println!("{}", "Summary".bold()),
    }
    println!();

    let mut table = create_table();
    table.add_row(vec![
        tone_cell("Income", TransactionType::Income.colors()),
        tone_cell(format_amount(symbol, summary.total_income), TransactionType::Income.colors()),
    ]);
    table.add_row(vec![
        tone_cell("Expenses", TransactionType::Expense.colors()),
        tone_cell(format_amount(symbol, summary.total_expenses), TransactionType::Expense.colors()),
    ]);
    table.add_row(vec!["Balance".to_string(), format_amount(symbol, summary.balance)]);
    println!("{}", table);

    print_breakdown("Income by category", &report.income_breakdown, symbol);
    print_breakdown("Expenses by category", &report.expense_breakdown, symbol);

    if report.validation.skipped > 0 {
        println!();
        warning(&format!(
            "{} record(s) skipped: unrecognized type or non-positive amount",
            report.validation.skipped
        ));
    }

    Ok(())
}

fn print_breakdown(title: &str, slices: &[CategorySlice], symbol: &str) {
    if slices.is_empty() {
        return;
    }
    println!();
    println!("{}", paint(title, slices[0].colors).bold());

    let mut table = create_table();
    table.set_header(vec!["Category", "Amount", "Share"]);
    for slice in slices {
        table.add_row(vec![
            slice.category.clone(),
            format_amount(symbol, slice.amount),
            format!("{:.2}%", slice.share),
        ]);
    }
    println!("{}", table);
}
