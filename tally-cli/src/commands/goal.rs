//! Goal command - progress toward a savings target

use anyhow::Result;
use colored::Colorize;
use tally_core::domain::{RawValue, SavingsGoal};

use super::get_context;
use crate::output::{format_amount, success};

pub fn run(name: &str, target: &str, saved: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context()?;

    let goal = match saved {
        Some(s) => SavingsGoal::new(name, target, RawValue::from(s)),
        None => SavingsGoal::from_balance(name, target, ctx.summary_service.summary(None)?.balance),
    };
    let progress = goal.progress();

    if json {
        println!("{}", serde_json::to_string_pretty(&progress)?);
        return Ok(());
    }

    let symbol = &ctx.config.currency_symbol;
    println!("{}", progress.name.bold());
    println!(
        "  {} of {} ({}%)",
        format_amount(symbol, progress.saved),
        format_amount(symbol, progress.target),
        progress.percent
    );
    if progress.reached {
        success("  Goal reached");
    } else {
        println!("  {} to go", format_amount(symbol, progress.remaining));
    }
    Ok(())
}
