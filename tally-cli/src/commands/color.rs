//! Color command - show the descriptor for a type label

use anyhow::Result;
use colored::Colorize;
use tally_core::domain::{get_color_by_type, RawValue};

use super::get_context;
use crate::output::{create_table, paint};

pub fn run(kind: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let colors = get_color_by_type(&RawValue::from(kind));

    if json {
        println!("{}", serde_json::to_string_pretty(colors)?);
        return Ok(());
    }

    println!("{} {}", "Tone:".bold(), paint(&format!("{:?}", colors.tone), colors));
    println!();

    let active = colors.mode(ctx.config.theme);
    let mut table = create_table();
    table.set_header(vec!["", "Background", "Border", "Text"]);
    table.add_row(vec!["Light", colors.light.background, colors.light.border, colors.light.text]);
    table.add_row(vec!["Dark", colors.dark.background, colors.dark.border, colors.dark.text]);
    println!("{}", table);
    println!("Chart: fill {} stroke {}", colors.chart.fill, colors.chart.stroke);
    println!("{}", format!("Active theme uses: {}", active.text).dimmed());
    Ok(())
}
