//! Output formatting utilities

use colored::{ColoredString, Colorize};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use rust_decimal::Decimal;
use tally_core::domain::{ColorDescriptor, Tone};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Terminal rendering of a descriptor's tone
pub fn paint(text: &str, colors: &ColorDescriptor) -> ColoredString {
    match colors.tone {
        Tone::Green => text.green(),
        Tone::Red => text.red(),
        Tone::Neutral => text.dimmed(),
    }
}

/// Table cell colored by a descriptor's tone
pub fn tone_cell(text: impl ToString, colors: &ColorDescriptor) -> Cell {
    let cell = Cell::new(text);
    match colors.tone {
        Tone::Green => cell.fg(Color::Green),
        Tone::Red => cell.fg(Color::Red),
        Tone::Neutral => cell.fg(Color::DarkGrey),
    }
}

/// Format an amount with the currency symbol and two decimals
pub fn format_amount(symbol: &str, amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}{:.2}", symbol, rounded.abs())
    } else {
        format!("{}{:.2}", symbol, rounded.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount("$", Decimal::new(70000, 2)), "$700.00");
        assert_eq!(format_amount("R$", Decimal::new(10005, 1)), "R$1000.50");
        assert_eq!(format_amount("$", Decimal::new(-4, 0)), "-$4.00");
        assert_eq!(format_amount("$", Decimal::new(-1, 3)), "$0.00");
    }
}
