//! Core domain
//!
//! Pure data structures and total functions: type and amount normalization,
//! color resolution, aggregation. No I/O and no logging happens here.

mod amount;
mod breakdown;
mod color;
mod goal;
pub mod result;
mod summary;
mod transaction;
mod transaction_type;
mod value;

pub use amount::normalize_amount;
pub use breakdown::{
    category_breakdown, filter_by_period, monthly_totals, validate_records, CategorySlice,
    PeriodTotals, ValidationReport,
};
pub use color::{
    colors_for, get_color_by_type, ChartColors, ColorDescriptor, ModeColors, ThemeMode, Tone,
    EXPENSE_COLORS, INCOME_COLORS, NEUTRAL_COLORS,
};
pub use goal::{GoalProgress, SavingsGoal};
pub use summary::{calculate_totals, classify, filter_by_type, is_valid_transaction, Summary};
pub use transaction::{parse_date, records_from_json, Transaction, TransactionRecord, FALLBACK_CATEGORY};
pub use transaction_type::{normalize_type, TransactionType};
pub use value::RawValue;
