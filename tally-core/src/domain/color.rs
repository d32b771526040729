//! Type-keyed color descriptors for the presentation layer
//!
//! The descriptor depends on the canonical type alone. There are exactly
//! three of them and each is a `static`, so every call for the same type
//! hands back the same reference.

use serde::{Deserialize, Serialize};

use super::transaction_type::{normalize_type, TransactionType};
use super::value::RawValue;

/// Named tone of a descriptor, for consumers that only need a hue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Green,
    Red,
    Neutral,
}

/// Visual mode of the presentation layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Parse a mode name, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }
}

/// Background, border and text identifiers for one visual mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ModeColors {
    pub background: &'static str,
    pub border: &'static str,
    pub text: &'static str,
}

/// Chart fill and stroke pair (hex colors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ChartColors {
    pub fill: &'static str,
    pub stroke: &'static str,
}

/// Presentation attributes for a transaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorDescriptor {
    pub tone: Tone,
    pub light: ModeColors,
    pub dark: ModeColors,
    pub chart: ChartColors,
}

impl ColorDescriptor {
    pub fn mode(&self, theme: ThemeMode) -> &ModeColors {
        match theme {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }
}

pub static INCOME_COLORS: ColorDescriptor = ColorDescriptor {
    tone: Tone::Green,
    light: ModeColors {
        background: "bg-green-50",
        border: "border-green-200",
        text: "text-green-700",
    },
    dark: ModeColors {
        background: "bg-green-900/30",
        border: "border-green-700",
        text: "text-green-300",
    },
    chart: ChartColors {
        fill: "#22c55e",
        stroke: "#15803d",
    },
};

pub static EXPENSE_COLORS: ColorDescriptor = ColorDescriptor {
    tone: Tone::Red,
    light: ModeColors {
        background: "bg-red-50",
        border: "border-red-200",
        text: "text-red-700",
    },
    dark: ModeColors {
        background: "bg-red-900/30",
        border: "border-red-700",
        text: "text-red-300",
    },
    chart: ChartColors {
        fill: "#ef4444",
        stroke: "#b91c1c",
    },
};

/// Only ever used for input that failed classification
pub static NEUTRAL_COLORS: ColorDescriptor = ColorDescriptor {
    tone: Tone::Neutral,
    light: ModeColors {
        background: "bg-gray-50",
        border: "border-gray-200",
        text: "text-gray-700",
    },
    dark: ModeColors {
        background: "bg-gray-800/30",
        border: "border-gray-600",
        text: "text-gray-300",
    },
    chart: ChartColors {
        fill: "#9ca3af",
        stroke: "#4b5563",
    },
};

impl TransactionType {
    pub fn colors(&self) -> &'static ColorDescriptor {
        match self {
            TransactionType::Income => &INCOME_COLORS,
            TransactionType::Expense => &EXPENSE_COLORS,
        }
    }
}

/// Descriptor for an optional canonical type
pub fn colors_for(kind: Option<TransactionType>) -> &'static ColorDescriptor {
    kind.map(|k| k.colors()).unwrap_or(&NEUTRAL_COLORS)
}

/// Resolve the descriptor for an arbitrary type label
pub fn get_color_by_type(input: &RawValue) -> &'static ColorDescriptor {
    colors_for(normalize_type(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_distinct_descriptors() {
        assert_eq!(get_color_by_type(&"income".into()).tone, Tone::Green);
        assert_eq!(get_color_by_type(&"expense".into()).tone, Tone::Red);
        assert_eq!(get_color_by_type(&"tipo_invalido".into()).tone, Tone::Neutral);
        assert_ne!(INCOME_COLORS, EXPENSE_COLORS);
        assert_ne!(INCOME_COLORS, NEUTRAL_COLORS);
        assert_ne!(EXPENSE_COLORS, NEUTRAL_COLORS);
    }

    #[test]
    fn test_locale_and_case_flow_through() {
        let a = get_color_by_type(&"despesa".into());
        let b = get_color_by_type(&"EXPENSE".into());
        assert!(std::ptr::eq(a, b));
        assert_eq!(a, &EXPENSE_COLORS);

        assert!(std::ptr::eq(
            get_color_by_type(&" Receitas ".into()),
            &INCOME_COLORS
        ));
    }

    #[test]
    fn test_stable_across_interleaved_calls() {
        let first_income = *get_color_by_type(&"income".into());
        let first_expense = *get_color_by_type(&"expense".into());

        let labels: Vec<&str> = (0..200)
            .map(|i| if i % 2 == 0 { "income" } else { "expense" })
            .collect();
        for pass in [labels.clone(), labels.into_iter().rev().collect()] {
            for label in pass {
                let expected = if label == "income" { first_income } else { first_expense };
                assert_eq!(*get_color_by_type(&label.into()), expected);
            }
        }
    }

    #[test]
    fn test_non_text_is_neutral() {
        assert!(std::ptr::eq(get_color_by_type(&RawValue::Null), &NEUTRAL_COLORS));
        assert!(std::ptr::eq(get_color_by_type(&RawValue::Number(100.0)), &NEUTRAL_COLORS));
    }

    #[test]
    fn test_theme_mode() {
        assert_eq!(ThemeMode::parse(" DARK "), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse("sepia"), None);
        assert_eq!(EXPENSE_COLORS.mode(ThemeMode::Dark).text, "text-red-300");
        assert_eq!(EXPENSE_COLORS.mode(ThemeMode::Light).text, "text-red-700");
    }

    #[test]
    fn test_serializes_stable_keys() {
        let json = serde_json::to_value(INCOME_COLORS).unwrap();
        assert_eq!(json["tone"], "green");
        assert_eq!(json["light"]["background"], "bg-green-50");
        assert_eq!(json["dark"]["text"], "text-green-300");
        assert_eq!(json["chart"]["fill"], "#22c55e");
    }
}
