//! Savings goal progress

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::normalize_amount;
use super::breakdown::percent_of;
use super::value::RawValue;

/// A savings target and the amount put aside so far
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub name: String,
    #[serde(default)]
    pub target: RawValue,
    #[serde(default)]
    pub saved: RawValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub name: String,
    pub target: Decimal,
    pub saved: Decimal,
    /// Percent reached, clamped to `0..=100`
    pub percent: Decimal,
    pub remaining: Decimal,
    pub reached: bool,
}

impl SavingsGoal {
    pub fn new(
        name: impl Into<String>,
        target: impl Into<RawValue>,
        saved: impl Into<RawValue>,
    ) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            saved: saved.into(),
        }
    }

    /// Goal funded by a signed balance; a deficit counts as nothing saved
    pub fn from_balance(
        name: impl Into<String>,
        target: impl Into<RawValue>,
        balance: Decimal,
    ) -> Self {
        Self::new(name, target, balance.max(Decimal::ZERO))
    }

    /// Progress toward the target; a zero target counts as reached
    pub fn progress(&self) -> GoalProgress {
        let target = normalize_amount(&self.target);
        let saved = normalize_amount(&self.saved);

        let percent = if target.is_zero() {
            Decimal::ONE_HUNDRED
        } else {
            percent_of(saved, target).min(Decimal::ONE_HUNDRED)
        };
        let remaining = (target - saved).max(Decimal::ZERO);

        GoalProgress {
            name: self.name.clone(),
            target,
            saved,
            percent,
            remaining,
            reached: saved >= target,
        }
    }
}
