//! Discount output types and display helpers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output of a single discount calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountResult {
    /// Monthly discount in rand, after all caps
    pub amount: u32,

    /// Effective percentage in [0, 100], may be fractional
    pub percentage: f64,

    /// Whether the uncapped amount went over the global ceiling
    pub is_capped: bool,
}

impl DiscountResult {
    /// Result for an incomplete selection
    pub fn zero() -> Self {
        Self {
            amount: 0,
            percentage: 0.0,
            is_capped: false,
        }
    }

    /// Yearly saving ("back in your pocket every year")
    pub fn annual_amount(&self) -> u64 {
        u64::from(self.amount) * 12
    }
}

impl Default for DiscountResult {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for DiscountResult {
    /// `R450 / 35%`, or just `R0` when there is no percentage to show
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_rand(u64::from(self.amount)))?;
        if self.percentage > 0.0 {
            write!(f, " / {}%", self.percentage)?;
        }
        Ok(())
    }
}

/// Highlight shown under the discount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Badge {
    FreeHealthCheck,
    MaximumReached,
}

impl Badge {
    pub fn label(&self) -> &'static str {
        match self {
            Badge::FreeHealthCheck => "+ Free HealthCheck",
            Badge::MaximumReached => "Maximum Reached",
        }
    }
}

/// Everything the discount tile renders for one set of selections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(flatten)]
    pub result: DiscountResult,

    pub annual_amount: u64,

    pub badges: Vec<Badge>,
}

/// Format a rand amount with thousands separators, e.g. `R36,000`
pub fn format_rand(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    grouped.push('R');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
