//! Resolve predefined or custom amount choices into concrete amounts

use super::data::{AmountChoice, AmountTier};
use crate::error::SelectionError;
use log::warn;

/// Turn a choice plus optional custom value into a rand amount.
///
/// A custom choice without a positive custom value resolves to 0, which the
/// engine treats as "nothing selected".
pub fn resolve_amount<T: AmountTier>(choice: AmountChoice<T>, custom: Option<u32>) -> u32 {
    match choice {
        AmountChoice::Tier(tier) => tier.amount(),
        AmountChoice::Custom => custom.unwrap_or(0),
    }
}

/// Parse free-text custom amount entry.
///
/// Reads the leading integer (after trimming and an optional sign) and
/// ignores any trailing text, so `"1500abc"` and `"12.9"` give 1500 and 12.
/// Anything without leading digits, zero or negative is rejected, and
/// amounts beyond `u32::MAX` are reported as too large.
pub fn parse_custom_amount(input: &str) -> Result<u32, SelectionError> {
    let reject = || SelectionError::InvalidCustomAmount(input.to_string());

    let trimmed = input.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = unsigned
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits_len == 0 {
        return Err(reject());
    }

    if negative {
        return Err(reject());
    }

    // An all-digit string only fails to parse on overflow
    let value: u32 = unsigned[..digits_len]
        .parse()
        .map_err(|_| SelectionError::CustomAmountTooLarge(unsigned[..digits_len].to_string()))?;
    if value == 0 {
        return Err(reject());
    }

    Ok(value)
}

/// One amount question with toggle-on-click semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountSelection<T> {
    choice: Option<AmountChoice<T>>,
    custom: Option<u32>,
}

impl<T> Default for AmountSelection<T> {
    fn default() -> Self {
        Self {
            choice: None,
            custom: None,
        }
    }
}

impl<T: AmountTier> AmountSelection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current choice, if any
    pub fn choice(&self) -> Option<AmountChoice<T>> {
        self.choice
    }

    /// Last accepted custom value
    pub fn custom(&self) -> Option<u32> {
        self.custom
    }

    /// Click a predefined option. Clicking the selected option deselects it.
    /// Either way any custom value is dropped.
    pub fn click_tier(&mut self, tier: T) {
        self.choice = if self.choice == Some(AmountChoice::Tier(tier)) {
            None
        } else {
            Some(AmountChoice::Tier(tier))
        };
        self.custom = None;
    }

    /// Submit a custom amount. On rejection the selection is left untouched.
    pub fn submit_custom(&mut self, input: &str) -> Result<u32, SelectionError> {
        let amount = parse_custom_amount(input).map_err(|err| {
            warn!("Rejected custom amount {:?}", input);
            err
        })?;
        self.choice = Some(AmountChoice::Custom);
        self.custom = Some(amount);
        Ok(amount)
    }

    /// Resolved amount, `None` when unanswered.
    /// With `allow_custom` off a custom choice counts as unanswered.
    pub fn resolved(&self, allow_custom: bool) -> Option<u32> {
        let choice = self.choice?;
        if matches!(choice, AmountChoice::Custom) && !allow_custom {
            return None;
        }
        Some(resolve_amount(choice, self.custom)).filter(|&amount| amount > 0)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
