//! Selection data structures matching the rewards builder options

use crate::error::SelectionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Self-assessed health commitment
///
/// Declared from weakest to strongest so the derived ordering follows the
/// reward table: `Ohboy < Unhealthy < Healthier < Active < Athlete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthLevel {
    /// Level 1, "send help"
    Ohboy,
    /// Level 2
    Unhealthy,
    /// Level 3
    Healthier,
    /// Level 4
    Active,
    /// Level 5, fit and feeling good
    Athlete,
}

impl HealthLevel {
    /// All levels, weakest first
    pub const ALL: [HealthLevel; 5] = [
        HealthLevel::Ohboy,
        HealthLevel::Unhealthy,
        HealthLevel::Healthier,
        HealthLevel::Active,
        HealthLevel::Athlete,
    ];

    /// Zero-based position in `ALL`
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Identifier used in CSV files, JSON and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthLevel::Ohboy => "ohboy",
            HealthLevel::Unhealthy => "unhealthy",
            HealthLevel::Healthier => "healthier",
            HealthLevel::Active => "active",
            HealthLevel::Athlete => "athlete",
        }
    }

    /// Option text shown next to the level
    pub fn label(&self) -> &'static str {
        match self {
            HealthLevel::Ohboy => "Joh joh joh… send help!",
            HealthLevel::Unhealthy => "We're on a break, gym and I",
            HealthLevel::Healthier => "Could be healthier (my shoes agree)",
            HealthLevel::Active => "I move… on purpose",
            HealthLevel::Athlete => "Fit and feeling good.",
        }
    }
}

impl fmt::Display for HealthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthLevel {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        HealthLevel::ALL
            .iter()
            .copied()
            .find(|level| level.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SelectionError::UnknownHealthLevel(s.to_string()))
    }
}

/// A predefined amount option (shopping spend or insurance premium)
pub trait AmountTier: Copy + PartialEq + fmt::Debug + 'static {
    /// Every tier, smallest amount first
    const ALL: &'static [Self];

    /// Amount in rand
    fn amount(&self) -> u32;

    /// Tier whose amount is exactly `amount`, if any
    fn from_amount(amount: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|tier| tier.amount() == amount)
    }
}

/// Monthly shopping spend options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShoppingTier {
    R500,
    R1500,
    R2000,
    R3000,
}

impl AmountTier for ShoppingTier {
    const ALL: &'static [Self] = &[
        ShoppingTier::R500,
        ShoppingTier::R1500,
        ShoppingTier::R2000,
        ShoppingTier::R3000,
    ];

    fn amount(&self) -> u32 {
        match self {
            ShoppingTier::R500 => 500,
            ShoppingTier::R1500 => 1500,
            ShoppingTier::R2000 => 2000,
            ShoppingTier::R3000 => 3000,
        }
    }
}

/// Monthly insurance premium options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsuranceTier {
    R500,
    R1500,
    R2500,
    R3500,
    R4000,
    /// Shown as "R4,500+"
    R4500,
}

impl InsuranceTier {
    /// Zero-based column in the reward table
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Bucket an arbitrary premium down to the highest tier at or below it.
    /// Premiums under R500 still earn the R500 rate.
    pub fn bucket(amount: u32) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|tier| amount >= tier.amount())
            .unwrap_or(InsuranceTier::R500)
    }
}

impl AmountTier for InsuranceTier {
    const ALL: &'static [Self] = &[
        InsuranceTier::R500,
        InsuranceTier::R1500,
        InsuranceTier::R2500,
        InsuranceTier::R3500,
        InsuranceTier::R4000,
        InsuranceTier::R4500,
    ];

    fn amount(&self) -> u32 {
        match self {
            InsuranceTier::R500 => 500,
            InsuranceTier::R1500 => 1500,
            InsuranceTier::R2500 => 2500,
            InsuranceTier::R3500 => 3500,
            InsuranceTier::R4000 => 4000,
            InsuranceTier::R4500 => 4500,
        }
    }
}

/// What the user picked for an amount question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountChoice<T> {
    /// One of the predefined options
    Tier(T),
    /// "Add own amount"; the value lives beside the choice
    Custom,
}

/// Resolved selections fed into the discount engine
///
/// Amounts are already concrete here. `None` and `Some(0)` both mean the
/// question is unanswered. Tri-state flags only count when `Some(true)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selections {
    /// Monthly shopping spend in rand
    pub shopping_amount: Option<u32>,

    /// Rewards programme member
    pub is_member: Option<bool>,

    /// Monthly insurance premium in rand
    pub insurance_amount: Option<u32>,

    /// Self-assessed health level
    pub health_level: Option<HealthLevel>,

    /// Fills a pharmacy script
    pub has_pharmacy_script: Option<bool>,

    /// Banks with the partner bank
    pub has_bank_partner: Option<bool>,

    /// Wants the free HealthCheck (badge only)
    pub has_health_check: Option<bool>,
}

impl Selections {
    /// Shopping amount when present and non-zero
    pub fn shopping(&self) -> Option<u32> {
        self.shopping_amount.filter(|&amount| amount > 0)
    }

    /// Insurance premium when present and non-zero
    pub fn insurance(&self) -> Option<u32> {
        self.insurance_amount.filter(|&amount| amount > 0)
    }

    pub fn member(&self) -> bool {
        self.is_member == Some(true)
    }

    pub fn pharmacy_script(&self) -> bool {
        self.has_pharmacy_script == Some(true)
    }

    pub fn bank_partner(&self) -> bool {
        self.has_bank_partner == Some(true)
    }

    pub fn health_check(&self) -> bool {
        self.has_health_check == Some(true)
    }
}
