//! Insurance reward percentages by premium tier and health level

use crate::error::TierTableError;
use crate::selection::{AmountChoice, AmountTier, HealthLevel, InsuranceTier};

/// Number of insurance premium tiers (columns)
pub const TIER_COUNT: usize = 6;

/// Percentages for one row, indexed by `InsuranceTier::index()`
pub type TierRow = [f64; TIER_COUNT];

/// Two-dimensional reward lookup: health level × premium tier
#[derive(Debug, Clone, PartialEq)]
pub struct InsuranceTierTable {
    /// Rates used when no health level is chosen
    base: TierRow,
    /// Rates per health level, indexed by `HealthLevel::index()`
    levels: [TierRow; 5],
}

impl InsuranceTierTable {
    /// Published reward rates. No health level pays the same as "ohboy".
    pub fn default_pricing() -> Self {
        let ohboy = [20.0, 30.0, 35.0, 40.0, 45.0, 50.0];
        Self {
            base: ohboy,
            levels: [
                ohboy,
                [22.0, 32.5, 40.0, 45.0, 50.0, 60.0], // unhealthy
                [25.0, 35.0, 45.0, 50.0, 60.0, 70.0], // healthier
                [27.5, 40.0, 50.0, 60.0, 70.0, 90.0], // active
                [30.0, 45.0, 55.0, 70.0, 90.0, 100.0], // athlete
            ],
        }
    }

    /// Build a table from explicit rows, rejecting out-of-range rates, a base
    /// row that differs from "ohboy", and rows where a stronger health level
    /// pays less than a weaker one
    pub fn from_rows(base: TierRow, levels: [TierRow; 5]) -> Result<Self, TierTableError> {
        let table = Self { base, levels };
        table.validate()?;
        Ok(table)
    }

    /// Row for a health level, or the base row
    pub fn row(&self, health_level: Option<HealthLevel>) -> &TierRow {
        match health_level {
            Some(level) => &self.levels[level.index()],
            None => &self.base,
        }
    }

    /// Rate for a predefined tier
    pub fn get_rate(&self, tier: InsuranceTier, health_level: Option<HealthLevel>) -> f64 {
        self.row(health_level)[tier.index()]
    }

    /// Rate for a resolved premium, bucketed down to the nearest tier
    pub fn percentage_for_amount(&self, amount: u32, health_level: Option<HealthLevel>) -> f64 {
        self.get_rate(InsuranceTier::bucket(amount), health_level)
    }

    /// Rate for an insurance choice as the user made it.
    /// A custom choice without a value earns nothing.
    pub fn resolve_percentage(
        &self,
        choice: AmountChoice<InsuranceTier>,
        health_level: Option<HealthLevel>,
        custom_amount: Option<u32>,
    ) -> f64 {
        match choice {
            AmountChoice::Tier(tier) => self.get_rate(tier, health_level),
            AmountChoice::Custom => match custom_amount {
                Some(amount) if amount > 0 => self.percentage_for_amount(amount, health_level),
                _ => 0.0,
            },
        }
    }

    /// Check rate ranges, that the base row equals the weakest health level,
    /// and health level monotonicity
    pub fn validate(&self) -> Result<(), TierTableError> {
        let named_rows = std::iter::once(("base", &self.base))
            .chain(HealthLevel::ALL.iter().map(|level| (level.as_str(), &self.levels[level.index()])));

        for (name, row) in named_rows {
            for (tier, &value) in InsuranceTier::ALL.iter().zip(row.iter()) {
                if !(0.0..=100.0).contains(&value) {
                    return Err(TierTableError::OutOfRange {
                        row: name.to_string(),
                        tier: tier.amount(),
                        value,
                    });
                }
            }
        }

        // Choosing no health level pays exactly the "ohboy" rate
        let ohboy = &self.levels[HealthLevel::Ohboy.index()];
        for ((tier, &base_pct), &ohboy_pct) in InsuranceTier::ALL.iter().zip(self.base.iter()).zip(ohboy.iter()) {
            if base_pct != ohboy_pct {
                return Err(TierTableError::BaseMismatch {
                    tier: tier.amount(),
                    base_pct,
                    ohboy_pct,
                });
            }
        }

        for pair in HealthLevel::ALL.windows(2) {
            let (lower, higher) = (pair[0], pair[1]);
            for tier in InsuranceTier::ALL {
                let lower_pct = self.get_rate(*tier, Some(lower));
                let higher_pct = self.get_rate(*tier, Some(higher));
                if higher_pct < lower_pct {
                    return Err(TierTableError::NotMonotonic {
                        tier: tier.amount(),
                        lower: lower.as_str(),
                        lower_pct,
                        higher: higher.as_str(),
                        higher_pct,
                    });
                }
            }
        }

        Ok(())
    }
}

impl Default for InsuranceTierTable {
    fn default() -> Self {
        Self::default_pricing()
    }
}
