//! Core discount engine: percentage resolution, rounding and capping

use super::result::{Badge, DiscountResult, Quote};
use crate::error::ConfigError;
use crate::selection::{HealthLevel, Selections};
use crate::tiers::InsuranceTierTable;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rule switches and constants for a calculator variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Accept "add own amount" entries for shopping and insurance
    pub has_custom_amounts: bool,

    /// Cap member-only discounts (no insurance) at `membership_cap`
    pub has_membership_cap: bool,

    /// Insurance rate replaces the membership rate instead of adding to it
    pub insurance_overrides_base: bool,

    /// Percentage earned for membership alone
    pub membership_rate: f64,

    /// Percentage added for a pharmacy script
    pub script_boost: f64,

    /// Percentage added for banking with the partner bank
    pub bank_partner_boost: f64,

    /// Member-only monthly ceiling in rand
    pub membership_cap: u32,

    /// Monthly ceiling for every discount in rand
    pub global_cap: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            has_custom_amounts: true,
            has_membership_cap: true,
            insurance_overrides_base: true,
            membership_rate: 10.0,
            script_boost: 5.0,
            bank_partner_boost: 5.0,
            membership_cap: 600,
            global_cap: 3000,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        info!("Loaded engine config from {}", path.display());
        Ok(config)
    }
}

/// Discount engine
///
/// Immutable after construction, so one engine can serve any number of
/// recomputations (or threads) without coordination.
#[derive(Debug, Clone)]
pub struct DiscountEngine {
    tiers: InsuranceTierTable,
    config: EngineConfig,
}

impl DiscountEngine {
    /// Create a new engine with given tier table and config
    pub fn new(tiers: InsuranceTierTable, config: EngineConfig) -> Self {
        Self { tiers, config }
    }

    /// Engine with the published rates and the default rule set
    pub fn default_pricing() -> Self {
        Self::new(InsuranceTierTable::default_pricing(), EngineConfig::default())
    }

    pub fn tiers(&self) -> &InsuranceTierTable {
        &self.tiers
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Insurance reward rate for a resolved premium
    pub fn insurance_percentage(&self, insurance_amount: u32, health_level: Option<HealthLevel>) -> f64 {
        self.tiers.percentage_for_amount(insurance_amount, health_level)
    }

    /// Effective discount percentage, clamped to [0, 100].
    /// Zero until a shopping amount is chosen.
    pub fn discount_percentage(&self, selections: &Selections) -> f64 {
        if selections.shopping().is_none() {
            return 0.0;
        }

        let mut percentage = 0.0;

        if selections.member() {
            percentage = self.config.membership_rate;
        }

        if let Some(insurance) = selections.insurance() {
            let insurance_pct = self.insurance_percentage(insurance, selections.health_level);
            if self.config.insurance_overrides_base {
                percentage = insurance_pct;
            } else {
                percentage += insurance_pct;
            }
        }

        if selections.pharmacy_script() {
            percentage += self.config.script_boost;
        }

        if selections.bank_partner() {
            percentage += self.config.bank_partner_boost;
        }

        percentage.clamp(0.0, 100.0)
    }

    /// Monthly discount for the given selections
    pub fn compute_discount(&self, selections: &Selections) -> DiscountResult {
        let Some(shopping) = selections.shopping() else {
            return DiscountResult::zero();
        };

        let percentage = self.discount_percentage(selections);
        let raw_amount = round_half_up(f64::from(shopping) * percentage / 100.0);

        // The discount never exceeds the premium being insured
        let limited = match selections.insurance() {
            Some(insurance) => raw_amount.min(u64::from(insurance)),
            None if self.config.has_membership_cap => raw_amount.min(u64::from(self.config.membership_cap)),
            None => raw_amount,
        };

        let global_cap = u64::from(self.config.global_cap);
        let amount = limited.min(global_cap);

        // Only the global ceiling raises the flag; inner caps bind silently
        let is_capped = raw_amount > global_cap;

        debug!(
            "shopping={} pct={} raw={} limited={} amount={} capped={}",
            shopping, percentage, raw_amount, limited, amount, is_capped
        );

        DiscountResult {
            amount: amount as u32,
            percentage,
            is_capped,
        }
    }

    /// Whether the global ceiling is reached
    pub fn is_capped(&self, selections: &Selections) -> bool {
        self.compute_discount(selections).is_capped
    }

    /// Discount plus the yearly figure and badges
    pub fn quote(&self, selections: &Selections) -> Quote {
        let result = self.compute_discount(selections);

        let mut badges = Vec::new();
        if selections.health_check() {
            badges.push(Badge::FreeHealthCheck);
        }
        if result.is_capped {
            badges.push(Badge::MaximumReached);
        }

        Quote {
            result,
            annual_amount: result.annual_amount(),
            badges,
        }
    }
}

impl Default for DiscountEngine {
    fn default() -> Self {
        Self::default_pricing()
    }
}

/// Round to the nearest rand, halves going up
fn round_half_up(value: f64) -> u64 {
    (value + 0.5).floor().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn selections(shopping: u32) -> Selections {
        Selections {
            shopping_amount: Some(shopping),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_shopping_is_zero() {
        let engine = DiscountEngine::default_pricing();
        let everything_else = Selections {
            shopping_amount: None,
            is_member: Some(true),
            insurance_amount: Some(4500),
            health_level: Some(HealthLevel::Athlete),
            has_pharmacy_script: Some(true),
            has_bank_partner: Some(true),
            has_health_check: Some(true),
        };

        assert_eq!(engine.compute_discount(&everything_else), DiscountResult::zero());
        assert_eq!(engine.discount_percentage(&everything_else), 0.0);

        let zero_shopping = Selections {
            shopping_amount: Some(0),
            ..everything_else
        };
        assert_eq!(engine.compute_discount(&zero_shopping), DiscountResult::zero());
    }

    #[test]
    fn test_member_only() {
        let engine = DiscountEngine::default_pricing();
        let s = Selections {
            is_member: Some(true),
            has_pharmacy_script: Some(false),
            has_bank_partner: Some(false),
            ..selections(2000)
        };

        let result = engine.compute_discount(&s);
        assert_eq!(result.percentage, 10.0);
        assert_eq!(result.amount, 200);
        assert!(!result.is_capped);
    }

    #[test]
    fn test_athlete_hits_global_cap_exactly() {
        let engine = DiscountEngine::default_pricing();
        let s = Selections {
            insurance_amount: Some(4500),
            health_level: Some(HealthLevel::Athlete),
            has_pharmacy_script: Some(true),
            has_bank_partner: Some(true),
            ..selections(3000)
        };

        let result = engine.compute_discount(&s);
        assert_eq!(result.percentage, 100.0);
        assert_eq!(result.amount, 3000);
        // 3000 is not over 3000
        assert!(!result.is_capped);
    }

    #[test]
    fn test_insurance_cap() {
        let engine = DiscountEngine::default_pricing();
        let s = Selections {
            insurance_amount: Some(500),
            health_level: Some(HealthLevel::Ohboy),
            ..selections(3000)
        };

        let result = engine.compute_discount(&s);
        assert_eq!(result.percentage, 20.0);
        assert_eq!(result.amount, 500);
        assert!(!result.is_capped);
    }

    #[test]
    fn test_membership_cap_does_not_flag() {
        let engine = DiscountEngine::default_pricing();
        let s = Selections {
            is_member: Some(true),
            has_pharmacy_script: Some(true),
            has_bank_partner: Some(true),
            ..selections(4500)
        };

        let result = engine.compute_discount(&s);
        assert_eq!(result.percentage, 20.0);
        assert_eq!(result.amount, 600);
        assert!(!result.is_capped);
    }

    #[test]
    fn test_global_cap_flags() {
        let engine = DiscountEngine::default_pricing();
        let s = Selections {
            insurance_amount: Some(9000),
            health_level: Some(HealthLevel::Athlete),
            ..selections(5000)
        };

        let result = engine.compute_discount(&s);
        assert_eq!(result.amount, 3000);
        assert!(result.is_capped);
        assert!(engine.is_capped(&s));
    }

    #[test]
    fn test_insurance_replaces_member_rate() {
        let engine = DiscountEngine::default_pricing();
        let s = Selections {
            is_member: Some(true),
            insurance_amount: Some(1500),
            ..selections(2000)
        };

        // 30%, not 10% + 30%
        assert_eq!(engine.discount_percentage(&s), 30.0);
        assert_eq!(engine.compute_discount(&s).amount, 600);
    }

    #[test]
    fn test_half_rands_round_up() {
        let engine = DiscountEngine::default_pricing();
        let s = Selections {
            insurance_amount: Some(1500),
            health_level: Some(HealthLevel::Unhealthy),
            ..selections(1500)
        };

        let result = engine.compute_discount(&s);
        assert_relative_eq!(result.percentage, 32.5);
        // 487.5 rounds to 488
        assert_eq!(result.amount, 488);
    }

    #[test]
    fn test_custom_insurance_bucketing() {
        let engine = DiscountEngine::default_pricing();
        let s = Selections {
            insurance_amount: Some(4200),
            health_level: Some(HealthLevel::Healthier),
            ..selections(1000)
        };

        // 4000 tier for healthier is 60%
        assert_eq!(engine.discount_percentage(&s), 60.0);
        assert_eq!(engine.compute_discount(&s).amount, 600);
    }

    #[test]
    fn test_monotonic_in_health_level() {
        let engine = DiscountEngine::default_pricing();

        for insurance in [500, 1500, 2500, 3500, 4000, 4500, 4200, 200] {
            let mut previous = 0.0;
            for level in HealthLevel::ALL {
                let s = Selections {
                    insurance_amount: Some(insurance),
                    health_level: Some(level),
                    ..selections(3000)
                };
                let pct = engine.discount_percentage(&s);
                assert!(pct >= previous, "{} at {}: {} < {}", level, insurance, pct, previous);
                previous = pct;
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let engine = DiscountEngine::default_pricing();
        let s = Selections {
            is_member: Some(true),
            insurance_amount: Some(2500),
            health_level: Some(HealthLevel::Active),
            has_bank_partner: Some(true),
            ..selections(1500)
        };

        assert_eq!(engine.compute_discount(&s), engine.compute_discount(&s));
    }

    #[test]
    fn test_false_flags_have_no_effect() {
        let engine = DiscountEngine::default_pricing();
        let unset = selections(2000);
        let off = Selections {
            is_member: Some(false),
            has_pharmacy_script: Some(false),
            has_bank_partner: Some(false),
            ..unset
        };

        assert_eq!(engine.compute_discount(&unset), engine.compute_discount(&off));
        assert_eq!(engine.compute_discount(&off).amount, 0);
    }

    #[test]
    fn test_additive_variant() {
        let config = EngineConfig {
            insurance_overrides_base: false,
            ..Default::default()
        };
        let engine = DiscountEngine::new(InsuranceTierTable::default_pricing(), config);
        let s = Selections {
            is_member: Some(true),
            insurance_amount: Some(4500),
            health_level: Some(HealthLevel::Athlete),
            ..selections(2000)
        };

        // 10 + 100 clamps to 100
        assert_eq!(engine.discount_percentage(&s), 100.0);

        let s = Selections {
            health_level: None,
            insurance_amount: Some(1500),
            ..s
        };
        assert_eq!(engine.discount_percentage(&s), 40.0);
        assert_eq!(engine.compute_discount(&s).amount, 800);
    }

    #[test]
    fn test_without_membership_cap() {
        let config = EngineConfig {
            has_membership_cap: false,
            ..Default::default()
        };
        let engine = DiscountEngine::new(InsuranceTierTable::default_pricing(), config);
        let s = Selections {
            is_member: Some(true),
            has_pharmacy_script: Some(true),
            has_bank_partner: Some(true),
            ..selections(4500)
        };

        assert_eq!(engine.compute_discount(&s).amount, 900);
    }

    #[test]
    fn test_quote_badges() {
        let engine = DiscountEngine::default_pricing();

        let s = Selections {
            is_member: Some(true),
            has_health_check: Some(true),
            ..selections(2000)
        };
        let quote = engine.quote(&s);
        assert_eq!(quote.result.amount, 200);
        assert_eq!(quote.annual_amount, 2400);
        assert_eq!(quote.badges, vec![Badge::FreeHealthCheck]);

        let s = Selections {
            insurance_amount: Some(5000),
            health_level: Some(HealthLevel::Athlete),
            has_health_check: Some(true),
            ..selections(4000)
        };
        let quote = engine.quote(&s);
        assert_eq!(quote.result.amount, 3000);
        assert_eq!(quote.badges, vec![Badge::FreeHealthCheck, Badge::MaximumReached]);
    }

    #[test]
    fn test_config_json_defaults() {
        let config = EngineConfig::from_json_str(r#"{"has_membership_cap": false, "global_cap": 2500}"#).unwrap();

        assert!(!config.has_membership_cap);
        assert_eq!(config.global_cap, 2500);
        assert!(config.insurance_overrides_base);
        assert_eq!(config.membership_rate, 10.0);

        assert!(EngineConfig::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_load_default_config_file() {
        let config = EngineConfig::from_json_path("data/config/default.json").unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
