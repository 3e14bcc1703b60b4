//! Interactive session holding the user's in-progress selections
//!
//! Every interaction mutates one field; every read recomputes the quote from
//! the full current state. Nothing is cached between calls.

use crate::discount::{DiscountEngine, DiscountResult, Quote};
use crate::error::SelectionError;
use crate::selection::{AmountSelection, HealthLevel, InsuranceTier, Selections, ShoppingTier};
use log::debug;

/// Mutable selection state for one calculator session
///
/// # Example
/// ```ignore
/// let mut session = RewardsSession::new(DiscountEngine::default_pricing());
/// session.select_shopping(ShoppingTier::R2000);
/// session.toggle_member();
/// assert_eq!(session.quote().result.amount, 200);
/// ```
#[derive(Debug, Clone)]
pub struct RewardsSession {
    engine: DiscountEngine,
    shopping: AmountSelection<ShoppingTier>,
    insurance: AmountSelection<InsuranceTier>,
    is_member: Option<bool>,
    health_level: Option<HealthLevel>,
    has_pharmacy_script: Option<bool>,
    has_bank_partner: Option<bool>,
    has_health_check: Option<bool>,
}

impl RewardsSession {
    /// Start an empty session
    pub fn new(engine: DiscountEngine) -> Self {
        Self {
            engine,
            shopping: AmountSelection::new(),
            insurance: AmountSelection::new(),
            is_member: None,
            health_level: None,
            has_pharmacy_script: None,
            has_bank_partner: None,
            has_health_check: None,
        }
    }

    pub fn engine(&self) -> &DiscountEngine {
        &self.engine
    }

    pub fn shopping(&self) -> &AmountSelection<ShoppingTier> {
        &self.shopping
    }

    pub fn insurance(&self) -> &AmountSelection<InsuranceTier> {
        &self.insurance
    }

    /// Click a shopping option (clicking it again clears it)
    pub fn select_shopping(&mut self, tier: ShoppingTier) {
        self.shopping.click_tier(tier);
        debug!("Shopping -> {:?}", self.shopping.choice());
    }

    /// Submit an "add own amount" shopping entry
    pub fn submit_custom_shopping(&mut self, input: &str) -> Result<u32, SelectionError> {
        self.ensure_custom_enabled()?;
        self.shopping.submit_custom(input)
    }

    /// Click an insurance option (clicking it again clears it)
    pub fn select_insurance(&mut self, tier: InsuranceTier) {
        self.insurance.click_tier(tier);
        debug!("Insurance -> {:?}", self.insurance.choice());
    }

    /// Submit an "add own amount" insurance entry
    pub fn submit_custom_insurance(&mut self, input: &str) -> Result<u32, SelectionError> {
        self.ensure_custom_enabled()?;
        self.insurance.submit_custom(input)
    }

    /// Click a health level (clicking the selected level clears it)
    pub fn select_health_level(&mut self, level: HealthLevel) {
        self.health_level = if self.health_level == Some(level) {
            None
        } else {
            Some(level)
        };
    }

    pub fn toggle_member(&mut self) {
        toggle(&mut self.is_member);
    }

    pub fn toggle_pharmacy_script(&mut self) {
        toggle(&mut self.has_pharmacy_script);
    }

    pub fn toggle_bank_partner(&mut self) {
        toggle(&mut self.has_bank_partner);
    }

    pub fn toggle_health_check(&mut self) {
        toggle(&mut self.has_health_check);
    }

    /// Resolved selections as the engine sees them
    pub fn selections(&self) -> Selections {
        let allow_custom = self.engine.config().has_custom_amounts;
        Selections {
            shopping_amount: self.shopping.resolved(allow_custom),
            is_member: self.is_member,
            insurance_amount: self.insurance.resolved(allow_custom),
            health_level: self.health_level,
            has_pharmacy_script: self.has_pharmacy_script,
            has_bank_partner: self.has_bank_partner,
            has_health_check: self.has_health_check,
        }
    }

    /// Recompute the discount from the current state
    pub fn discount(&self) -> DiscountResult {
        self.engine.compute_discount(&self.selections())
    }

    /// Recompute the full quote from the current state
    pub fn quote(&self) -> Quote {
        self.engine.quote(&self.selections())
    }

    /// Clear every selection, keeping the engine
    pub fn reset(&mut self) {
        self.shopping.clear();
        self.insurance.clear();
        self.is_member = None;
        self.health_level = None;
        self.has_pharmacy_script = None;
        self.has_bank_partner = None;
        self.has_health_check = None;
    }

    fn ensure_custom_enabled(&self) -> Result<(), SelectionError> {
        if self.engine.config().has_custom_amounts {
            Ok(())
        } else {
            Err(SelectionError::CustomAmountsDisabled)
        }
    }
}

impl Default for RewardsSession {
    fn default() -> Self {
        Self::new(DiscountEngine::default_pricing())
    }
}

/// Unset and false both flip to true
fn toggle(flag: &mut Option<bool>) {
    *flag = Some(*flag != Some(true));
}
