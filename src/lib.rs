//! Rewards Calculator - Discount engine for the rewards builder
//!
//! This library provides:
//! - Selection modelling with predefined and custom amounts
//! - Insurance reward rates by premium tier and health level
//! - Discount calculation with membership, insurance and global caps
//! - An interactive session that recomputes on every change

pub mod error;
pub mod selection;
pub mod tiers;
pub mod discount;
pub mod session;

// Re-export commonly used types
pub use error::{ConfigError, SelectionError, TierTableError};
pub use selection::{AmountChoice, AmountTier, HealthLevel, InsuranceTier, Selections, ShoppingTier};
pub use tiers::InsuranceTierTable;
pub use discount::{Badge, DiscountEngine, DiscountResult, EngineConfig, Quote};
pub use session::RewardsSession;
