//! Selection data structures and amount resolution

mod data;
pub mod resolver;

pub use data::{AmountChoice, AmountTier, HealthLevel, InsuranceTier, Selections, ShoppingTier};
pub use resolver::{parse_custom_amount, resolve_amount, AmountSelection};
