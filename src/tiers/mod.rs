//! Insurance reward tier table and its CSV loader

mod table;
pub mod loader;

pub use table::{InsuranceTierTable, TierRow, TIER_COUNT};
pub use loader::{load_default_tiers, load_insurance_tiers, load_insurance_tiers_from_reader};
