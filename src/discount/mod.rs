//! Discount engine and its output types

mod engine;
mod result;

pub use engine::{DiscountEngine, EngineConfig};
pub use result::{format_rand, Badge, DiscountResult, Quote};
