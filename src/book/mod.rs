//! Synthetic order book module.
//!
//! This module handles:
//! - Price ladder types and derived quantities
//! - Synthetic book generation around a reference price

pub mod generator;
pub mod types;

pub use generator::BookGenerator;
pub use types::{LadderSide, OrderBookSnapshot, PriceLadder, PriceLevel};
