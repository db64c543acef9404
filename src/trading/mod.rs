//! Trading module for order types and match simulation.
//!
//! This module handles:
//! - Order request and record types
//! - Simulated submission and matching

pub mod order;
pub mod simulator;

pub use order::{OrderRecord, OrderRequest, OrderType, Side};
pub use simulator::MatchSimulator;
