//! Synthetic order book and latency simulation engine.
//!
//! This library is the stateful core behind a set of paper-trading
//! dashboards: it fabricates realistic two-sided order books, simulates
//! order submission with bounded random processing delay and partial
//! fills, and keeps bounded rolling histories of latency and order
//! events with percentile statistics.
//!
//! The core never performs I/O. A host (CLI, HTTP layer, dashboard)
//! owns a [`session::SessionLedger`] per logical session, injects its
//! own random source, and reads state back through immutable snapshots.
//! When a real backend replaces the simulator, the host populates the
//! same [`trading::OrderRecord`] shape from backend responses, so the
//! statistics pipeline is oblivious to where latency numbers came from.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`book`]: Price ladders and synthetic book generation
//! - [`trading`]: Order types and match simulation
//! - [`stats`]: Rolling latency statistics
//! - [`session`]: Per-session state container

pub mod book;
pub mod config;
pub mod error;
pub mod metrics;
pub mod session;
pub mod stats;
pub mod trading;

pub use config::SimConfig;
pub use error::{EngineError, Result};
