//! Unified error types for the simulation engine.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::book::LadderSide;

/// Unified error type for the simulation engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Structurally invalid order request.
    #[error("order error: {0}")]
    Order(#[from] OrderError),

    /// Order book query error.
    #[error("book error: {0}")]
    Book(#[from] BookError),
}

/// Order request validation errors.
///
/// All variants are rejected before any session state is mutated; a
/// rejected request never produces a record.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderError {
    /// Quantity must be strictly positive.
    #[error("order quantity must be positive, got {0}")]
    NonPositiveQuantity(Decimal),

    /// Limit orders require a price.
    #[error("limit order requires a price")]
    MissingLimitPrice,

    /// Limit price must be strictly positive.
    #[error("limit price must be positive, got {0}")]
    NonPositiveLimitPrice(Decimal),
}

/// Order book query errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookError {
    /// Queried best price, spread, or mid while one side has no levels.
    /// Surfaced explicitly so callers never mistake it for a zero spread.
    #[error("no {side} levels in the book")]
    SideEmpty {
        /// The empty side.
        side: LadderSide,
    },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, EngineError>;
