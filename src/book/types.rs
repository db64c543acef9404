//! Price ladder types and data structures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::BookError;

/// Which side of the book a ladder represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
pub enum LadderSide {
    /// Buy side, levels sorted by price descending.
    #[strum(serialize = "bid", serialize = "BID")]
    Bid,
    /// Sell side, levels sorted by price ascending.
    #[strum(serialize = "ask", serialize = "ASK")]
    Ask,
}

/// Single price level in an order book.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceLevel {
    /// Price at this level.
    pub price: Decimal,
    /// Quantity available at this price.
    pub quantity: Decimal,
}

impl PriceLevel {
    /// Create a new price level.
    pub fn new(price: Decimal, quantity: Decimal) -> Self {
        Self { price, quantity }
    }
}

/// One side of a synthetic order book.
///
/// Immutable once produced; a refresh builds a new ladder rather than
/// mutating an existing one in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceLadder {
    /// Which side this ladder represents.
    pub side: LadderSide,
    /// Levels in side order: descending for bids, ascending for asks.
    pub levels: Vec<PriceLevel>,
}

impl PriceLadder {
    /// Create a ladder, sorting levels into side order.
    pub fn new(side: LadderSide, mut levels: Vec<PriceLevel>) -> Self {
        match side {
            LadderSide::Bid => levels.sort_by(|a, b| b.price.cmp(&a.price)),
            LadderSide::Ask => levels.sort_by(|a, b| a.price.cmp(&b.price)),
        }
        Self { side, levels }
    }

    /// Create an empty ladder for the given side.
    pub fn empty(side: LadderSide) -> Self {
        Self {
            side,
            levels: Vec::new(),
        }
    }

    /// Best (first) level, if any.
    pub fn best(&self) -> Option<&PriceLevel> {
        self.levels.first()
    }

    /// Best price, if any.
    pub fn best_price(&self) -> Option<Decimal> {
        self.best().map(|l| l.price)
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether the ladder has no levels.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Total quantity across all levels.
    pub fn total_quantity(&self) -> Decimal {
        self.levels.iter().map(|l| l.quantity).sum()
    }
}

/// Two-sided order book snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderBookSnapshot {
    /// Bid ladder, prices descending.
    pub bids: PriceLadder,
    /// Ask ladder, prices ascending.
    pub asks: PriceLadder,
}

impl Default for OrderBookSnapshot {
    fn default() -> Self {
        Self {
            bids: PriceLadder::empty(LadderSide::Bid),
            asks: PriceLadder::empty(LadderSide::Ask),
        }
    }
}

impl OrderBookSnapshot {
    /// Get the best bid price.
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.best_price()
    }

    /// Get the best ask price.
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.best_price()
    }

    /// Spread between best ask and best bid.
    ///
    /// Errors when either side is empty, so a missing book never reads
    /// as a zero spread.
    pub fn spread(&self) -> Result<Decimal, BookError> {
        let bid = self.best_bid().ok_or(BookError::SideEmpty {
            side: LadderSide::Bid,
        })?;
        let ask = self.best_ask().ok_or(BookError::SideEmpty {
            side: LadderSide::Ask,
        })?;
        Ok(ask - bid)
    }

    /// Mid price between best bid and best ask.
    pub fn mid(&self) -> Result<Decimal, BookError> {
        let bid = self.best_bid().ok_or(BookError::SideEmpty {
            side: LadderSide::Bid,
        })?;
        let ask = self.best_ask().ok_or(BookError::SideEmpty {
            side: LadderSide::Ask,
        })?;
        Ok((bid + ask) / Decimal::TWO)
    }

    /// Check if the book is crossed (best_bid >= best_ask).
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => bid >= ask,
            _ => false,
        }
    }
}
