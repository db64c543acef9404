//! Synthetic order book generation.
//!
//! Books are generated as cumulative random walks away from a
//! reference price, so side ordering holds by construction: every step
//! is at least one price unit, which also rules out duplicate levels.

use rand::Rng;
use rust_decimal::Decimal;
use tracing::instrument;

use super::types::{LadderSide, OrderBookSnapshot, PriceLadder, PriceLevel};
use crate::config::SimConfig;

/// Quantity draw bounds in ten-thousandths: [0.1000, 10.0000].
/// Drawing scaled integers keeps quantities exact at 4 decimal places.
const QTY_MIN_SCALED: i64 = 1_000;
const QTY_MAX_SCALED: i64 = 100_000;
const QTY_SCALE: u32 = 4;

/// Generates fresh two-sided synthetic books around a reference price.
///
/// Pure over its inputs plus the injected random source; generating a
/// book has no side effects on any session state.
#[derive(Debug, Clone, Copy)]
pub struct BookGenerator {
    depth: usize,
    ask_offset: Decimal,
    step_max: u32,
}

impl BookGenerator {
    /// Build a generator from configuration.
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            depth: config.book_depth,
            ask_offset: config.ask_offset,
            step_max: config.step_max,
        }
    }

    /// Generate one side of a book around `reference_price`.
    ///
    /// Level prices walk away from the reference by cumulative steps,
    /// each drawn uniformly from [1, step_max], so bid prices are
    /// strictly below the reference and strictly descending, ask prices
    /// strictly above it and strictly ascending.
    #[instrument(skip(self, rng), fields(%reference_price, %side))]
    pub fn generate_side<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        reference_price: Decimal,
        side: LadderSide,
    ) -> PriceLadder {
        let mut cumulative: u64 = 0;
        let mut levels = Vec::with_capacity(self.depth);

        for _ in 0..self.depth {
            cumulative += u64::from(rng.gen_range(1..=self.step_max));
            let offset = Decimal::from(cumulative);
            let price = match side {
                LadderSide::Bid => reference_price - offset,
                LadderSide::Ask => reference_price + offset,
            };
            let quantity = Decimal::new(rng.gen_range(QTY_MIN_SCALED..=QTY_MAX_SCALED), QTY_SCALE);
            levels.push(PriceLevel::new(price, quantity));
        }

        // Sorting is a post-condition of this function, not an
        // assumption about draw order.
        PriceLadder::new(side, levels)
    }

    /// Generate a full two-sided snapshot.
    ///
    /// The ask side walks up from `reference_price + ask_offset`, a
    /// disjoint reference that guarantees best_ask > best_bid without
    /// retrying.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        reference_price: Decimal,
    ) -> OrderBookSnapshot {
        OrderBookSnapshot {
            bids: self.generate_side(rng, reference_price, LadderSide::Bid),
            asks: self.generate_side(rng, reference_price + self.ask_offset, LadderSide::Ask),
        }
    }
}

impl Default for BookGenerator {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}
