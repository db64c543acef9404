//! Per-session state container.
//!
//! One [`SessionLedger`] is owned by exactly one logical session. All
//! mutation goes through `refresh_book` and `record_order` (or the
//! `submit_order` composition), so readers only ever observe whole
//! book generations and complete history entries. For embedding in a
//! concurrent host, [`SharedLedger`] wraps the ledger in a single
//! per-session lock.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::RwLock;
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::book::{BookGenerator, OrderBookSnapshot};
use crate::config::SimConfig;
use crate::error::OrderError;
use crate::stats::{LatencySummary, RollingStats};
use crate::trading::{MatchSimulator, OrderRecord, OrderRequest};

/// Immutable view of a session's state, safe to hand to a
/// presentation layer while mutations continue.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    /// Current order book.
    pub book: OrderBookSnapshot,
    /// Retained order records, newest first.
    pub orders: Vec<OrderRecord>,
    /// Latency percentile summary.
    pub stats: LatencySummary,
    /// Orders recorded over the session lifetime.
    pub total_orders: u64,
    /// Simulated matches over the session lifetime.
    pub total_matches: u64,
}

/// Process-local state for one simulated trading session.
pub struct SessionLedger {
    generator: BookGenerator,
    simulator: MatchSimulator,
    book: OrderBookSnapshot,
    // Newest first; bounded by order_history_cap.
    orders: VecDeque<OrderRecord>,
    order_history_cap: usize,
    latency: RollingStats,
    total_orders: u64,
    total_matches: u64,
}

impl SessionLedger {
    /// Create an empty ledger: no book levels, no history, zero
    /// counters.
    pub fn new(config: &SimConfig) -> Self {
        Self {
            generator: BookGenerator::from_config(config),
            simulator: MatchSimulator::from_config(config),
            book: OrderBookSnapshot::default(),
            orders: VecDeque::with_capacity(config.order_history_cap),
            order_history_cap: config.order_history_cap,
            latency: RollingStats::with_capacity(config.latency_history_cap),
            total_orders: 0,
            total_matches: 0,
        }
    }

    /// Regenerate both sides of the book around `reference_price`,
    /// replacing the previous snapshot as a whole.
    #[instrument(skip(self, rng), fields(%reference_price))]
    pub fn refresh_book<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        reference_price: Decimal,
    ) -> &OrderBookSnapshot {
        self.book = self.generator.generate(rng, reference_price);
        crate::metrics::inc_book_refreshes();
        debug!(
            bids = self.book.bids.len(),
            asks = self.book.asks.len(),
            "book refreshed"
        );
        &self.book
    }

    /// Validate, simulate, and record an order in one step.
    ///
    /// A rejected request leaves the ledger untouched.
    pub fn submit_order<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        request: OrderRequest,
    ) -> Result<OrderRecord, OrderError> {
        let record = match self.simulator.submit(rng, request) {
            Ok(record) => record,
            Err(err) => {
                crate::metrics::inc_orders_rejected();
                return Err(err);
            }
        };
        self.record_order(record.clone());
        Ok(record)
    }

    /// Record an already-populated order.
    ///
    /// This is the backend-agnostic entry point: records built from
    /// real backend responses land here exactly like simulated ones.
    pub fn record_order(&mut self, record: OrderRecord) {
        crate::metrics::record_submit_latency(record.latency);
        crate::metrics::inc_orders_submitted();
        if record.match_count > 0 {
            crate::metrics::add_matches(u64::from(record.match_count));
        }

        self.total_orders += 1;
        self.total_matches += u64::from(record.match_count);
        self.latency.push(record.latency);

        if self.orders.len() == self.order_history_cap {
            self.orders.pop_back();
        }
        self.orders.push_front(record);
    }

    /// Current order book.
    pub fn book(&self) -> &OrderBookSnapshot {
        &self.book
    }

    /// Latency percentile summary over the rolling window.
    pub fn stats(&self) -> LatencySummary {
        self.latency.summary()
    }

    /// Rolling latency buffer.
    pub fn latency_history(&self) -> &RollingStats {
        &self.latency
    }

    /// Up to `limit` most recent order records, newest first.
    pub fn history(&self, limit: usize) -> Vec<OrderRecord> {
        self.orders.iter().take(limit).cloned().collect()
    }

    /// Orders recorded over the session lifetime.
    pub fn total_orders(&self) -> u64 {
        self.total_orders
    }

    /// Simulated matches over the session lifetime.
    pub fn total_matches(&self) -> u64 {
        self.total_matches
    }

    /// Build an immutable snapshot of the whole session state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            book: self.book.clone(),
            orders: self.orders.iter().cloned().collect(),
            stats: self.latency.summary(),
            total_orders: self.total_orders,
            total_matches: self.total_matches,
        }
    }
}

/// A session ledger behind a single per-session lock, for hosts that
/// serve readers concurrently with order flow.
#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<SessionLedger>>,
}

impl SharedLedger {
    /// Create a shared ledger from configuration.
    pub fn new(config: &SimConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionLedger::new(config))),
        }
    }

    /// Refresh the book under the write lock.
    pub fn refresh_book<R: Rng + ?Sized>(&self, rng: &mut R, reference_price: Decimal) {
        self.inner.write().refresh_book(rng, reference_price);
    }

    /// Submit an order under the write lock.
    pub fn submit_order<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        request: OrderRequest,
    ) -> Result<OrderRecord, OrderError> {
        self.inner.write().submit_order(rng, request)
    }

    /// Record an externally produced order under the write lock.
    pub fn record_order(&self, record: OrderRecord) {
        self.inner.write().record_order(record);
    }

    /// Latency summary under the read lock.
    pub fn stats(&self) -> LatencySummary {
        self.inner.read().stats()
    }

    /// Recent order records under the read lock, newest first.
    pub fn history(&self, limit: usize) -> Vec<OrderRecord> {
        self.inner.read().history(limit)
    }

    /// Whole-state snapshot under the read lock.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.read().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trading::Side;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn new_ledger_is_empty() {
        let ledger = SessionLedger::new(&SimConfig::default());
        assert!(ledger.book().bids.is_empty());
        assert!(ledger.book().asks.is_empty());
        assert_eq!(ledger.total_orders(), 0);
        assert_eq!(ledger.total_matches(), 0);
        assert_eq!(ledger.stats(), LatencySummary::default());
        assert!(ledger.history(10).is_empty());
    }

    #[test]
    fn refresh_replaces_the_whole_book() {
        let mut ledger = SessionLedger::new(&SimConfig::default());
        let mut rng = rng(1);

        ledger.refresh_book(&mut rng, dec!(50000));
        let first = ledger.book().clone();
        assert_eq!(first.bids.len(), 10);

        ledger.refresh_book(&mut rng, dec!(50000));
        let second = ledger.book().clone();
        assert_ne!(first, second);
        assert!(!second.is_crossed());
    }

    #[test]
    fn submit_updates_history_and_counters() {
        let mut ledger = SessionLedger::new(&SimConfig::default());
        let mut rng = rng(2);

        for _ in 0..5 {
            ledger
                .submit_order(&mut rng, OrderRequest::market("BTCUSDT", Side::Buy, dec!(0.1)))
                .unwrap();
        }

        assert_eq!(ledger.total_orders(), 5);
        assert_eq!(ledger.latency_history().len(), 5);
        assert_eq!(ledger.history(10).len(), 5);
    }

    #[test]
    fn rejected_order_leaves_state_untouched() {
        let mut ledger = SessionLedger::new(&SimConfig::default());
        let mut rng = rng(3);

        let result =
            ledger.submit_order(&mut rng, OrderRequest::market("BTCUSDT", Side::Buy, dec!(0)));
        assert!(result.is_err());
        assert_eq!(ledger.total_orders(), 0);
        assert_eq!(ledger.total_matches(), 0);
        assert!(ledger.latency_history().is_empty());
        assert!(ledger.history(10).is_empty());
    }

    #[test]
    fn history_is_newest_first_and_bounded() {
        let config = SimConfig {
            order_history_cap: 3,
            ..SimConfig::default()
        };
        let mut ledger = SessionLedger::new(&config);
        let mut rng = rng(4);

        for i in 1..=5u32 {
            ledger
                .submit_order(
                    &mut rng,
                    OrderRequest::market("BTCUSDT", Side::Buy, Decimal::from(i)),
                )
                .unwrap();
        }

        let history = ledger.history(10);
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].quantity, dec!(5));
        assert_eq!(history[1].quantity, dec!(4));
        assert_eq!(history[2].quantity, dec!(3));

        let limited = ledger.history(2);
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].quantity, dec!(5));
    }

    #[test]
    fn total_matches_accumulates_record_counts() {
        let mut ledger = SessionLedger::new(&SimConfig::default());
        let mut rng = rng(5);

        let mut expected = 0u64;
        for _ in 0..200 {
            let record = ledger
                .submit_order(&mut rng, OrderRequest::market("BTCUSDT", Side::Sell, dec!(1)))
                .unwrap();
            expected += u64::from(record.match_count);
        }
        assert_eq!(ledger.total_matches(), expected);
    }

    #[test]
    fn externally_measured_records_flow_through_the_same_path() {
        let mut ledger = SessionLedger::new(&SimConfig::default());
        let record = OrderRecord {
            timestamp: time::OffsetDateTime::UNIX_EPOCH,
            symbol: "BTCUSDT".to_string(),
            side: Side::Buy,
            order_type: crate::trading::OrderType::Market,
            quantity: dec!(0.1),
            price: None,
            latency: Duration::from_micros(840),
            match_count: 2,
        };

        ledger.record_order(record);
        assert_eq!(ledger.total_orders(), 1);
        assert_eq!(ledger.total_matches(), 2);
        assert_eq!(ledger.stats().p50, Duration::from_micros(840));
    }

    #[test]
    fn snapshot_is_detached_from_later_mutation() {
        let mut ledger = SessionLedger::new(&SimConfig::default());
        let mut rng = rng(6);

        ledger.refresh_book(&mut rng, dec!(50000));
        let snapshot = ledger.snapshot();

        ledger
            .submit_order(&mut rng, OrderRequest::market("BTCUSDT", Side::Buy, dec!(1)))
            .unwrap();
        ledger.refresh_book(&mut rng, dec!(51000));

        assert_eq!(snapshot.total_orders, 0);
        assert!(snapshot.orders.is_empty());
        assert!(snapshot.book.best_bid().unwrap() < dec!(50000));
    }

    #[test]
    fn shared_ledger_serves_concurrent_readers() {
        let shared = SharedLedger::new(&SimConfig::default());
        let mut rng = rng(7);
        shared.refresh_book(&mut rng, dec!(50000));

        let reader = {
            let shared = shared.clone();
            std::thread::spawn(move || {
                for _ in 0..100 {
                    let snapshot = shared.snapshot();
                    // A reader must never see a half-replaced book.
                    assert!(!snapshot.book.is_crossed());
                    assert!(snapshot.orders.len() as u64 <= snapshot.total_orders);
                }
            })
        };

        for _ in 0..100 {
            shared
                .submit_order(&mut rng, OrderRequest::market("BTCUSDT", Side::Buy, dec!(0.1)))
                .unwrap();
            shared.refresh_book(&mut rng, dec!(50000));
        }

        reader.join().unwrap();
    }
}
