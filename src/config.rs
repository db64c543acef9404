//! Simulation configuration loaded from environment variables.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Simulation configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    // === Book Generation ===
    /// Number of price levels per side.
    #[serde(default = "default_book_depth")]
    pub book_depth: usize,

    /// Offset added to the reference price for the ask side, in price
    /// units. Keeps the two sides non-crossing by construction.
    #[serde(default = "default_ask_offset")]
    pub ask_offset: Decimal,

    /// Maximum per-level price step; each step is drawn uniformly from
    /// [1, step_max] in the reference price's unit.
    #[serde(default = "default_step_max")]
    pub step_max: u32,

    // === Match Simulation ===
    /// Lower bound of the simulated processing delay, in microseconds.
    #[serde(default = "default_delay_floor_us")]
    pub delay_floor_us: u64,

    /// Upper bound of the simulated processing delay, in microseconds.
    #[serde(default = "default_delay_ceil_us")]
    pub delay_ceil_us: u64,

    /// Probability that a submitted order matches at all.
    #[serde(default = "default_match_probability")]
    pub match_probability: f64,

    /// Maximum match count when an order does match.
    #[serde(default = "default_max_match_count")]
    pub max_match_count: u32,

    // === History ===
    /// Retained order records, newest first.
    #[serde(default = "default_order_history_cap")]
    pub order_history_cap: usize,

    /// Retained latency samples for percentile statistics.
    #[serde(default = "default_latency_history_cap")]
    pub latency_history_cap: usize,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_book_depth() -> usize {
    10
}

fn default_ask_offset() -> Decimal {
    Decimal::new(10, 0)
}

fn default_step_max() -> u32 {
    5
}

fn default_delay_floor_us() -> u64 {
    100 // 0.1ms
}

fn default_delay_ceil_us() -> u64 {
    1_500 // 1.5ms
}

fn default_match_probability() -> f64 {
    0.3
}

fn default_max_match_count() -> u32 {
    3
}

fn default_order_history_cap() -> usize {
    20
}

fn default_latency_history_cap() -> usize {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            book_depth: default_book_depth(),
            ask_offset: default_ask_offset(),
            step_max: default_step_max(),
            delay_floor_us: default_delay_floor_us(),
            delay_ceil_us: default_delay_ceil_us(),
            match_probability: default_match_probability(),
            max_match_count: default_max_match_count(),
            order_history_cap: default_order_history_cap(),
            latency_history_cap: default_latency_history_cap(),
            rust_log: default_log_level(),
        }
    }
}

impl SimConfig {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.book_depth == 0 {
            return Err("BOOK_DEPTH must be at least 1".to_string());
        }

        if self.ask_offset <= Decimal::ZERO {
            return Err("ASK_OFFSET must be positive".to_string());
        }

        if self.step_max == 0 {
            return Err("STEP_MAX must be at least 1".to_string());
        }

        if self.delay_floor_us == 0 || self.delay_floor_us > self.delay_ceil_us {
            return Err("delay bounds must satisfy 0 < DELAY_FLOOR_US <= DELAY_CEIL_US".to_string());
        }

        if !(0.0..=1.0).contains(&self.match_probability) {
            return Err("MATCH_PROBABILITY must be within [0, 1]".to_string());
        }

        if self.order_history_cap == 0 || self.latency_history_cap == 0 {
            return Err("history capacities must be at least 1".to_string());
        }

        Ok(())
    }

    /// Variant with the long statistics window used by the live
    /// dashboard (1000 latency samples, 50 retained orders).
    pub fn long_window(mut self) -> Self {
        self.latency_history_cap = 1_000;
        self.order_history_cap = 50;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let config = SimConfig::default();
        assert_eq!(config.book_depth, 10);
        assert_eq!(config.ask_offset, Decimal::new(10, 0));
        assert_eq!(config.delay_floor_us, 100);
        assert_eq!(config.delay_ceil_us, 1_500);
        assert_eq!(config.match_probability, 0.3);
        assert_eq!(config.order_history_cap, 20);
        assert_eq!(config.latency_history_cap, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_depth() {
        let config = SimConfig {
            book_depth: 0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_delay_bounds() {
        let config = SimConfig {
            delay_floor_us: 2_000,
            delay_ceil_us: 1_500,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_probability() {
        let config = SimConfig {
            match_probability: 1.5,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn long_window_widens_histories() {
        let config = SimConfig::default().long_window();
        assert_eq!(config.latency_history_cap, 1_000);
        assert_eq!(config.order_history_cap, 50);
    }
}
