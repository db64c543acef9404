//! Order request and record types.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::OffsetDateTime;

use crate::error::OrderError;

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order.
    #[strum(serialize = "BUY", serialize = "buy")]
    Buy,
    /// Sell order.
    #[strum(serialize = "SELL", serialize = "sell")]
    Sell,
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Execute immediately at the best available price.
    #[strum(serialize = "MARKET", serialize = "market")]
    Market,
    /// Execute at the given price or better.
    #[strum(serialize = "LIMIT", serialize = "limit")]
    Limit,
}

/// Order parameters for submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderRequest {
    /// Instrument symbol, e.g. "BTCUSDT".
    pub symbol: String,
    /// Order side (buy/sell).
    pub side: Side,
    /// Market or limit.
    pub order_type: OrderType,
    /// Order quantity.
    pub quantity: Decimal,
    /// Limit price; required for limit orders, absent for market orders.
    pub price: Option<Decimal>,
}

impl OrderRequest {
    /// Create a new market order.
    pub fn market(symbol: impl Into<String>, side: Side, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            quantity,
            price: None,
        }
    }

    /// Create a new limit order.
    pub fn limit(symbol: impl Into<String>, side: Side, quantity: Decimal, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Limit,
            quantity,
            price: Some(price),
        }
    }

    /// Validate order parameters.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.quantity <= Decimal::ZERO {
            return Err(OrderError::NonPositiveQuantity(self.quantity));
        }
        if self.order_type == OrderType::Limit {
            match self.price {
                None => return Err(OrderError::MissingLimitPrice),
                Some(price) if price <= Decimal::ZERO => {
                    return Err(OrderError::NonPositiveLimitPrice(price));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Fully populated record of an accepted order.
///
/// Created exactly once per accepted request; immutable thereafter.
/// The latency field holds whichever is available: the simulator's
/// drawn processing delay, or a wall-clock round trip measured by the
/// host against a real backend. Downstream statistics are agnostic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderRecord {
    /// When the order was accepted.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Instrument symbol.
    pub symbol: String,
    /// Order side.
    pub side: Side,
    /// Market or limit.
    pub order_type: OrderType,
    /// Order quantity.
    pub quantity: Decimal,
    /// Limit price, if any.
    pub price: Option<Decimal>,
    /// Processing latency, simulated or measured.
    pub latency: Duration,
    /// Number of simulated fills against the book.
    pub match_count: u32,
}

impl OrderRecord {
    /// Latency in microseconds, the unit the dashboards display.
    pub fn latency_micros(&self) -> u128 {
        self.latency.as_micros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn request_constructors() {
        let market = OrderRequest::market("BTCUSDT", Side::Buy, dec!(0.1));
        assert_eq!(market.order_type, OrderType::Market);
        assert_eq!(market.price, None);

        let limit = OrderRequest::limit("ETHUSDT", Side::Sell, dec!(2), dec!(3100));
        assert_eq!(limit.order_type, OrderType::Limit);
        assert_eq!(limit.price, Some(dec!(3100)));
    }

    #[test]
    fn validation_rejects_non_positive_quantity() {
        let zero = OrderRequest::market("BTCUSDT", Side::Buy, dec!(0));
        assert_eq!(
            zero.validate(),
            Err(OrderError::NonPositiveQuantity(dec!(0)))
        );

        let negative = OrderRequest::market("BTCUSDT", Side::Buy, dec!(-1));
        assert!(negative.validate().is_err());
    }

    #[test]
    fn validation_requires_positive_limit_price() {
        let missing = OrderRequest {
            price: None,
            ..OrderRequest::limit("BTCUSDT", Side::Buy, dec!(1), dec!(50000))
        };
        assert_eq!(missing.validate(), Err(OrderError::MissingLimitPrice));

        let zero_price = OrderRequest::limit("BTCUSDT", Side::Buy, dec!(1), dec!(0));
        assert_eq!(
            zero_price.validate(),
            Err(OrderError::NonPositiveLimitPrice(dec!(0)))
        );
    }

    #[test]
    fn market_order_needs_no_price() {
        let market = OrderRequest::market("BTCUSDT", Side::Sell, dec!(0.5));
        assert!(market.validate().is_ok());
    }

    #[test]
    fn side_from_string() {
        use std::str::FromStr;
        assert_eq!(Side::from_str("BUY").unwrap(), Side::Buy);
        assert_eq!(Side::from_str("sell").unwrap(), Side::Sell);
        assert_eq!(OrderType::from_str("market").unwrap(), OrderType::Market);
    }

    #[test]
    fn record_serializes_for_the_dashboard() {
        let record = OrderRecord {
            timestamp: OffsetDateTime::UNIX_EPOCH,
            symbol: "BTCUSDT".to_string(),
            side: Side::Buy,
            order_type: OrderType::Market,
            quantity: dec!(0.1),
            price: None,
            latency: Duration::from_micros(742),
            match_count: 2,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["symbol"], "BTCUSDT");
        assert_eq!(json["side"], "BUY");
        assert_eq!(json["match_count"], 2);
        assert_eq!(record.latency_micros(), 742);
    }
}
