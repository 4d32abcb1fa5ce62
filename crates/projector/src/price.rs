//! Market price of the native coin.
//!
//! The price is composed from two exchange quotes: coin per BTC and BTC per
//! USDT. Fetching quotes is left to a [`QuoteSource`] implementation.

use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;
use thiserror::Error;
use tracing::debug;

/// The markets the price is composed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Market {
    BtcQrl,
    UsdtBtc,
}

impl Market {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::BtcQrl => "BTC-QRL",
            Self::UsdtBtc => "USDT-BTC",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum QuoteError {
    #[error("no quote for market {0}")]
    Unavailable(Market),

    #[error("quote for market {market} is not a positive number: {value}")]
    InvalidQuote { market: Market, value: f64 },

    #[error("quote source failed: {0}")]
    Source(String),
}

/// Last traded price per market.
pub trait QuoteSource {
    fn last(&self, market: Market) -> Result<f64, QuoteError>;
}

impl<S: BuildHasher> QuoteSource for HashMap<Market, f64, S> {
    fn last(&self, market: Market) -> Result<f64, QuoteError> {
        self.get(&market)
            .copied()
            .ok_or(QuoteError::Unavailable(market))
    }
}

fn quote(source: &dyn QuoteSource, market: Market) -> Result<f64, QuoteError> {
    let value = source.last(market)?;
    if !value.is_finite() || value <= 0.0 {
        return Err(QuoteError::InvalidQuote { market, value });
    }
    Ok(value)
}

/// USD price of one coin.
pub fn market_price(source: &dyn QuoteSource) -> Result<f64, QuoteError> {
    let btc = quote(source, Market::BtcQrl)?;
    let usd = quote(source, Market::UsdtBtc)?;
    debug!(btc, usd, "composed market price");
    Ok(btc * usd)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quotes(btc: f64, usd: f64) -> HashMap<Market, f64> {
        HashMap::from([(Market::BtcQrl, btc), (Market::UsdtBtc, usd)])
    }

    #[test]
    fn test_market_price() {
        let price = market_price(&quotes(0.00002, 50_000.0)).unwrap();
        assert!((price - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_market() {
        let source = HashMap::from([(Market::BtcQrl, 0.5)]);
        assert_eq!(
            market_price(&source),
            Err(QuoteError::Unavailable(Market::UsdtBtc))
        );
    }

    #[test]
    fn test_invalid_quote() {
        assert!(matches!(
            market_price(&quotes(0.0, 50_000.0)),
            Err(QuoteError::InvalidQuote {
                market: Market::BtcQrl,
                ..
            })
        ));
        assert!(market_price(&quotes(1.0, f64::NAN)).is_err());
    }

    struct Offline;

    impl QuoteSource for Offline {
        fn last(&self, _market: Market) -> Result<f64, QuoteError> {
            Err(QuoteError::Source("connection refused".into()))
        }
    }

    #[test]
    fn test_source_failure_propagates() {
        assert_eq!(
            market_price(&Offline).unwrap_err().to_string(),
            "quote source failed: connection refused"
        );
    }
}
