//! Stock enumeration and price quotes.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of prices returned per stock.
pub const PRICE_COUNT: usize = 12;

/// The closed set of supported stocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stock {
    Ngn,
    Eur,
    Usd,
}

impl Stock {
    pub const ALL: [Stock; 3] = [Stock::Ngn, Stock::Eur, Stock::Usd];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stock::Ngn => "ngn",
            Stock::Eur => "eur",
            Stock::Usd => "usd",
        }
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of `GET /{stock_name}/prices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockPrices {
    pub name: Stock,
    pub prices: Vec<f64>,
}

impl StockPrices {
    /// Random prices in `[0, 1)`.
    pub fn random<R: Rng + ?Sized>(name: Stock, rng: &mut R) -> Self {
        Self {
            name,
            prices: (0..PRICE_COUNT).map(|_| rng.gen::<f64>()).collect(),
        }
    }
}
