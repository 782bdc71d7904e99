//! Dual-currency amounts.
//!
//! Every movement record stores its value in both the local bookkeeping
//! currency and the foreign reference currency, captured by the write path
//! at entry time. [`DualAmount`] carries that pair plus the exchange rate
//! that was applied, and [`Currency`] selects which side a computation
//! reads. Nothing in this crate converts between the two sides.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of a [`DualAmount`] a computation reads.
///
/// # Examples
///
/// ```
/// use cashbook_core::Currency;
///
/// let currency: Currency = "foreign".parse().unwrap();
/// assert_eq!(currency, Currency::Foreign);
/// assert_eq!(currency.to_string(), "foreign");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    /// The local bookkeeping currency (e.g. FC).
    #[default]
    Local,
    /// The foreign reference currency (e.g. USD).
    Foreign,
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "foreign" => Ok(Self::Foreign),
            _ => Err(format!("unknown currency selector: {s}")),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Foreign => write!(f, "foreign"),
        }
    }
}

/// A value captured in both currencies at write time.
///
/// The exchange rate is whatever rate the write path applied when the
/// record was created. It is carried through for audit display and is
/// never used to recompute either side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualAmount {
    /// Value in the local currency.
    #[serde(rename = "amountLocal")]
    pub local: Decimal,
    /// Value in the foreign currency.
    #[serde(rename = "amountForeign")]
    pub foreign: Decimal,
    /// Exchange rate applied by the write path, if it recorded one.
    #[serde(rename = "exchangeRate", default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
}

impl DualAmount {
    /// Create a dual amount without an exchange rate.
    #[must_use]
    pub const fn new(local: Decimal, foreign: Decimal) -> Self {
        Self {
            local,
            foreign,
            exchange_rate: None,
        }
    }

    /// Create a zero amount in both currencies.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO)
    }

    /// Attach the exchange rate the write path applied.
    #[must_use]
    pub const fn with_rate(mut self, rate: Decimal) -> Self {
        self.exchange_rate = Some(rate);
        self
    }

    /// Read the side selected by `currency`.
    #[must_use]
    pub const fn select(&self, currency: Currency) -> Decimal {
        match currency {
            Currency::Local => self.local,
            Currency::Foreign => self.foreign,
        }
    }
}
