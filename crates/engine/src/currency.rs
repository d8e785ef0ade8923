use serde::{Deserialize, Serialize};

use crate::{EngineError, Money};

/// ISO 4217 currency code a group keeps its ledger in.
///
/// The engine never converts between currencies; the code only labels
/// amounts when they are rendered for people. Amounts are always stored as
/// cents (see [`Money`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Sgd,
    Usd,
    Myr,
    Thb,
    Jpy,
    Eur,
    Krw,
    Idr,
}

impl Currency {
    pub const ALL: [Currency; 8] = [
        Currency::Sgd,
        Currency::Usd,
        Currency::Myr,
        Currency::Thb,
        Currency::Jpy,
        Currency::Eur,
        Currency::Krw,
        Currency::Idr,
    ];

    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Sgd => "SGD",
            Currency::Usd => "USD",
            Currency::Myr => "MYR",
            Currency::Thb => "THB",
            Currency::Jpy => "JPY",
            Currency::Eur => "EUR",
            Currency::Krw => "KRW",
            Currency::Idr => "IDR",
        }
    }

    /// Renders an amount followed by the currency code, e.g. `12.50 SGD`.
    #[must_use]
    pub fn format(self, amount: Money) -> String {
        format!("{amount} {}", self.code())
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let code = value.trim().to_ascii_uppercase();
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code() == code)
            .ok_or_else(|| EngineError::UnsupportedCurrency(code.to_string()))
    }
}
