//! Money type with exact minor-unit precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are held as integer minor units (e.g., cents); `rust_decimal` is
//! only used at the string boundary.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest magnitude accepted for a money value, in minor units (12 digits).
pub const MAX_MINOR_UNITS: i64 = 999_999_999_999;

/// Errors raised while parsing or building money values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The value is not a decimal number.
    #[error("'{0}' is not a valid decimal amount")]
    InvalidFormat(String),

    /// The value has more decimal places than the currency allows.
    #[error("'{value}' has more than {max_decimals} decimal places")]
    TooPrecise {
        /// The rejected input.
        value: String,
        /// Decimal places allowed by the currency.
        max_decimals: u32,
    },

    /// The value exceeds the supported magnitude.
    #[error("'{0}' is out of the supported range")]
    OutOfRange(String),

    /// The currency code is not in the currency table.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

/// Generates the currency table: enum variants, ISO codes and minor-unit exponents.
macro_rules! currencies {
    ($($variant:ident => $code:literal, $exponent:literal, $doc:literal;)*) => {
        /// ISO 4217 currency codes supported by the system.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum Currency {
            $(
                #[doc = $doc]
                $variant,
            )*
        }

        impl Currency {
            /// Every currency in the table, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// ISO 4217 alphabetic code.
            #[must_use]
            pub const fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)*
                }
            }

            /// Number of decimal digits of the minor unit (0 for JPY, 2 for USD, 3 for KWD).
            #[must_use]
            pub const fn minor_units(self) -> u32 {
                match self {
                    $(Self::$variant => $exponent,)*
                }
            }
        }
    };
}

currencies! {
    Usd => "USD", 2, "US Dollar";
    Eur => "EUR", 2, "Euro";
    Gbp => "GBP", 2, "Pound Sterling";
    Chf => "CHF", 2, "Swiss Franc";
    Cad => "CAD", 2, "Canadian Dollar";
    Aud => "AUD", 2, "Australian Dollar";
    Nzd => "NZD", 2, "New Zealand Dollar";
    Sgd => "SGD", 2, "Singapore Dollar";
    Hkd => "HKD", 2, "Hong Kong Dollar";
    Cny => "CNY", 2, "Yuan Renminbi";
    Inr => "INR", 2, "Indian Rupee";
    Idr => "IDR", 2, "Indonesian Rupiah";
    Myr => "MYR", 2, "Malaysian Ringgit";
    Php => "PHP", 2, "Philippine Peso";
    Thb => "THB", 2, "Thai Baht";
    Mxn => "MXN", 2, "Mexican Peso";
    Brl => "BRL", 2, "Brazilian Real";
    Zar => "ZAR", 2, "South African Rand";
    Sek => "SEK", 2, "Swedish Krona";
    Nok => "NOK", 2, "Norwegian Krone";
    Dkk => "DKK", 2, "Danish Krone";
    Pln => "PLN", 2, "Zloty";
    Jpy => "JPY", 0, "Yen";
    Krw => "KRW", 0, "Won";
    Vnd => "VND", 0, "Dong";
    Clp => "CLP", 0, "Chilean Peso";
    Isk => "ISK", 0, "Iceland Krona";
    Bhd => "BHD", 3, "Bahraini Dinar";
    Jod => "JOD", 3, "Jordanian Dinar";
    Kwd => "KWD", 3, "Kuwaiti Dinar";
    Omr => "OMR", 3, "Rial Omani";
    Tnd => "TND", 3, "Tunisian Dinar";
}

impl Currency {
    /// Value of one major unit expressed in minor units (`10^minor_units`).
    #[must_use]
    pub const fn minor_per_major(self) -> i64 {
        10_i64.pow(self.minor_units())
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.code() == code)
            .ok_or_else(|| MoneyError::UnknownCurrency(s.to_string()))
    }
}

/// A monetary amount held as integer minor units of its currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Money {
    /// The amount in the smallest currency unit (e.g., cents).
    pub minor: i64,
    /// ISO 4217 currency.
    pub currency: Currency,
}

impl Money {
    /// Creates a new Money instance from minor units.
    #[must_use]
    pub const fn from_minor(minor: i64, currency: Currency) -> Self {
        Self { minor, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self { minor: 0, currency }
    }

    /// Parses a decimal string such as `"12.50"` into exact minor units.
    ///
    /// Trailing zeros beyond the currency's precision are accepted (`"1.500"`
    /// for USD); significant digits beyond it are not.
    pub fn parse(value: &str, currency: Currency) -> Result<Self, MoneyError> {
        let trimmed = value.trim();
        // from_str rounds past 28 fractional digits; from_str_exact refuses
        let decimal = Decimal::from_str_exact(trimmed).map_err(|_| {
            if Decimal::from_str(trimmed).is_ok() {
                MoneyError::TooPrecise {
                    value: value.to_string(),
                    max_decimals: currency.minor_units(),
                }
            } else {
                MoneyError::InvalidFormat(value.to_string())
            }
        })?;
        Self::from_decimal(decimal, currency).map_err(|e| match e {
            MoneyError::TooPrecise { max_decimals, .. } => MoneyError::TooPrecise {
                value: value.to_string(),
                max_decimals,
            },
            MoneyError::OutOfRange(_) => MoneyError::OutOfRange(value.to_string()),
            other => other,
        })
    }

    /// Converts an exact decimal into minor units of `currency`.
    pub fn from_decimal(amount: Decimal, currency: Currency) -> Result<Self, MoneyError> {
        let exponent = currency.minor_units();
        if amount.round_dp(exponent) != amount {
            return Err(MoneyError::TooPrecise {
                value: amount.to_string(),
                max_decimals: exponent,
            });
        }

        let minor = amount
            .checked_mul(Decimal::from(currency.minor_per_major()))
            .and_then(|scaled| scaled.to_i64())
            .filter(|m| m.abs() <= MAX_MINOR_UNITS)
            .ok_or_else(|| MoneyError::OutOfRange(amount.to_string()))?;

        Ok(Self { minor, currency })
    }

    /// Returns the amount as a decimal scaled to the currency's precision.
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.minor, self.currency.minor_units())
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.minor == 0
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.minor < 0
    }
}

/// Formats with exactly the currency's number of decimal places (`"15.00"`, `"1200"`).
impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}
