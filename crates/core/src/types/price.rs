//! BRL price formatting using decimal arithmetic.
//!
//! The storefront displays all prices in Brazilian real, formatted the way
//! `Intl.NumberFormat("pt-BR", { style: "currency", currency: "BRL" })`
//! renders them: `R$ 1.234,56`. Amounts are rounded to two decimal places
//! before formatting.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A decimal amount displayed as Brazilian real.
///
/// Wraps a [`Decimal`] and implements [`Display`](fmt::Display) with pt-BR
/// currency formatting: `.` as the thousands separator, `,` as the decimal
/// separator, always two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Brl(pub Decimal);

impl Brl {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Brl {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Brl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Half-away-from-zero, matching how Intl.NumberFormat rounds
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = rounded.abs().to_string();

        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
        let cents = format!("{frac_part:0<2}");

        // Group the integer digits in threes, separated by '.'
        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, c) in int_part.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }
        let int_grouped: String = grouped.chars().rev().collect();

        if negative {
            write!(f, "-R$ {int_grouped},{cents}")
        } else {
            write!(f, "R$ {int_grouped},{cents}")
        }
    }
}
