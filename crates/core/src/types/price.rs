//! Prices in integer minor currency units.
//!
//! All price arithmetic happens in the smallest denomination (cents) so that
//! no floating-point rounding can creep into order totals.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A price expressed in minor currency units (e.g. cents).
///
/// Wraps an `i64`, which is enough for any plausible cart total.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Zero price, the subtotal of an empty cart.
    pub const ZERO: Self = Self(0);

    /// Create a price from an amount in minor units.
    #[must_use]
    pub const fn from_minor_units(amount: i64) -> Self {
        Self(amount)
    }

    /// The amount in minor units.
    #[must_use]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Multiply a unit price by a line quantity, saturating on overflow.
    #[must_use]
    pub const fn saturating_mul_quantity(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as i64))
    }

    /// Add two prices, saturating on overflow.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Whether the price is negative. Catalog prices must never be.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Price {
    /// Formats as major units with two decimals, e.g. `"19.99"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

// SQLx support (with postgres feature): stored as BIGINT.
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i64 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <i64 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i64 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(Price::ZERO.minor_units(), 0);
    }

    #[test]
    fn test_mul_quantity() {
        let unit = Price::from_minor_units(500);
        assert_eq!(unit.saturating_mul_quantity(2).minor_units(), 1000);
        assert_eq!(unit.saturating_mul_quantity(0).minor_units(), 0);
    }

    #[test]
    fn test_mul_quantity_saturates() {
        let unit = Price::from_minor_units(i64::MAX);
        assert_eq!(unit.saturating_mul_quantity(2).minor_units(), i64::MAX);
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_minor_units(1999).to_string(), "19.99");
        assert_eq!(Price::from_minor_units(5).to_string(), "0.05");
        assert_eq!(Price::from_minor_units(-250).to_string(), "-2.50");
        assert_eq!(Price::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_serde_transparent() {
        let price = Price::from_minor_units(1234);
        let json = serde_json::to_string(&price).expect("serialize");
        assert_eq!(json, "1234");
        let parsed: Price = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, price);
    }

    #[test]
    fn test_is_negative() {
        assert!(Price::from_minor_units(-1).is_negative());
        assert!(!Price::ZERO.is_negative());
    }
}
