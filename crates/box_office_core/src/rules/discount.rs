//! Per-line discount codes.
//!
//! A discount is a fraction in `[0, 1]` looked up from an external service by
//! account id and code. Discounted prices are computed in exact decimal
//! arithmetic and then floored to a whole currency amount:
//!
//! `discounted = floor(unit_price * (1 - fraction))`

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Fraction of the unit price taken off, constrained to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiscountFraction(Decimal);

/// Returned when a value outside `[0, 1]` is offered as a discount fraction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("discount fraction {value} is outside [0, 1]")]
pub struct DiscountFractionError {
    pub value: Decimal,
}

impl DiscountFraction {
    pub const ZERO: DiscountFraction = DiscountFraction(Decimal::ZERO);
    pub const FULL: DiscountFraction = DiscountFraction(Decimal::ONE);

    pub fn new(value: Decimal) -> Result<Self, DiscountFractionError> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(DiscountFractionError { value });
        }
        Ok(Self(value))
    }

    /// Build from a whole percentage, e.g. `25` for a quarter off.
    pub fn from_percent(percent: u32) -> Result<Self, DiscountFractionError> {
        Self::new(Decimal::new(i64::from(percent), 2))
    }

    pub fn value(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl Default for DiscountFraction {
    fn default() -> Self {
        Self::ZERO
    }
}

/// The discount service does not recognise `code` for the account.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("discount code '{code}' is not valid for account {account_id}")]
pub struct InvalidDiscountCode {
    pub account_id: i64,
    pub code: String,
}

impl InvalidDiscountCode {
    pub fn new(account_id: i64, code: impl Into<String>) -> Self {
        Self {
            account_id,
            code: code.into(),
        }
    }
}

/// External discount lookup.
pub trait DiscountService {
    fn discount_fraction(
        &self,
        account_id: i64,
        code: &str,
    ) -> Result<DiscountFraction, InvalidDiscountCode>;
}

impl<T: DiscountService + ?Sized> DiscountService for &T {
    fn discount_fraction(
        &self,
        account_id: i64,
        code: &str,
    ) -> Result<DiscountFraction, InvalidDiscountCode> {
        (**self).discount_fraction(account_id, code)
    }
}

/// Discount service used when none is configured: every code is worth nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDiscounts;

impl DiscountService for NoDiscounts {
    fn discount_fraction(
        &self,
        _account_id: i64,
        _code: &str,
    ) -> Result<DiscountFraction, InvalidDiscountCode> {
        Ok(DiscountFraction::ZERO)
    }
}

/// Returns the code only if it is worth sending to the discount service.
///
/// Absent, empty, and whitespace-only codes are treated as "no code".
pub fn usable_discount_code(code: Option<&str>) -> Option<&str> {
    code.filter(|c| !c.trim().is_empty())
}

/// `floor(unit_price * (1 - fraction))`, computed exactly.
pub fn discounted_unit_price(unit_price: u32, fraction: DiscountFraction) -> u32 {
    if fraction.is_zero() {
        return unit_price;
    }
    let discounted = (Decimal::from(unit_price) * (Decimal::ONE - fraction.value())).floor();
    // fraction in [0, 1] keeps the result within [0, unit_price].
    discounted.to_u32().unwrap_or(unit_price)
}
