//! Pricing, seating, and discount rules.

pub mod discount;
pub mod pricing;
pub mod seating;

pub use discount::{
    DiscountFraction, DiscountFractionError, DiscountService, InvalidDiscountCode, NoDiscounts,
    discounted_unit_price, usable_discount_code,
};
pub use pricing::{ADULT_PRICE, CHILD_PRICE, INFANT_PRICE, undiscounted_total, unit_price};
pub use seating::{seats_for, total_seats};
