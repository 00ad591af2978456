//! Base ticket prices, in whole pounds.
//!
//! | Category | Price |
//! |----------|-------|
//! | Adult    | 20    |
//! | Child    | 10    |
//! | Infant   | 0     |

use crate::ticket::{TicketCategory, TicketLine};

pub const ADULT_PRICE: u32 = 20;
pub const CHILD_PRICE: u32 = 10;
pub const INFANT_PRICE: u32 = 0;

/// Unit price for a category before any discount.
pub const fn unit_price(category: TicketCategory) -> u32 {
    match category {
        TicketCategory::Adult => ADULT_PRICE,
        TicketCategory::Child => CHILD_PRICE,
        TicketCategory::Infant => INFANT_PRICE,
    }
}

/// `Σ unit_price(category) * count` over all lines, ignoring discount codes.
pub fn undiscounted_total(lines: &[TicketLine]) -> i64 {
    lines
        .iter()
        .map(|line| i64::from(unit_price(line.category())) * i64::from(line.count()))
        .sum()
}
