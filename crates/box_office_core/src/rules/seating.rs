//! Seat allocation per ticket category.
//!
//! Infants sit on an adult's lap and take no seat; every other ticket takes
//! exactly one.

use crate::ticket::{TicketCategory, TicketLine};

/// Seats reserved for a single ticket of `category`.
pub const fn seats_for(category: TicketCategory) -> u32 {
    match category {
        TicketCategory::Adult | TicketCategory::Child => 1,
        TicketCategory::Infant => 0,
    }
}

/// `Σ seats_for(category) * count` over all lines.
pub fn total_seats(lines: &[TicketLine]) -> i64 {
    lines
        .iter()
        .map(|line| i64::from(seats_for(line.category())) * i64::from(line.count()))
        .sum()
}
