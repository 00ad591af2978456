//! In-memory payment and seat ledgers implementing the collaborator traits.

pub mod payments;
pub mod seats;

pub use payments::{PaymentEntry, PaymentError, PaymentLedger};
pub use seats::{SeatEntry, SeatError, SeatLedger};
