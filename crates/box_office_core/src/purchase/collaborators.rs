//! External services the purchase pipeline hands off to.
//!
//! The pipeline calls each of these at most once per purchase and forwards
//! their errors untouched. Retries, timeouts, and compensation belong to the
//! implementations, not to the caller.

/// Collects payment for a purchase.
pub trait TicketPaymentService {
    type Error: std::error::Error + Send + Sync + 'static;

    /// `total_amount` may be negative: lines such as `-5` adults and `+5`
    /// children pass validation and are forwarded as computed.
    fn make_payment(&self, account_id: i64, total_amount: i64) -> Result<(), Self::Error>;
}

/// Reserves seats for a purchase.
pub trait SeatReservationService {
    type Error: std::error::Error + Send + Sync + 'static;

    fn reserve_seat(&self, account_id: i64, total_seats: i64) -> Result<(), Self::Error>;
}

impl<T: TicketPaymentService + ?Sized> TicketPaymentService for &T {
    type Error = T::Error;

    fn make_payment(&self, account_id: i64, total_amount: i64) -> Result<(), Self::Error> {
        (**self).make_payment(account_id, total_amount)
    }
}

impl<T: SeatReservationService + ?Sized> SeatReservationService for &T {
    type Error = T::Error;

    fn reserve_seat(&self, account_id: i64, total_seats: i64) -> Result<(), Self::Error> {
        (**self).reserve_seat(account_id, total_seats)
    }
}
