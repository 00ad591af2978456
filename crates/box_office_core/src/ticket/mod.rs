//! Purchase request value types.

pub mod fingerprint;
pub mod types;

pub use fingerprint::{format_request_hash, request_fingerprint};
pub use types::{PurchaseRequest, TicketCategory, TicketLine};
