//! Reject reason labels for purchases refused before any external call.

/// Stable token for each rejection kind, used as the counter and log label.
///
/// Child/infant-without-adult is its own kind rather than a flavour of
/// `MalformedRequest`: the request is well formed, it just breaks the
/// accompaniment rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReasonCode {
    MalformedRequest,
    ExcessiveTickets,
    NoAdultPresent,
}

impl RejectReasonCode {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectReasonCode::MalformedRequest => "MalformedRequest",
            RejectReasonCode::ExcessiveTickets => "ExcessiveTickets",
            RejectReasonCode::NoAdultPresent => "NoAdultPresent",
        }
    }
}
