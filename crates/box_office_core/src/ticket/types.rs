//! Immutable purchase request values.
//!
//! A `PurchaseRequest` takes its own copy of the ticket lines when built and
//! only hands out a shared slice, so every pipeline stage iterates the same
//! snapshot the caller submitted.

/// Ticket category. Closed set; the pricing and seating rules match on it
/// exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TicketCategory {
    Adult,
    Child,
    Infant,
}

impl TicketCategory {
    /// Every category, in declaration order.
    pub const ALL: [TicketCategory; 3] = [
        TicketCategory::Adult,
        TicketCategory::Child,
        TicketCategory::Infant,
    ];

    /// Stable lowercase token used in logs and fingerprints.
    pub const fn as_str(self) -> &'static str {
        match self {
            TicketCategory::Adult => "adult",
            TicketCategory::Child => "child",
            TicketCategory::Infant => "infant",
        }
    }

    /// Child and infant tickets need an accompanying adult ticket.
    pub const fn requires_adult(self) -> bool {
        matches!(self, TicketCategory::Child | TicketCategory::Infant)
    }
}

/// One line of a purchase: a category, how many tickets, and an optional
/// discount code.
///
/// `count` is stored exactly as given. Negative values are legal here and are
/// caught by the purchase validator, not at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicketLine {
    category: TicketCategory,
    count: i32,
    discount_code: Option<String>,
}

impl TicketLine {
    pub fn new(category: TicketCategory, count: i32) -> Self {
        Self {
            category,
            count,
            discount_code: None,
        }
    }

    pub fn with_discount_code(
        category: TicketCategory,
        count: i32,
        discount_code: impl Into<String>,
    ) -> Self {
        Self {
            category,
            count,
            discount_code: Some(discount_code.into()),
        }
    }

    pub fn category(&self) -> TicketCategory {
        self.category
    }

    pub fn count(&self) -> i32 {
        self.count
    }

    /// The discount code exactly as supplied (may be empty or whitespace).
    pub fn discount_code(&self) -> Option<&str> {
        self.discount_code.as_deref()
    }
}

/// A purchase request for one account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PurchaseRequest {
    account_id: i64,
    lines: Box<[TicketLine]>,
}

impl PurchaseRequest {
    /// Build a request from any sequence of lines.
    ///
    /// The lines are collected into storage owned by the request; later
    /// changes to the caller's collection are not observed.
    pub fn new<I>(account_id: i64, lines: I) -> Self
    where
        I: IntoIterator<Item = TicketLine>,
    {
        Self {
            account_id,
            lines: lines.into_iter().collect(),
        }
    }

    pub fn account_id(&self) -> i64 {
        self.account_id
    }

    /// Read-only view of the lines, in submission order.
    pub fn lines(&self) -> &[TicketLine] {
        &self.lines
    }

    /// Net ticket count: the plain sum of every line's count.
    ///
    /// Accumulated in `i64`; the result may be negative.
    pub fn net_ticket_count(&self) -> i64 {
        self.lines.iter().map(|line| i64::from(line.count)).sum()
    }

    pub fn has_category(&self, category: TicketCategory) -> bool {
        self.lines.iter().any(|line| line.category == category)
    }

    /// Stable 64-bit fingerprint of the request contents.
    pub fn fingerprint(&self) -> u64 {
        super::fingerprint::request_fingerprint(self)
    }
}
