//! In-memory discount catalog.
//!
//! Codes are matched exactly as given. A code bound to an account takes
//! precedence over a global code with the same text.

use std::collections::HashMap;

use box_office_core::rules::{
    DiscountFraction, DiscountFractionError, DiscountService, InvalidDiscountCode,
};

use crate::config::DiscountEntry;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("discount code '{code}' has an invalid fraction")]
    InvalidFraction {
        code: String,
        #[source]
        source: DiscountFractionError,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DiscountCatalog {
    global: HashMap<String, DiscountFraction>,
    per_account: HashMap<(i64, String), DiscountFraction>,
}

impl DiscountCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: &[DiscountEntry]) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for entry in entries {
            let fraction = DiscountFraction::new(entry.fraction).map_err(|source| {
                CatalogError::InvalidFraction {
                    code: entry.code.clone(),
                    source,
                }
            })?;
            match entry.account_id {
                Some(account_id) => catalog.insert_for_account(account_id, &entry.code, fraction),
                None => catalog.insert_global(&entry.code, fraction),
            }
        }
        Ok(catalog)
    }

    pub fn insert_global(&mut self, code: &str, fraction: DiscountFraction) {
        self.global.insert(code.to_string(), fraction);
    }

    pub fn insert_for_account(&mut self, account_id: i64, code: &str, fraction: DiscountFraction) {
        self.per_account
            .insert((account_id, code.to_string()), fraction);
    }

    /// Number of distinct (scope, code) entries.
    pub fn len(&self) -> usize {
        self.global.len() + self.per_account.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiscountService for DiscountCatalog {
    fn discount_fraction(
        &self,
        account_id: i64,
        code: &str,
    ) -> Result<DiscountFraction, InvalidDiscountCode> {
        self.per_account
            .get(&(account_id, code.to_string()))
            .or_else(|| self.global.get(code))
            .copied()
            .ok_or_else(|| InvalidDiscountCode::new(account_id, code))
    }
}
