//! Sales record and rejection entry models.

use crate::decimal::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Separator used when the reasons of a rejection are rendered or persisted.
pub const REASON_SEPARATOR: &str = ", ";

/// One monthly sale, as parsed from a fixed-width input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Reporting period the record claims to belong to
    pub date: NaiveDate,

    /// Seller identifier, trimmed. Empty when the field was blank.
    pub seller_code: String,

    /// Sale value
    pub amount: Amount,

    /// Whether the sale was made to a large account
    #[serde(rename = "large_account")]
    pub is_large_account_sale: bool,
}

impl SalesRecord {
    pub fn new(
        date: NaiveDate,
        seller_code: impl Into<String>,
        amount: Amount,
        is_large_account_sale: bool,
    ) -> Self {
        SalesRecord {
            date,
            seller_code: seller_code.into(),
            amount,
            is_large_account_sale,
        }
    }
}

/// Audit trail of a record that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionEntry {
    /// Fixed-width reconstruction of the rejected record
    pub original_line: String,

    /// Reasons in validator evaluation order
    pub error_reasons: Vec<String>,
}

impl RejectionEntry {
    pub fn new(original_line: String, error_reasons: Vec<String>) -> Self {
        RejectionEntry {
            original_line,
            error_reasons,
        }
    }

    /// Reasons joined the way they are shown and stored.
    pub fn joined_reasons(&self) -> String {
        self.error_reasons.join(REASON_SEPARATOR)
    }

    /// Splits a joined reason string back into its parts.
    pub fn split_reasons(joined: &str) -> Vec<String> {
        joined
            .split(REASON_SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}
