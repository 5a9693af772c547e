//! Routes validated records to the accepted or rejected collection.

use crate::layout::{self, DATE_FORMAT, LARGE_ACCOUNT_NO, LARGE_ACCOUNT_YES};
use crate::record::{RejectionEntry, SalesRecord};
use crate::validator::Violation;

/// Outcome of classifying one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Accepted(SalesRecord),
    Rejected(RejectionEntry),
}

/// Accepts the record if it has no violations, otherwise builds its
/// rejection entry.
pub fn classify(record: SalesRecord, violations: &[Violation]) -> Classification {
    if violations.is_empty() {
        return Classification::Accepted(record);
    }

    let reasons = violations.iter().map(|v| v.reason().to_string()).collect();
    Classification::Rejected(RejectionEntry::new(reconstruct_line(&record), reasons))
}

/// Rebuilds the line of a record from its fields.
///
/// The seller code is written as stored, without padding. The amount is
/// rounded to two decimals and right-aligned in its column, so the result may
/// differ from the raw input line in padding and precision.
pub fn reconstruct_line(record: &SalesRecord) -> String {
    let flag = if record.is_large_account_sale {
        LARGE_ACCOUNT_YES
    } else {
        LARGE_ACCOUNT_NO
    };

    format!(
        "{date}{seller}{amount:>amount_width$}{flag}",
        date = record.date.format(DATE_FORMAT),
        seller = record.seller_code,
        amount = record.amount,
        amount_width = layout::AMOUNT.len,
    )
}
