//! Business rules applied to parsed sales records.

use crate::record::SalesRecord;
use chrono::NaiveDate;
use std::fmt;

/// A business-rule violation. Violations never abort a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Seller code is blank
    MissingSellerCode,

    /// Record date differs from the reference period
    WrongReportDate,
}

impl Violation {
    /// Human-readable reason stored with the rejection.
    pub fn reason(&self) -> &'static str {
        match self {
            Violation::MissingSellerCode => "Código de vendedor faltante",
            Violation::WrongReportDate => "Fecha del informe incorrecta",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Checks a record against the reference period.
///
/// Every rule runs; the result lists violations in rule order and is empty
/// for a valid record.
pub fn validate(record: &SalesRecord, reference_period: NaiveDate) -> Vec<Violation> {
    let mut violations = Vec::new();

    if record.seller_code.trim().is_empty() {
        violations.push(Violation::MissingSellerCode);
    }

    if record.date != reference_period {
        violations.push(Violation::WrongReportDate);
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Amount;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    fn record(date: NaiveDate, seller: &str) -> SalesRecord {
        SalesRecord::new(date, seller, Amount::from_units(50), false)
    }

    #[test]
    fn test_valid_record_has_no_violations() {
        assert!(validate(&record(reference(), "001"), reference()).is_empty());
    }

    #[test]
    fn test_missing_seller_code() {
        assert_eq!(
            validate(&record(reference(), ""), reference()),
            vec![Violation::MissingSellerCode]
        );
        assert_eq!(
            validate(&record(reference(), "   "), reference()),
            vec![Violation::MissingSellerCode]
        );
    }

    #[test]
    fn test_wrong_date_is_exact_comparison() {
        let next_day = reference().succ_opt().unwrap();
        let previous_day = reference().pred_opt().unwrap();
        assert_eq!(
            validate(&record(next_day, "001"), reference()),
            vec![Violation::WrongReportDate]
        );
        assert_eq!(
            validate(&record(previous_day, "001"), reference()),
            vec![Violation::WrongReportDate]
        );
    }

    #[test]
    fn test_rules_do_not_short_circuit() {
        let next_day = reference().succ_opt().unwrap();
        assert_eq!(
            validate(&record(next_day, ""), reference()),
            vec![Violation::MissingSellerCode, Violation::WrongReportDate]
        );
    }

    #[test]
    fn test_reason_text() {
        assert_eq!(
            Violation::MissingSellerCode.to_string(),
            "Código de vendedor faltante"
        );
        assert_eq!(
            Violation::WrongReportDate.to_string(),
            "Fecha del informe incorrecta"
        );
    }
}
