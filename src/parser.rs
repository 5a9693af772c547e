//! Fixed-width line parser.
//!
//! Any decoding failure is fatal for the batch: a malformed line means the
//! input file must be fixed, unlike rule violations which become rejections.

use crate::decimal::Amount;
use crate::error::{Result, SalesError};
use crate::layout::{self, FieldKind, DATE_FORMAT, LARGE_ACCOUNT_YES, LINE_WIDTH};
use crate::record::SalesRecord;
use chrono::NaiveDate;
use std::str::FromStr;

/// Parses one input line into a `SalesRecord`.
///
/// `line_no` is 1-based and only used for error messages.
pub fn parse_line(line: &str, line_no: usize) -> Result<SalesRecord> {
    let length = line.chars().count();
    let too_short = || SalesError::LineTooShort {
        line: line_no,
        length,
        expected: LINE_WIDTH,
    };
    if length < LINE_WIDTH {
        return Err(too_short());
    }

    let mut date = None;
    let mut seller_code = None;
    let mut amount = None;
    let mut is_large_account_sale = false;

    for field in layout::FIELDS {
        let raw = field.slice(line).ok_or_else(too_short)?;
        let invalid = |message: String| SalesError::InvalidLine {
            line: line_no,
            field: field.name,
            value: raw.to_string(),
            message,
        };

        match field.kind {
            FieldKind::Date => {
                date = Some(parse_date(raw).ok_or_else(|| invalid("expected yyyy-MM-dd".into()))?);
            }
            FieldKind::SellerCode => {
                seller_code = Some(raw.trim().to_string());
            }
            FieldKind::Amount => {
                amount = Some(Amount::from_str(raw).map_err(|e| invalid(e.to_string()))?);
            }
            FieldKind::LargeAccountFlag => {
                is_large_account_sale = raw == LARGE_ACCOUNT_YES;
            }
        }
    }

    match (date, seller_code, amount) {
        (Some(date), Some(seller_code), Some(amount)) => Ok(SalesRecord::new(
            date,
            seller_code,
            amount,
            is_large_account_sale,
        )),
        _ => Err(too_short()),
    }
}

/// Parses the stored reference period.
///
/// Surrounding whitespace is ignored; the date itself must be `yyyy-MM-dd`.
pub fn parse_reference_period(value: &str) -> Result<NaiveDate> {
    parse_date(value.trim()).ok_or_else(|| SalesError::InvalidReferencePeriod(value.to_string()))
}

/// Strict `yyyy-MM-dd` parsing: exactly ten characters, zero-padded.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let well_formed = s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_large_account_sale() {
        let record = parse_line("2024-01-31001  150000.00S", 1).unwrap();
        assert_eq!(record.date, date(2024, 1, 31));
        assert_eq!(record.seller_code, "001");
        assert_eq!(record.amount, Amount::from_str("150000.00").unwrap());
        assert!(record.is_large_account_sale);
    }

    #[test]
    fn test_parse_regular_sale() {
        let record = parse_line("2024-02-01001      50.00N", 1).unwrap();
        assert_eq!(record.date, date(2024, 2, 1));
        assert_eq!(record.amount.to_string(), "50.00");
        assert!(!record.is_large_account_sale);
    }

    #[test]
    fn test_flag_is_true_only_for_s() {
        for flag in ["N", "s", "X", " "] {
            let line = format!("2024-01-31001      50.00{}", flag);
            assert!(!parse_line(&line, 1).unwrap().is_large_account_sale);
        }
    }

    #[test]
    fn test_seller_code_is_trimmed() {
        assert_eq!(parse_line("2024-01-31 7       50.00N", 1).unwrap().seller_code, "7");
        assert_eq!(parse_line("2024-01-31         50.00N", 1).unwrap().seller_code, "");
    }

    #[test]
    fn test_trailing_characters_are_ignored() {
        let record = parse_line("2024-01-31001      50.00N extra", 1).unwrap();
        assert_eq!(record.seller_code, "001");
        assert!(!record.is_large_account_sale);
    }

    #[test]
    fn test_bad_date_is_fatal() {
        let err = parse_line("2024-13-01001      50.00N", 3).unwrap_err();
        match err {
            SalesError::InvalidLine { line, field, value, .. } => {
                assert_eq!(line, 3);
                assert_eq!(field, "date");
                assert_eq!(value, "2024-13-01");
            }
            other => panic!("Expected InvalidLine, got {other:?}"),
        }

        assert!(parse_line("31/01/2024001      50.00N", 1).is_err());
        assert!(parse_line("2024-1-31 001      50.00N", 1).is_err());
    }

    #[test]
    fn test_bad_amount_is_fatal() {
        let err = parse_line("2024-01-31001      5O.00N", 7).unwrap_err();
        assert!(matches!(
            err,
            SalesError::InvalidLine { line: 7, field: "amount", .. }
        ));

        let err = parse_line("2024-01-31001           N", 1).unwrap_err();
        assert!(matches!(err, SalesError::InvalidLine { field: "amount", .. }));
    }

    #[test]
    fn test_every_field_is_decoded() {
        let record = parse_line("2023-12-05AB   1234.5678S", 1).unwrap();
        assert_eq!(
            record,
            SalesRecord::new(
                date(2023, 12, 5),
                "AB",
                Amount::from_str("1234.5678").unwrap(),
                true,
            )
        );
    }

    #[test]
    fn test_short_line_is_fatal() {
        let err = parse_line("2024-01-31001      50.00", 2).unwrap_err();
        assert!(matches!(
            err,
            SalesError::LineTooShort { line: 2, length: 24, expected: 25 }
        ));
    }

    #[test]
    fn test_reference_period() {
        assert_eq!(parse_reference_period("2024-01-31").unwrap(), date(2024, 1, 31));
        assert_eq!(parse_reference_period(" 2024-01-31\n").unwrap(), date(2024, 1, 31));
        assert!(matches!(
            parse_reference_period("31-01-2024"),
            Err(SalesError::InvalidReferencePeriod(_))
        ));
        assert!(parse_reference_period("").is_err());
        assert!(parse_reference_period("2024-02-30").is_err());
    }
}
