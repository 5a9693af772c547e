//! Report views over accepted sales.
//!
//! All views are pure functions of the accepted records. Sellers are listed
//! in ascending seller code order for reproducible output.

use crate::decimal::Amount;
use crate::error::Result;
use crate::record::{RejectionEntry, SalesRecord};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

/// Monthly total that separates the two seller views.
pub const SALES_THRESHOLD: i64 = 100_000;

/// Total sales of one seller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerTotal {
    pub seller_code: String,
    pub total: Amount,
}

/// Sums amounts per seller code.
pub fn seller_totals(records: &[SalesRecord]) -> Vec<SellerTotal> {
    let mut totals: BTreeMap<&str, Amount> = BTreeMap::new();
    for record in records {
        *totals.entry(record.seller_code.as_str()).or_default() += record.amount;
    }

    totals
        .into_iter()
        .map(|(seller_code, total)| SellerTotal {
            seller_code: seller_code.to_string(),
            total,
        })
        .collect()
}

/// Sellers whose total is strictly above the threshold.
pub fn sellers_above_threshold(records: &[SalesRecord]) -> Vec<SellerTotal> {
    let threshold = Amount::from_units(SALES_THRESHOLD);
    seller_totals(records)
        .into_iter()
        .filter(|s| s.total > threshold)
        .collect()
}

/// Sellers whose total is at or below the threshold.
pub fn sellers_at_or_below_threshold(records: &[SalesRecord]) -> Vec<SellerTotal> {
    let threshold = Amount::from_units(SALES_THRESHOLD);
    seller_totals(records)
        .into_iter()
        .filter(|s| s.total <= threshold)
        .collect()
}

/// Distinct sellers with at least one large-account sale.
pub fn large_account_sellers(records: &[SalesRecord]) -> Vec<String> {
    records
        .iter()
        .filter(|r| r.is_large_account_sale)
        .map(|r| r.seller_code.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// The complete monthly report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesReport {
    pub above_threshold: Vec<SellerTotal>,
    pub at_or_below_threshold: Vec<SellerTotal>,
    pub large_account_sellers: Vec<String>,
    pub rejections: Vec<RejectionEntry>,
}

impl SalesReport {
    pub fn build(accepted: &[SalesRecord], rejections: Vec<RejectionEntry>) -> Self {
        SalesReport {
            above_threshold: sellers_above_threshold(accepted),
            at_or_below_threshold: sellers_at_or_below_threshold(accepted),
            large_account_sellers: large_account_sellers(accepted),
            rejections,
        }
    }

    /// Writes the report, one line per item under each section header.
    ///
    /// Totals are printed unrounded so they match the summed amounts.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "Vendedores que superaron {}:", SALES_THRESHOLD)?;
        for seller in &self.above_threshold {
            writeln!(
                writer,
                "El vendedor {} vendió {}",
                seller.seller_code,
                seller.total.exact()
            )?;
        }

        writeln!(writer, "Vendedores que no superaron {}:", SALES_THRESHOLD)?;
        for seller in &self.at_or_below_threshold {
            writeln!(
                writer,
                "El vendedor {} vendió {}",
                seller.seller_code,
                seller.total.exact()
            )?;
        }

        writeln!(writer, "Vendedores con ventas a empresas grandes:")?;
        for seller in &self.large_account_sellers {
            writeln!(writer, "El vendedor {}", seller)?;
        }

        writeln!(writer, "Rechazos:")?;
        for rejection in &self.rejections {
            writeln!(
                writer,
                "Rechazo: {} - Error: {}",
                rejection.original_line,
                rejection.joined_reasons()
            )?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn sale(seller: &str, amount: &str, large: bool) -> SalesRecord {
        SalesRecord::new(
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            seller,
            Amount::from_str(amount).unwrap(),
            large,
        )
    }

    fn sample() -> Vec<SalesRecord> {
        vec![
            sale("002", "60000.00", false),
            sale("001", "150000.00", true),
            sale("002", "40000.00", true),
            sale("003", "99999.99", false),
            sale("003", "0.02", false),
            sale("002", "0.00", true),
        ]
    }

    fn codes(totals: &[SellerTotal]) -> Vec<&str> {
        totals.iter().map(|s| s.seller_code.as_str()).collect()
    }

    #[test]
    fn test_seller_totals_group_and_sum() {
        let totals = seller_totals(&sample());
        assert_eq!(codes(&totals), vec!["001", "002", "003"]);
        assert_eq!(totals[1].total, Amount::from_str("100000.00").unwrap());
        assert_eq!(totals[2].total, Amount::from_str("100000.01").unwrap());
    }

    #[test]
    fn test_threshold_views() {
        let records = sample();
        assert_eq!(codes(&sellers_above_threshold(&records)), vec!["001", "003"]);
        // exactly 100000 is not above
        assert_eq!(codes(&sellers_at_or_below_threshold(&records)), vec!["002"]);
    }

    #[test]
    fn test_threshold_views_partition_sellers() {
        let records = sample();
        let above = sellers_above_threshold(&records);
        let below = sellers_at_or_below_threshold(&records);
        let all = seller_totals(&records);

        assert_eq!(above.len() + below.len(), all.len());
        for seller in &all {
            let hits = above
                .iter()
                .chain(below.iter())
                .filter(|s| *s == seller)
                .count();
            assert_eq!(hits, 1, "seller {} must appear exactly once", seller.seller_code);
        }
    }

    #[test]
    fn test_large_account_sellers_are_distinct() {
        assert_eq!(large_account_sellers(&sample()), vec!["001", "002"]);
        assert!(large_account_sellers(&[sale("004", "1", false)]).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let report = SalesReport::build(&[], Vec::new());
        assert!(report.above_threshold.is_empty());
        assert!(report.at_or_below_threshold.is_empty());
        assert!(report.large_account_sellers.is_empty());
    }

    #[test]
    fn test_write_to_prints_unrounded_totals() {
        let report = SalesReport::build(
            &[sale("001", "100000.004", false), sale("002", "99999.995", false)],
            Vec::new(),
        );
        assert_eq!(codes(&report.above_threshold), vec!["001"]);
        assert_eq!(codes(&report.at_or_below_threshold), vec!["002"]);

        let mut output = Vec::new();
        report.write_to(&mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("El vendedor 001 vendió 100000.004\n"));
        assert!(output.contains("El vendedor 002 vendió 99999.995\n"));
        assert!(!output.contains("100000.00\n"));
    }

    #[test]
    fn test_write_to_renders_sections() {
        let rejection = RejectionEntry::new(
            "2024-02-01001      50.00N".to_string(),
            vec!["Fecha del informe incorrecta".to_string()],
        );
        let report = SalesReport::build(&[sale("001", "150000", true)], vec![rejection]);

        let mut output = Vec::new();
        report.write_to(&mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert_eq!(
            output,
            "Vendedores que superaron 100000:\n\
             El vendedor 001 vendió 150000.00\n\
             Vendedores que no superaron 100000:\n\
             Vendedores con ventas a empresas grandes:\n\
             El vendedor 001\n\
             Rechazos:\n\
             Rechazo: 2024-02-01001      50.00N - Error: Fecha del informe incorrecta\n"
        );
    }
}
