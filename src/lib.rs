//! # Sales Batch
//!
//! Validates a batch of fixed-width monthly sales records, splits them into
//! accepted and rejected sets, persists both and reports per-seller totals.
//!
//! ## Design Principles
//!
//! - **Fail-fast parsing**: a malformed line aborts the batch before anything
//!   is stored
//! - **Accumulated violations**: every business rule runs, each failing rule
//!   adds one reason to the record's rejection entry
//! - **Single commit**: a batch is persisted in one bulk write
//! - **Exact amounts**: `rust_decimal` sums, two decimals on display
//!
//! ## Example
//!
//! ```
//! use sales_batch::{ingest, MemoryStore, SalesReport, SalesStore};
//! use std::io::Cursor;
//!
//! let mut store = MemoryStore::with_reference_period("2024-01-31");
//! let input = "2024-01-31001  150000.00S\n2024-02-01001      50.00N\n";
//! ingest(&mut store, Cursor::new(input)).unwrap();
//!
//! let accepted = store.read_accepted_records().unwrap();
//! let report = SalesReport::build(&accepted, store.read_rejection_entries().unwrap());
//! assert_eq!(report.above_threshold[0].seller_code, "001");
//! assert_eq!(report.rejections.len(), 1);
//! ```

pub mod batch;
pub mod classifier;
pub mod config;
pub mod decimal;
pub mod error;
pub mod layout;
pub mod parser;
pub mod record;
pub mod report;
pub mod store;
pub mod validator;

pub use batch::{ingest, process_lines, read_lines, Batch, BatchSummary};
pub use classifier::{classify, reconstruct_line, Classification};
pub use config::Config;
pub use decimal::{Amount, ExactAmount};
pub use error::{Result, SalesError};
pub use parser::{parse_line, parse_reference_period};
pub use record::{RejectionEntry, SalesRecord};
pub use report::{
    large_account_sellers, seller_totals, sellers_above_threshold, sellers_at_or_below_threshold,
    SalesReport, SellerTotal, SALES_THRESHOLD,
};
pub use store::{CsvStore, MemoryStore, SalesStore};
pub use validator::{validate, Violation};
