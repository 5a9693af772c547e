//! Monthly sales batch CLI
//!
//! Validates a fixed-width sales file against the reference period kept in
//! the store, persists accepted and rejected rows, then prints the report.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- data.txt store/ > report.txt
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity

use sales_batch::{ingest, Config, CsvStore, Result, SalesReport, SalesStore};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::from_args(env::args_os().skip(1))?;

    let file = File::open(&config.input_path)?;
    let reader = BufReader::new(file);

    // ingest session
    {
        let mut store = CsvStore::open(&config.store_dir)?;
        ingest(&mut store, reader)?;
    }

    // report session
    let store = CsvStore::open(&config.store_dir)?;
    let accepted = store.read_accepted_records()?;
    let rejections = store.read_rejection_entries()?;
    let report = SalesReport::build(&accepted, rejections);

    let stdout = io::stdout();
    let handle = stdout.lock();
    report.write_to(handle)?;

    Ok(())
}
