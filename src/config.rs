//! Command line configuration.

use crate::error::{Result, SalesError};
use std::path::PathBuf;

/// Locations the CLI works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Fixed-width batch file
    pub input_path: PathBuf,

    /// Directory of the file-backed store
    pub store_dir: PathBuf,
}

impl Config {
    /// Builds the configuration from positional arguments, program name
    /// excluded.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<PathBuf>,
    {
        let mut args = args.into_iter();
        let input_path = args.next().ok_or(SalesError::MissingArgument("input file"))?;
        let store_dir = args.next().ok_or(SalesError::MissingArgument("store directory"))?;

        Ok(Config {
            input_path: input_path.into(),
            store_dir: store_dir.into(),
        })
    }
}
