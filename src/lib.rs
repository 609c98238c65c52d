mod config;
pub mod parser;
pub mod spec;
mod trace;
pub mod usage;

pub use config::Config;
pub use parser::{
    ErrorKind, FlagValue, ParseError, ParsedResult, parse, parse_with, split_passthrough,
};
pub use spec::{Arity, FlagSpec, FlagTable};

use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not read input")]
    Io(#[from] std::io::Error),
    #[error("Could not load flag table")]
    Table(#[from] serde_json::Error),
    #[error("Could not parse arguments")]
    Parse(#[from] ParseError),
}

/// Write `error` and its chain of sources to `out`
pub fn print_error(mut error: &dyn std::error::Error, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "\x1b[93m{error}\x1b[0m")?;
    while let Some(source) = error.source() {
        writeln!(out, "Caused by: \x1b[35m{source}\x1b[0m")?;
        error = source;
    }
    Ok(())
}
