
use crate::{
    Config,
    parser::ParseError,
    spec::{Arity, FlagSpec, FlagTable},
};
use std::{collections::HashSet, io::Write};

fn placeholder(flag: &FlagSpec, config: &Config) -> String {
    match flag.allowed() {
        Some(allowed) => format!("<{}>", allowed.join("|")),
        None => format!(
            "<{}>",
            config.bare(flag.name()).replace('-', "_").to_uppercase()
        ),
    }
}

/// Usage segment for one flag, e.g. `[--build-file <BUILD_FILE>]`
pub fn flag_usage(flag: &FlagSpec, config: &Config) -> String {
    match flag.arity() {
        Arity::Zero => format!("[{}]", flag.name()),
        arity => {
            let value = placeholder(flag, config);
            let values = vec![value; arity.count()];
            format!("[{} {}]", flag.name(), values.join(" "))
        }
    }
}

/// Write one usage segment per reachable flag, in table order
pub fn write_usage(table: &FlagTable, config: &Config, out: &mut dyn Write) -> std::io::Result<()> {
    let mut seen = HashSet::new();
    let segments: Vec<String> = table
        .iter()
        .filter(|flag| seen.insert(flag.name()))
        .map(|flag| flag_usage(flag, config))
        .collect();
    writeln!(out, "Usage: {}", segments.join(" "))
}

/// Explain a parse failure the way a command line tool would before exiting
pub fn report(
    error: &ParseError,
    table: &FlagTable,
    config: &Config,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    writeln!(out, "error: {error}")?;
    match error {
        ParseError::ArgumentNotInAllowedSet { flag, allowed, .. } => {
            writeln!(out, "Possible values for {flag}:")?;
            for value in allowed {
                writeln!(out, "  {value}")?;
            }
            Ok(())
        }
        ParseError::MissingFlagArguments { .. } | ParseError::UnknownFlag(..) => {
            write_usage(table, config, out)
        }
    }
}
