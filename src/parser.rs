
use crate::{
    Config,
    spec::{Arity, FlagTable},
    trace::traceln,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt::Display};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown flag `{0}`")]
    UnknownFlag(String),
    #[error("Flag `{flag}` requires {expected} argument(s), but only {found} remain")]
    MissingFlagArguments {
        flag: String,
        expected: usize,
        found: usize,
    },
    #[error("Flag `{flag}` does not accept {value:?}, expected one of: {}", .allowed.join(", "))]
    ArgumentNotInAllowedSet {
        flag: String,
        value: String,
        allowed: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    UnknownFlag,
    MissingFlagArguments,
    ArgumentNotInAllowedSet,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::UnknownFlag(..) => ErrorKind::UnknownFlag,
            ParseError::MissingFlagArguments { .. } => ErrorKind::MissingFlagArguments,
            ParseError::ArgumentNotInAllowedSet { .. } => ErrorKind::ArgumentNotInAllowedSet,
        }
    }

    /// The flag token the error is about
    pub fn flag(&self) -> &str {
        match self {
            ParseError::UnknownFlag(flag)
            | ParseError::MissingFlagArguments { flag, .. }
            | ParseError::ArgumentNotInAllowedSet { flag, .. } => flag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagValue {
    Absent,
    Present,
    Single(String),
    Many(Vec<String>),
}

static ABSENT: FlagValue = FlagValue::Absent;

impl FlagValue {
    /// Build the value for a flag occurrence. `values` must hold exactly
    /// `arity.count()` tokens.
    pub(crate) fn resolve(arity: Arity, mut values: Vec<String>) -> Self {
        debug_assert_eq!(values.len(), arity.count());
        match Arity::from(arity.count()) {
            Arity::Zero => FlagValue::Present,
            Arity::One => FlagValue::Single(values.swap_remove(0)),
            Arity::Fixed(..) => FlagValue::Many(values),
        }
    }
}

impl Display for FlagValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlagValue::Absent => write!(f, "absent"),
            FlagValue::Present => write!(f, "present"),
            FlagValue::Single(value) => write!(f, "{value:?}"),
            FlagValue::Many(values) => match values.as_slice() {
                [] => write!(f, "[]"),
                [v0, rest @ ..] => {
                    write!(f, "[{v0:?}")?;
                    for v in rest {
                        write!(f, ", {v:?}")?;
                    }
                    write!(f, "]")
                }
            },
        }
    }
}

/// Flags encountered in one argument vector, keyed by their table name,
/// plus the positionals in order.
///
/// Queries also accept the bare name (`build-file` for `--build-file`) as
/// long as exactly one table name reduces to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedResult {
    flags: BTreeMap<String, FlagValue>,
    positionals: Vec<String>,
    /// Bare name to table name, `None` when several table names share it
    #[serde(skip)]
    aliases: BTreeMap<String, Option<String>>,
}

impl ParsedResult {
    fn new(table: &FlagTable, config: &Config) -> Self {
        let mut aliases = BTreeMap::new();
        for flag in table {
            let bare = config.bare(flag.name());
            if bare == flag.name() {
                continue;
            }
            aliases
                .entry(bare.to_owned())
                .and_modify(|alias: &mut Option<String>| {
                    if alias.as_deref() != Some(flag.name()) {
                        *alias = None;
                    }
                })
                .or_insert_with(|| Some(flag.name().to_owned()));
        }

        Self {
            flags: BTreeMap::new(),
            positionals: Vec::new(),
            aliases,
        }
    }

    fn key<'a>(&'a self, name: &'a str) -> &'a str {
        if self.flags.contains_key(name) {
            return name;
        }
        match self.aliases.get(name) {
            Some(Some(full)) => full.as_str(),
            Some(None) => panic!("Flag name `{name}` is ambiguous in this flag table"),
            None => name,
        }
    }

    /// Resolved value of `name`, `FlagValue::Absent` if it wasn't given
    pub fn value(&self, name: &str) -> &FlagValue {
        self.flags.get(self.key(name)).unwrap_or(&ABSENT)
    }

    pub fn present(&self, name: &str) -> bool {
        self.flags.contains_key(self.key(name))
    }

    /// Value of a single-value flag.
    ///
    /// Panics if `name` resolved to a different shape, which means the query
    /// doesn't agree with the flag table.
    pub fn single(&self, name: &str) -> Option<&str> {
        match self.value(name) {
            FlagValue::Absent => None,
            FlagValue::Single(value) => Some(value.as_str()),
            other @ (FlagValue::Present | FlagValue::Many(..)) => {
                panic!("Flag `{name}` queried as a single value but resolved to {other:?}")
            }
        }
    }

    /// Values of a fixed-count flag. Panics on a shape mismatch like [`Self::single`].
    pub fn many(&self, name: &str) -> Option<&[String]> {
        match self.value(name) {
            FlagValue::Absent => None,
            FlagValue::Many(values) => Some(values.as_slice()),
            other @ (FlagValue::Present | FlagValue::Single(..)) => {
                panic!("Flag `{name}` queried as multiple values but resolved to {other:?}")
            }
        }
    }

    pub fn flags(&self) -> &BTreeMap<String, FlagValue> {
        &self.flags
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub fn into_positionals(self) -> Vec<String> {
        self.positionals
    }
}

/// Split `args` at the first `separator` token. The separator itself is
/// dropped and the tail is empty when there is none.
pub fn split_passthrough<'a, S: AsRef<str>>(args: &'a [S], separator: &str) -> (&'a [S], &'a [S]) {
    match args.iter().position(|arg| arg.as_ref() == separator) {
        Some(at) => (&args[..at], &args[at + 1..]),
        None => (args, &[]),
    }
}

pub fn parse<S: AsRef<str>>(table: &FlagTable, args: &[S]) -> Result<ParsedResult, ParseError> {
    parse_with(table, args, &Config::default())
}

pub fn parse_with<S: AsRef<str>>(
    table: &FlagTable,
    args: &[S],
    config: &Config,
) -> Result<ParsedResult, ParseError> {
    let mut result = ParsedResult::new(table, config);
    let mut at: usize = 0;

    traceln!(
        config,
        "Parsing {} argument(s) against {} flag(s)",
        args.len(),
        table.len()
    );

    while let Some(token) = args.get(at).map(AsRef::as_ref) {
        if !config.is_flag(token) {
            traceln!(config, "  positional {token:?}");
            result.positionals.push(token.to_owned());
            at += 1;
            continue;
        }

        let Some(spec) = table.find(token) else {
            return Err(ParseError::UnknownFlag(token.to_owned()));
        };

        let count = spec.arity().count();
        let remaining = args.len() - at - 1;
        if remaining < count {
            return Err(ParseError::MissingFlagArguments {
                flag: token.to_owned(),
                expected: count,
                found: remaining,
            });
        }

        let values: Vec<String> = args[at + 1..][..count]
            .iter()
            .map(|v| v.as_ref().to_owned())
            .collect();
        if let Some(value) = values.iter().find(|v| !spec.allows(v)) {
            return Err(ParseError::ArgumentNotInAllowedSet {
                flag: token.to_owned(),
                value: value.clone(),
                allowed: spec.allowed().map(<[String]>::to_vec).unwrap_or_default(),
            });
        }

        let value = FlagValue::resolve(spec.arity(), values);
        traceln!(config, "  flag {token} = {value}");

        // Repeated flags overwrite earlier occurrences
        result.flags.insert(spec.name().to_owned(), value);
        at += count + 1;
    }

    Ok(result)
}
