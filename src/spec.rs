
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of value tokens a flag consumes after its own token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "usize", into = "usize")]
pub enum Arity {
    Zero,
    One,
    Fixed(usize),
}

impl Arity {
    pub fn count(self) -> usize {
        match self {
            Arity::Zero => 0,
            Arity::One => 1,
            Arity::Fixed(n) => n,
        }
    }
}

impl From<usize> for Arity {
    fn from(count: usize) -> Self {
        match count {
            0 => Arity::Zero,
            1 => Arity::One,
            n => Arity::Fixed(n),
        }
    }
}

impl From<Arity> for usize {
    fn from(arity: Arity) -> Self {
        arity.count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSpec {
    name: String,
    arity: Arity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    allowed: Option<Vec<String>>,
}

impl FlagSpec {
    fn new(name: impl Into<String>, arity: Arity) -> Self {
        Self {
            name: name.into(),
            arity,
            allowed: None,
        }
    }

    /// Presence flag, e.g. `--help`
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, Arity::Zero)
    }

    pub fn single(name: impl Into<String>) -> Self {
        Self::new(name, Arity::One)
    }

    /// Flag followed by exactly `count` values. Counts below two collapse into
    /// the boolean and single-value shapes.
    pub fn many(name: impl Into<String>, count: usize) -> Self {
        Self::new(name, count.into())
    }

    /// Single-value flag restricted to `allowed`
    pub fn one_of<I, S>(name: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::single(name).allow(allowed)
    }

    /// Restrict every consumed value to `values`. Has no effect on a boolean flag.
    pub fn allow<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.arity != Arity::Zero {
            self.allowed = Some(values.into_iter().map(Into::into).collect());
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn allowed(&self) -> Option<&[String]> {
        self.allowed.as_deref()
    }

    pub fn allows(&self, value: &str) -> bool {
        match &self.allowed {
            Some(allowed) => allowed.iter().any(|a| a == value),
            None => true,
        }
    }
}

/// Ordered flag table. Lookup is first-match, so a repeated name shadows
/// every later entry with the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagTable {
    flags: Vec<FlagSpec>,
}

impl FlagTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, flag: FlagSpec) {
        self.flags.push(flag);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlagSpec> {
        self.flags.iter()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn find(&self, token: &str) -> Option<&FlagSpec> {
        self.flags.iter().find(|flag| flag.name == token)
    }

    /// Entries that can never match because an earlier entry has the same name
    pub fn shadowed(&self) -> impl Iterator<Item = &FlagSpec> {
        let mut seen = HashSet::new();
        self.flags
            .iter()
            .filter(move |flag| !seen.insert(flag.name.as_str()))
    }
}

impl From<Vec<FlagSpec>> for FlagTable {
    fn from(flags: Vec<FlagSpec>) -> Self {
        Self { flags }
    }
}

impl FromIterator<FlagSpec> for FlagTable {
    fn from_iter<T: IntoIterator<Item = FlagSpec>>(iter: T) -> Self {
        Self {
            flags: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FlagTable {
    type Item = &'a FlagSpec;
    type IntoIter = std::slice::Iter<'a, FlagSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
