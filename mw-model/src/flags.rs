//! Named flag sets for documents, declarations and assignments.
//!
//! Each node kind accepts a small, closed set of keyword flags. A [`FlagSet`]
//! stores them without any ordering; the canonical keyword order lives in
//! [`Flag::ALL`] and is what the renderer walks.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// A keyword flag belonging to one node kind.
pub trait Flag: Copy + Eq + fmt::Debug + Serialize + 'static {
    /// Every flag of this kind, in canonical rendering order.
    const ALL: &'static [Self];

    /// Node kind name used in error messages.
    const CONTEXT: &'static str;

    /// The source keyword for this flag.
    fn keyword(self) -> &'static str;

    /// Look up a flag by its keyword.
    fn from_keyword(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.keyword() == s)
    }
}

macro_rules! flag_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $context:literal {
            $($(#[$vmeta:meta])* $variant:ident => $kw:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl Flag for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];
            const CONTEXT: &'static str = $context;

            fn keyword(self) -> &'static str {
                match self {
                    $(Self::$variant => $kw),+
                }
            }
        }

        impl FromStr for $name {
            type Err = Box<Error>;

            fn from_str(s: &str) -> Result<Self> {
                Self::from_keyword(s).ok_or_else(|| {
                    let valid: Vec<&'static str> = Self::ALL.iter().map(|f| f.keyword()).collect();
                    Error::unknown_flag(s, $context, &valid)
                })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.keyword())
            }
        }
    };
}

flag_enum! {
    /// Flags of a model document, rendered before the `model` keyword.
    DocumentFlag, "document" {
        Final => "final",
        Encapsulated => "encapsulated",
        Partial => "partial",
        Replaceable => "replaceable",
    }
}

flag_enum! {
    /// Flags of a declaration.
    DeclarationFlag, "declaration" {
        Final => "final",
        Inner => "inner",
        Outer => "outer",
        Replaceable => "replaceable",
    }
}

flag_enum! {
    /// Flags of an [`Assign`](crate::Assign) modification.
    AssignFlag, "assignment" {
        Redeclare => "redeclare",
        Each => "each",
        Final => "final",
        Replaceable => "replaceable",
    }
}

impl DeclarationFlag {
    /// Flags emitted in a declaration line.
    ///
    /// `replaceable` is accepted and stored but not written at this site.
    pub const RENDERED: &'static [Self] = &[Self::Final, Self::Inner, Self::Outer];
}

/// An unordered set of flags of one kind.
///
/// Equality and serialization follow the canonical order, never the order of
/// insertion.
#[derive(Debug, Clone)]
pub struct FlagSet<F: Flag> {
    flags: Vec<F>,
}

impl<F: Flag> FlagSet<F> {
    /// Create an empty flag set.
    pub fn new() -> Self {
        Self { flags: Vec::new() }
    }

    /// Parse a whitespace separated list of keywords, e.g. `"final inner"`.
    pub fn parse(keywords: &str) -> Result<Self> {
        let mut set = Self::new();
        for word in keywords.split_whitespace() {
            let flag = F::from_keyword(word).ok_or_else(|| {
                let valid: Vec<&'static str> = F::ALL.iter().map(|f| f.keyword()).collect();
                Error::unknown_flag(word, F::CONTEXT, &valid)
            })?;
            set.insert(flag);
        }
        Ok(set)
    }

    /// Add a flag. Adding a flag twice has no effect.
    pub fn insert(&mut self, flag: F) {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, flag: F) -> Self {
        self.insert(flag);
        self
    }

    /// Check whether a flag is set.
    pub fn contains(&self, flag: F) -> bool {
        self.flags.contains(&flag)
    }

    /// Check if no flag is set.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Iterate the set flags in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = F> + '_ {
        self.iter_among(F::ALL)
    }

    /// Iterate the set flags that appear in `order`, following `order`.
    pub fn iter_among<'a>(&'a self, order: &'a [F]) -> impl Iterator<Item = F> + 'a {
        order.iter().copied().filter(|f| self.contains(*f))
    }
}

impl<F: Flag> PartialEq for FlagSet<F> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<F: Flag> Eq for FlagSet<F> {}

impl<F: Flag> Serialize for FlagSet<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<F: Flag> Default for FlagSet<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Flag> FromIterator<F> for FlagSet<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        let mut set = Self::new();
        for flag in iter {
            set.insert(flag);
        }
        set
    }
}

impl<F: Flag> From<F> for FlagSet<F> {
    fn from(flag: F) -> Self {
        Self::new().with(flag)
    }
}
