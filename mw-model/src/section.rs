use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// One of the six ordered sections of a document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Public,
    Protected,
    InitialEquation,
    InitialAlgorithm,
    Equation,
    Algorithm,
}

impl Section {
    /// All sections in rendering order.
    pub const ALL: [Section; 6] = [
        Section::Public,
        Section::Protected,
        Section::InitialEquation,
        Section::InitialAlgorithm,
        Section::Equation,
        Section::Algorithm,
    ];

    /// The keyword introducing the section. `public` is implicit in output.
    pub fn keyword(self) -> &'static str {
        match self {
            Section::Public => "public",
            Section::Protected => "protected",
            Section::InitialEquation => "initial equation",
            Section::InitialAlgorithm => "initial algorithm",
            Section::Equation => "equation",
            Section::Algorithm => "algorithm",
        }
    }

    /// Sections holding declarations, imports and extends clauses.
    pub fn is_declarative(self) -> bool {
        matches!(self, Section::Public | Section::Protected)
    }

    /// Sections holding equations and connections.
    pub fn is_equation(self) -> bool {
        matches!(self, Section::Equation | Section::InitialEquation)
    }

    /// Sections holding algorithm statements.
    pub fn is_algorithm(self) -> bool {
        matches!(self, Section::Algorithm | Section::InitialAlgorithm)
    }

    /// The equation section, or the initial one.
    pub fn equation(initial: bool) -> Self {
        if initial {
            Section::InitialEquation
        } else {
            Section::Equation
        }
    }

    /// The algorithm section, or the initial one.
    pub fn algorithm(initial: bool) -> Self {
        if initial {
            Section::InitialAlgorithm
        } else {
            Section::Algorithm
        }
    }
}

impl FromStr for Section {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.keyword() == s)
            .ok_or_else(|| Error::unknown_section(s))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
