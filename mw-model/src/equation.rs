//! Equations, algorithm assignments, connections and inheritance clauses.

use serde::Serialize;

use crate::value::{Annotation, Modification};

/// Opaque expression text, written verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Expression(pub String);

impl Expression {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Expression {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Expression {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Raw algorithm statement text, written verbatim and terminated with `;`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Statement(pub String);

impl Statement {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Statement {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// `left = right`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Equation {
    pub left: Expression,
    pub right: Expression,
    pub description: Option<String>,
    pub annotation: Annotation,
}

impl Equation {
    pub fn new(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            description: None,
            annotation: Annotation::new(),
        }
    }
}

/// `left := right`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Algorithm {
    pub left: Expression,
    pub right: Expression,
    pub description: Option<String>,
    pub annotation: Annotation,
}

impl Algorithm {
    pub fn new(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            description: None,
            annotation: Annotation::new(),
        }
    }
}

/// `connect(a, b)`. References are stored verbatim and never resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connect {
    pub a: String,
    pub b: String,
    pub description: Option<String>,
    pub annotation: Annotation,
}

impl Connect {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            description: None,
            annotation: Annotation::new(),
        }
    }

    /// The owner part of both references, i.e. everything before the last `.`.
    pub fn owners(&self) -> (&str, &str) {
        (owner(&self.a), owner(&self.b))
    }
}

fn owner(reference: &str) -> &str {
    reference
        .rsplit_once('.')
        .map_or(reference, |(owner, _)| owner)
}

/// `extends Base(k=1);`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extends {
    pub name: String,
    pub modifications: Modification,
}

impl Extends {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifications: Modification::new(),
        }
    }

    pub fn with_modifications(mut self, modifications: Modification) -> Self {
        self.modifications = modifications;
        self
    }
}

/// Options shared by [`Document::add_equation`](crate::Document::add_equation)
/// and [`Document::add_algorithm`](crate::Document::add_algorithm).
#[derive(Debug, Clone, Default)]
pub struct EquationOptions {
    pub initial: bool,
    pub description: Option<String>,
    pub annotation: Annotation,
}

impl EquationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target the initial section.
    pub fn initial(mut self) -> Self {
        self.initial = true;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.annotation = annotation;
        self
    }
}
