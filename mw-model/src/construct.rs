//! Conditional and loop constructs.
//!
//! Constructs are assembled with [`ConstructBuilder`], a small state machine
//! that fixes the [`BodyKind`] from the first clause it receives and checks
//! every later clause against it.
//!
//! ```
//! use modelwright_model::{ConstructBuilder, Equation};
//!
//! let construct = ConstructBuilder::if_("x > 0")
//!     .then([Equation::new("y", "x")])
//!     .unwrap()
//!     .orelse([Equation::new("y", "-x")])
//!     .unwrap()
//!     .end()
//!     .unwrap();
//! assert_eq!(construct.branches().len(), 0);
//! assert!(construct.orelse().is_some());
//! ```

use std::fmt;

use serde::Serialize;

use crate::equation::{Algorithm, Connect, Equation, Expression, Statement};
use crate::error::{Error, Result};

/// Which construct a [`Construct`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstructKind {
    If,
    When,
    For,
    While,
}

impl ConstructKind {
    /// The keyword opening and closing the construct.
    pub fn keyword(self) -> &'static str {
        match self {
            ConstructKind::If => "if",
            ConstructKind::When => "when",
            ConstructKind::For => "for",
            ConstructKind::While => "while",
        }
    }

    /// The keyword introducing extra test branches, if the construct has any.
    pub fn branch_keyword(self) -> Option<&'static str> {
        match self {
            ConstructKind::If => Some("elseif"),
            ConstructKind::When => Some("elsewhen"),
            ConstructKind::For | ConstructKind::While => None,
        }
    }

    fn is_conditional(self) -> bool {
        matches!(self, ConstructKind::If | ConstructKind::When)
    }
}

impl fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The kind of clauses a construct body holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Equation,
    Statement,
    Expression,
}

impl BodyKind {
    pub fn name(self) -> &'static str {
        match self {
            BodyKind::Equation => "equation",
            BodyKind::Statement => "statement",
            BodyKind::Expression => "expression",
        }
    }
}

/// A loop index: `i in 1:n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForIndex {
    pub ident: String,
    pub range: Expression,
}

impl ForIndex {
    pub fn new(ident: impl Into<String>, range: impl Into<Expression>) -> Self {
        Self {
            ident: ident.into(),
            range: range.into(),
        }
    }
}

/// One element of a construct body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Clause {
    Equation(Equation),
    Connect(Connect),
    Statement(Statement),
    Algorithm(Algorithm),
    Expression(Expression),
    Construct(Box<Construct>),
}

impl Clause {
    /// The body kind this clause belongs to.
    pub fn kind(&self) -> BodyKind {
        match self {
            Clause::Equation(_) | Clause::Connect(_) => BodyKind::Equation,
            Clause::Statement(_) | Clause::Algorithm(_) => BodyKind::Statement,
            Clause::Expression(_) => BodyKind::Expression,
            Clause::Construct(c) => c.body_kind,
        }
    }
}

impl From<Equation> for Clause {
    fn from(e: Equation) -> Self {
        Clause::Equation(e)
    }
}

impl From<Connect> for Clause {
    fn from(c: Connect) -> Self {
        Clause::Connect(c)
    }
}

impl From<Statement> for Clause {
    fn from(s: Statement) -> Self {
        Clause::Statement(s)
    }
}

impl From<Algorithm> for Clause {
    fn from(a: Algorithm) -> Self {
        Clause::Algorithm(a)
    }
}

impl From<Expression> for Clause {
    fn from(e: Expression) -> Self {
        Clause::Expression(e)
    }
}

impl From<Construct> for Clause {
    fn from(c: Construct) -> Self {
        Clause::Construct(Box::new(c))
    }
}

/// A test and the clauses guarded by it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Branch {
    pub test: Expression,
    pub body: Vec<Clause>,
}

/// A finished if, when, for or while construct.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Construct {
    kind: ConstructKind,
    body_kind: BodyKind,
    test: Option<Expression>,
    indices: Vec<ForIndex>,
    body: Vec<Clause>,
    branches: Vec<Branch>,
    orelse: Option<Vec<Clause>>,
}

impl Construct {
    pub fn kind(&self) -> ConstructKind {
        self.kind
    }

    pub fn body_kind(&self) -> BodyKind {
        self.body_kind
    }

    /// The test of `if`, `when` and `while` constructs.
    pub fn test(&self) -> Option<&Expression> {
        self.test.as_ref()
    }

    /// The indices of a `for` construct.
    pub fn indices(&self) -> &[ForIndex] {
        &self.indices
    }

    pub fn body(&self) -> &[Clause] {
        &self.body
    }

    /// `elseif` / `elsewhen` branches in order.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn orelse(&self) -> Option<&[Clause]> {
        self.orelse.as_deref()
    }

    /// Flatten an expression-kind `if` into a single expression:
    /// `if a then b elseif c then d else e`.
    pub fn inline(&self) -> Result<Expression> {
        if self.body_kind != BodyKind::Expression {
            return Err(Error::invariant(format!(
                "only expression constructs can be inlined, this one holds {} clauses",
                self.body_kind.name()
            )));
        }
        let (Some(test), Some(orelse)) = (&self.test, &self.orelse) else {
            return Err(Error::invariant("if-expression requires a test and an else branch"));
        };

        let mut out = format!("if {} then {}", test.as_str(), single_expression(&self.body)?);
        for branch in &self.branches {
            out.push_str(&format!(
                " elseif {} then {}",
                branch.test.as_str(),
                single_expression(&branch.body)?
            ));
        }
        out.push_str(&format!(" else {}", single_expression(orelse)?));
        Ok(Expression(out))
    }
}

fn single_expression(body: &[Clause]) -> Result<&str> {
    match body {
        [Clause::Expression(e)] => Ok(e.as_str()),
        _ => Err(Error::invalid_arity(
            "if-expression branch",
            "exactly one expression",
            body.len(),
        )),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Body,
    Branch,
    Else,
}

/// Staged builder for [`Construct`].
///
/// `if_`/`when`/`for_`/`while_` start a construct, `then` (if and when) or
/// `repeat` (for and while) fill the current branch, `elseif`/`elsewhen`
/// open a new branch, `orelse` fills the final branch and `end` closes it.
#[derive(Debug, Clone)]
pub struct ConstructBuilder {
    kind: ConstructKind,
    body_kind: Option<BodyKind>,
    test: Option<Expression>,
    indices: Vec<ForIndex>,
    body: Vec<Clause>,
    branches: Vec<Branch>,
    orelse: Option<Vec<Clause>>,
    stage: Stage,
}

impl ConstructBuilder {
    fn start(kind: ConstructKind, test: Option<Expression>, indices: Vec<ForIndex>) -> Self {
        Self {
            kind,
            body_kind: None,
            test,
            indices,
            body: Vec::new(),
            branches: Vec::new(),
            orelse: None,
            stage: Stage::Body,
        }
    }

    /// Start `if test then ... end if`.
    pub fn if_(test: impl Into<Expression>) -> Self {
        Self::start(ConstructKind::If, Some(test.into()), Vec::new())
    }

    /// Start `when test then ... end when`.
    pub fn when(test: impl Into<Expression>) -> Self {
        Self::start(ConstructKind::When, Some(test.into()), Vec::new())
    }

    /// Start `for i in range loop ... end for`.
    pub fn for_(indices: impl IntoIterator<Item = ForIndex>) -> Self {
        Self::start(ConstructKind::For, None, indices.into_iter().collect())
    }

    /// Start `while test loop ... end while`.
    pub fn while_(test: impl Into<Expression>) -> Self {
        Self::start(ConstructKind::While, Some(test.into()), Vec::new())
    }

    /// The body kind, once fixed by the first clause.
    pub fn body_kind(&self) -> Option<BodyKind> {
        self.body_kind
    }

    /// Append clauses to the current branch of an `if` or `when`.
    pub fn then<I, C>(mut self, clauses: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Clause>,
    {
        self.require(ConstructKind::is_conditional, "then")?;
        self.extend(clauses)?;
        Ok(self)
    }

    /// Append clauses to the body of a `for` or `while`.
    pub fn repeat<I, C>(mut self, clauses: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Clause>,
    {
        self.require(|k| !k.is_conditional(), "repeat")?;
        self.extend(clauses)?;
        Ok(self)
    }

    /// Open an `elseif` branch.
    pub fn elseif(self, test: impl Into<Expression>) -> Result<Self> {
        self.require(|k| k == ConstructKind::If, "elseif")?;
        self.open_branch(test.into())
    }

    /// Open an `elsewhen` branch.
    pub fn elsewhen(self, test: impl Into<Expression>) -> Result<Self> {
        self.require(|k| k == ConstructKind::When, "elsewhen")?;
        self.open_branch(test.into())
    }

    /// Start the final `else` branch and append clauses to it.
    pub fn orelse<I, C>(mut self, clauses: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Clause>,
    {
        self.require(ConstructKind::is_conditional, "orelse")?;
        self.stage = Stage::Else;
        self.orelse.get_or_insert_with(Vec::new);
        self.extend(clauses)?;
        Ok(self)
    }

    /// Close the construct.
    pub fn end(self) -> Result<Construct> {
        let body_kind = self.body_kind.unwrap_or(BodyKind::Equation);
        let construct = Construct {
            kind: self.kind,
            body_kind,
            test: self.test,
            indices: self.indices,
            body: self.body,
            branches: self.branches,
            orelse: self.orelse,
        };
        if body_kind == BodyKind::Expression {
            // validates arity and the else branch
            construct.inline()?;
        }
        Ok(construct)
    }

    fn require(&self, allowed: impl Fn(ConstructKind) -> bool, stage: &str) -> Result<()> {
        if allowed(self.kind) {
            Ok(())
        } else {
            Err(Error::invariant(format!(
                "'{stage}' is not available on a {} construct",
                self.kind
            )))
        }
    }

    fn open_branch(mut self, test: Expression) -> Result<Self> {
        if self.stage == Stage::Else {
            return Err(Error::invariant(format!(
                "cannot open a new {} branch after else",
                self.kind
            )));
        }
        self.branches.push(Branch {
            test,
            body: Vec::new(),
        });
        self.stage = Stage::Branch;
        Ok(self)
    }

    fn extend<I, C>(&mut self, clauses: I) -> Result<()>
    where
        I: IntoIterator<Item = C>,
        C: Into<Clause>,
    {
        for clause in clauses {
            let clause = self.check(clause.into())?;
            let target = match self.stage {
                Stage::Body => &mut self.body,
                Stage::Branch => match self.branches.last_mut() {
                    Some(branch) => &mut branch.body,
                    None => unreachable!("branch stage always has an open branch"),
                },
                Stage::Else => self.orelse.get_or_insert_with(Vec::new),
            };
            if clause.kind() == BodyKind::Expression && !target.is_empty() {
                return Err(Error::invalid_arity(
                    "if-expression branch",
                    "exactly one expression",
                    target.len() + 1,
                ));
            }
            target.push(clause);
        }
        Ok(())
    }

    fn check(&mut self, clause: Clause) -> Result<Clause> {
        // a nested if-expression becomes plain expression text
        let clause = match clause {
            Clause::Construct(c) if c.body_kind == BodyKind::Expression => {
                Clause::Expression(c.inline()?)
            }
            other => other,
        };

        let found = clause.kind();
        if found == BodyKind::Expression && self.kind != ConstructKind::If {
            return Err(Error::invariant(format!(
                "{} constructs cannot hold expression bodies",
                self.kind
            )));
        }
        match self.body_kind {
            None => self.body_kind = Some(found),
            Some(expected) if expected != found => {
                return Err(Error::mixed_body_kind(
                    self.kind.keyword(),
                    expected.name(),
                    found.name(),
                ));
            }
            Some(_) => {}
        }
        Ok(clause)
    }
}
