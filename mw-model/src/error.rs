use miette::Diagnostic;
use thiserror::Error;

/// Result type for document building and rendering (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Every failure the document model and the renderer can report.
///
/// None of these are transient: each one points at a construction mistake
/// made by the caller and is returned at the call that triggered it.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum Error {
    #[error("declaration '{ident}' already exists in '{document}'")]
    #[diagnostic(
        code(modelwright::duplicate_identifier),
        help("declaration identifiers must be unique across the public and protected sections")
    )]
    DuplicateIdentifier { ident: String, document: String },

    #[error("unknown section '{name}'")]
    #[diagnostic(
        code(modelwright::unknown_section),
        help(
            "valid sections are: public, protected, initial equation, initial algorithm, equation, algorithm"
        )
    )]
    UnknownSection { name: String },

    #[error("unknown {context} flag '{flag}'")]
    #[diagnostic(code(modelwright::unknown_flag), help("valid flags are: {valid}"))]
    UnknownFlag {
        flag: String,
        context: &'static str,
        valid: String,
    },

    #[error("{operation} takes {expected}, got {got}")]
    #[diagnostic(code(modelwright::invalid_arity))]
    InvalidArity {
        operation: &'static str,
        expected: &'static str,
        got: usize,
    },

    #[error("{construct} body holds {expected} clauses, cannot add {found}")]
    #[diagnostic(
        code(modelwright::mixed_body_kind),
        help("equation, statement and expression bodies cannot be mixed in one construct")
    )]
    MixedBodyKind {
        construct: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("cannot render {kind} at '{path}'")]
    #[diagnostic(code(modelwright::unsupported_node))]
    UnsupportedNode { kind: String, path: String },

    #[error("{message}")]
    #[diagnostic(code(modelwright::invariant_violation))]
    InvariantViolation { message: String },
}

impl Error {
    /// Create a duplicate identifier error
    pub fn duplicate_identifier(ident: impl Into<String>, document: impl Into<String>) -> Box<Self> {
        Box::new(Error::DuplicateIdentifier {
            ident: ident.into(),
            document: document.into(),
        })
    }

    /// Create an unknown section error
    pub fn unknown_section(name: impl Into<String>) -> Box<Self> {
        Box::new(Error::UnknownSection { name: name.into() })
    }

    /// Create an unknown flag error listing the accepted keywords
    pub fn unknown_flag(
        flag: impl Into<String>,
        context: &'static str,
        valid: &[&'static str],
    ) -> Box<Self> {
        Box::new(Error::UnknownFlag {
            flag: flag.into(),
            context,
            valid: valid.join(", "),
        })
    }

    /// Create an invalid arity error
    pub fn invalid_arity(operation: &'static str, expected: &'static str, got: usize) -> Box<Self> {
        Box::new(Error::InvalidArity {
            operation,
            expected,
            got,
        })
    }

    /// Create a mixed body kind error
    pub fn mixed_body_kind(
        construct: &'static str,
        expected: &'static str,
        found: &'static str,
    ) -> Box<Self> {
        Box::new(Error::MixedBodyKind {
            construct,
            expected,
            found,
        })
    }

    /// Create an unsupported node error with the path of the offending element
    pub fn unsupported_node(kind: impl Into<String>, path: impl Into<String>) -> Box<Self> {
        Box::new(Error::UnsupportedNode {
            kind: kind.into(),
            path: path.into(),
        })
    }

    /// Create an invariant violation error
    pub fn invariant(message: impl Into<String>) -> Box<Self> {
        Box::new(Error::InvariantViolation {
            message: message.into(),
        })
    }
}
