//! Document model for Modelica-like source.
//!
//! A [`Document`] is one model unit: a header, six ordered sections and an
//! annotation tree. Callers assemble it through builder operations that
//! enforce identity and placement rules, then hand it to a renderer.
//!
//! ```
//! use modelwright_model::{DeclarationOptions, Document, EquationOptions};
//!
//! let mut doc = Document::new("LinearOde");
//! doc.add_parameter("Real", "a", DeclarationOptions::new().value(-0.5))?;
//! doc.add_declaration("Real", "x", DeclarationOptions::new().modify("start", 1))?;
//! doc.add_equation("der(x)", "a*x", EquationOptions::new());
//! # Ok::<(), Box<modelwright_model::Error>>(())
//! ```

pub mod connections;
pub mod construct;
pub mod declaration;
pub mod document;
pub mod equation;
pub mod error;
pub mod flags;
pub mod geometry;
pub mod import;
pub mod placement;
pub mod section;
pub mod text;
pub mod units;
pub mod value;

pub use connections::draw_connections;
pub use construct::{
    BodyKind, Branch, Clause, Construct, ConstructBuilder, ConstructKind, ForIndex,
};
pub use declaration::{
    Causality, Declaration, DeclarationMut, DeclarationOptions, FlowKind, Variability,
};
pub use document::{
    DEFAULT_EXTENT, Document, Element, Experiment, Extent, Layer, Sections, Within,
};
pub use equation::{Algorithm, Connect, Equation, EquationOptions, Expression, Extends, Statement};
pub use error::{Error, Result};
pub use flags::{AssignFlag, DeclarationFlag, DocumentFlag, Flag, FlagSet};
pub use import::{Import, ImportNames};
pub use placement::{Flip, Placement};
pub use section::Section;
pub use text::{CommentStyle, Text};
pub use units::Unit;
pub use value::{Annotation, Assign, Modification, Scalar, Value, format_significant, quote};
