//! Deterministic text rendering for modelwright documents.
//!
//! [`render`] turns any node of the document tree into Modelica source text
//! and [`save`] stores a rendered document inside a package directory.
//!
//! # Module Organization
//!
//! - [`emitter`] - Output buffer with indentation and column tracking
//! - [`options`] - [`RenderOptions`], loadable from TOML
//! - [`printer`] - The recursive printer over documents, clauses and values
//! - [`render`](mod@render) - The [`Render`] trait and entry point
//! - [`save`](mod@save) - Writing `.mo` files and `package.order`

pub mod emitter;
pub mod indent;
pub mod options;
pub mod printer;
pub mod render;
pub mod save;

pub use emitter::Emitter;
pub use indent::Indent;
pub use modelwright_model::{Error, Result};
pub use options::RenderOptions;
pub use printer::Printer;
pub use render::{Render, render};
pub use save::{PACKAGE_ORDER, SaveOptions, SaveReport, save};
