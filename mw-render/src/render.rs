//! The [`Render`] trait and the `render` entry point.

use modelwright_model::{
    Algorithm, Clause, Connect, Construct, Declaration, Document, Element, Equation, Extends,
    Import, Modification, Result, Text,
};
use tracing::debug;

use crate::{Printer, RenderOptions};

/// A node that can write itself through a [`Printer`].
///
/// Implemented for every node of the document tree, so a single
/// declaration or equation renders the same way it would inside a document.
pub trait Render {
    fn render_to(&self, printer: &mut Printer) -> Result<()>;
}

/// Render a node to text.
///
/// Output is buffered; on error nothing partial is returned.
///
/// ```
/// use modelwright_model::Document;
/// use modelwright_render::{RenderOptions, render};
///
/// let text = render(&Document::default(), &RenderOptions::default())?;
/// assert_eq!(text, "model Unnamed\nend Unnamed;\n");
/// # Ok::<(), Box<modelwright_model::Error>>(())
/// ```
pub fn render<N: Render + ?Sized>(node: &N, options: &RenderOptions) -> Result<String> {
    debug!(indent = ?options.indent, start_indent = options.start_indent, "render start");
    let mut printer = Printer::new(options);
    node.render_to(&mut printer)?;
    let text = printer.finish();
    debug!(len = text.len(), "render finished");
    Ok(text)
}

impl<T: Render + ?Sized> Render for &T {
    fn render_to(&self, printer: &mut Printer) -> Result<()> {
        (**self).render_to(printer)
    }
}

impl<T: Render + ?Sized> Render for Box<T> {
    fn render_to(&self, printer: &mut Printer) -> Result<()> {
        (**self).render_to(printer)
    }
}

impl Render for Document {
    fn render_to(&self, printer: &mut Printer) -> Result<()> {
        printer.document(self)
    }
}

impl Render for Element {
    fn render_to(&self, printer: &mut Printer) -> Result<()> {
        printer.element(self)
    }
}

impl Render for Declaration {
    fn render_to(&self, printer: &mut Printer) -> Result<()> {
        printer.declaration(self)
    }
}

impl Render for Equation {
    fn render_to(&self, printer: &mut Printer) -> Result<()> {
        printer.equation(self)
    }
}

impl Render for Algorithm {
    fn render_to(&self, printer: &mut Printer) -> Result<()> {
        printer.algorithm(self)
    }
}

impl Render for Connect {
    fn render_to(&self, printer: &mut Printer) -> Result<()> {
        printer.connect(self)
    }
}

impl Render for Import {
    fn render_to(&self, printer: &mut Printer) -> Result<()> {
        printer.import(self);
        Ok(())
    }
}

impl Render for Extends {
    fn render_to(&self, printer: &mut Printer) -> Result<()> {
        printer.extends(self)
    }
}

impl Render for Text {
    fn render_to(&self, printer: &mut Printer) -> Result<()> {
        printer.text(self);
        Ok(())
    }
}

impl Render for Construct {
    fn render_to(&self, printer: &mut Printer) -> Result<()> {
        printer.construct(self)
    }
}

impl Render for Clause {
    fn render_to(&self, printer: &mut Printer) -> Result<()> {
        printer.clause(self)
    }
}

impl Render for Modification {
    fn render_to(&self, printer: &mut Printer) -> Result<()> {
        printer.modification(self)
    }
}
