//! Text buffer with indentation and column tracking.

use crate::Indent;

/// Accumulates output text while tracking the indent depth and the column.
///
/// The column counts characters written since the last line break and is
/// kept exact for every write, including writes that contain `\n`.
///
/// # Example
///
/// ```
/// use modelwright_render::{Emitter, Indent};
///
/// let mut out = Emitter::new(Indent::default(), 0);
/// out.line("model M");
/// out.indent();
/// out.write_indent();
/// out.write("Real x;");
/// assert_eq!(out.column(), 9);
/// out.newline();
/// out.dedent();
/// out.line("end M;");
///
/// assert_eq!(out.finish(), "model M\n  Real x;\nend M;\n");
/// ```
#[derive(Debug, Clone)]
pub struct Emitter {
    indent_level: usize,
    indent: String,
    buffer: String,
    column: usize,
}

impl Emitter {
    /// Create an emitter starting at `start_indent` levels.
    pub fn new(indent: Indent, start_indent: usize) -> Self {
        Self {
            indent_level: start_indent,
            indent: indent.unit(),
            buffer: String::new(),
            column: 0,
        }
    }

    /// Write text as is.
    pub fn write(&mut self, s: &str) {
        self.buffer.push_str(s);
        match s.rfind('\n') {
            Some(pos) => self.column = s[pos + 1..].chars().count(),
            None => self.column += s.chars().count(),
        }
    }

    /// Write the indentation for the current level.
    pub fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(&self.indent);
            self.column += self.indent.chars().count();
        }
    }

    /// End the current line.
    pub fn newline(&mut self) {
        self.write("\n");
    }

    /// Write a full line at the current indentation.
    pub fn line(&mut self, s: &str) {
        self.write_indent();
        self.write(s);
        self.newline();
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Characters written since the last line break.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Get the current indentation level.
    pub fn depth(&self) -> usize {
        self.indent_level
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consume the emitter and return the text.
    pub fn finish(self) -> String {
        self.buffer
    }
}
