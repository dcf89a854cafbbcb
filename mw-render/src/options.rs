use std::path::Path;

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::Indent;

/// Settings for one render call.
///
/// Every field has a default, so a config file only lists what it changes:
///
/// ```toml
/// indent = "tab"
/// start_indent = 1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Indentation unit for one nesting level.
    pub indent: Indent,
    /// Nesting depth of the outermost line.
    pub start_indent: usize,
    /// Preferred line width. Accepted and carried along, lines are not wrapped.
    pub width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: Indent::default(),
            start_indent: 0,
            width: 80,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn start_indent(mut self, depth: usize) -> Self {
        self.start_indent = depth;
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Parse options from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).wrap_err("invalid render options")
    }

    /// Load options from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&content).wrap_err_with(|| format!("in {}", path.display()))
    }
}
