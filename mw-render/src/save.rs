//! Writing rendered documents into a package directory.

use std::path::{Path, PathBuf};

use eyre::{Context, Report, Result, bail};
use modelwright_model::{Document, draw_connections};
use tracing::info;

use crate::{RenderOptions, render};

/// File listing the package members, one identifier per line.
pub const PACKAGE_ORDER: &str = "package.order";

/// Options for [`save`].
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Draw connection lines from declaration placements before rendering.
    pub draw_connections: bool,
    pub render: RenderOptions,
}

impl SaveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw_connections(mut self, enabled: bool) -> Self {
        self.draw_connections = enabled;
        self
    }

    pub fn render(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }
}

/// What [`save`] did on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// The written model file.
    pub path: PathBuf,
    /// Whether the identifier was appended to `package.order`.
    pub order_updated: bool,
}

/// Render `doc` and store it as `<folder>/<ident>.mo`, registering the
/// identifier in `<folder>/package.order`.
///
/// The document is rendered before anything is written, so a render error
/// leaves the folder untouched.
pub fn save(doc: &Document, folder: &Path, options: &SaveOptions) -> Result<SaveReport> {
    if !folder.is_dir() {
        bail!("{} is not a directory", folder.display());
    }

    let rendered = if options.draw_connections {
        let mut doc = doc.clone();
        draw_connections(&mut doc).map_err(|err| Report::new(*err))?;
        render(&doc, &options.render)
    } else {
        render(doc, &options.render)
    };
    let text = rendered
        .map_err(|err| Report::new(*err))
        .wrap_err_with(|| format!("failed to render {}", doc.ident()))?;

    let path = folder.join(format!("{}.mo", doc.ident()));
    std::fs::write(&path, text).wrap_err_with(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote model");

    let order_updated = append_to_order(&folder.join(PACKAGE_ORDER), doc.ident())?;

    Ok(SaveReport {
        path,
        order_updated,
    })
}

/// Append `ident` to the ordering manifest unless it is already listed.
fn append_to_order(path: &Path, ident: &str) -> Result<bool> {
    let content = if path.exists() {
        std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?
    } else {
        String::new()
    };

    let mut lines: Vec<&str> = content.lines().collect();
    if lines.iter().any(|line| line.trim() == ident) {
        return Ok(false);
    }
    lines.push(ident);

    let mut out = lines.join("\n");
    out.push('\n');
    std::fs::write(path, out).wrap_err_with(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), ident, "updated package order");
    Ok(true)
}
