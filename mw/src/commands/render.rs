use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use modelwright_model::draw_connections;
use modelwright_render::{Indent, RenderOptions, render};

use super::UnwrapOrExit;
use crate::demos::Demo;

#[derive(Args)]
pub struct RenderCommand {
    /// Demo model to render
    demo: Demo,

    /// Render options file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Spaces per indent level
    #[arg(long, conflicts_with = "tabs")]
    indent: Option<u8>,

    /// Indent with tabs
    #[arg(long)]
    tabs: bool,

    /// Indent level of the outermost line
    #[arg(long)]
    start_indent: Option<usize>,

    /// Preferred line width
    #[arg(long)]
    width: Option<usize>,

    /// Draw connection lines between placed components
    #[arg(long)]
    draw_connections: bool,
}

impl RenderCommand {
    pub fn run(&self) -> Result<()> {
        let options = self.options()?;
        let mut doc = self.demo.build().unwrap_or_exit();
        if self.draw_connections {
            draw_connections(&mut doc).unwrap_or_exit();
        }
        print!("{}", render(&doc, &options).unwrap_or_exit());
        Ok(())
    }

    /// Options from the config file, overridden by flags.
    fn options(&self) -> Result<RenderOptions> {
        let mut options = match &self.config {
            Some(path) => RenderOptions::load(path)?,
            None => RenderOptions::default(),
        };
        if let Some(n) = self.indent {
            options.indent = Indent::Spaces(n);
        }
        if self.tabs {
            options.indent = Indent::Tab;
        }
        if let Some(depth) = self.start_indent {
            options.start_indent = depth;
        }
        if let Some(width) = self.width {
            options.width = width;
        }
        Ok(options)
    }
}
