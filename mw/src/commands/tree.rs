use clap::Args;
use eyre::{Context, Result};

use super::UnwrapOrExit;
use crate::demos::Demo;

#[derive(Args)]
pub struct TreeCommand {
    /// Demo model to dump
    demo: Demo,
}

impl TreeCommand {
    pub fn run(&self) -> Result<()> {
        let doc = self.demo.build().unwrap_or_exit();
        let json = serde_json::to_string_pretty(&doc).wrap_err("Failed to serialize document")?;
        println!("{json}");
        Ok(())
    }
}
