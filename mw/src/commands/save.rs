use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use modelwright_render::{SaveOptions, save};

use super::UnwrapOrExit;
use crate::demos::Demo;

#[derive(Args)]
pub struct SaveCommand {
    /// Demo model to save
    demo: Demo,

    /// Package directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Draw connection lines between placed components
    #[arg(long)]
    draw_connections: bool,
}

impl SaveCommand {
    pub fn run(&self) -> Result<()> {
        let doc = self.demo.build().unwrap_or_exit();
        let options = SaveOptions::new().draw_connections(self.draw_connections);
        let report = save(&doc, &self.dir, &options)?;

        println!("Wrote {}", report.path.display());
        if report.order_updated {
            println!("Added {} to package.order", doc.ident());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_demo_into_package() {
        let dir = tempfile::TempDir::new().unwrap();
        let cmd = SaveCommand {
            demo: Demo::SimpleCircuit,
            dir: dir.path().to_path_buf(),
            draw_connections: true,
        };
        cmd.run().unwrap();
        cmd.run().unwrap();

        let model = std::fs::read_to_string(dir.path().join("SimpleCircuit.mo")).unwrap();
        assert!(model.starts_with("model SimpleCircuit\n"));
        assert!(model.contains("annotation (Line("));

        let order = std::fs::read_to_string(dir.path().join("package.order")).unwrap();
        assert_eq!(order, "SimpleCircuit\n");
    }
}
