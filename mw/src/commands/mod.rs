mod completions;
mod list;
mod render;
mod save;
mod tree;

use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use list::ListCommand;
use render::RenderCommand;
use save::SaveCommand;
use tree::TreeCommand;

/// Extension trait for exiting on model errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for modelwright_model::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "mw")]
#[command(version)]
#[command(about = "Build and render Modelica-like models")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::List(cmd) => cmd.run(),
            Commands::Render(cmd) => cmd.run(),
            Commands::Save(cmd) => cmd.run(),
            Commands::Tree(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the bundled demo models
    List(ListCommand),

    /// Print the source of a demo model
    Render(RenderCommand),

    /// Write a demo model into a package directory
    Save(SaveCommand),

    /// Print the document tree of a demo model as JSON
    Tree(TreeCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
