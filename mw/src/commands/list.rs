use clap::{Args, ValueEnum};
use eyre::Result;

use crate::demos::Demo;

#[derive(Args)]
pub struct ListCommand {}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        println!("Demos:");
        for demo in Demo::value_variants() {
            let Some(value) = demo.to_possible_value() else {
                continue;
            };
            let help = value.get_help().map(ToString::to_string).unwrap_or_default();
            println!("  {:<16} {help}", value.get_name());
        }
        Ok(())
    }
}
