//! CLI entry point for the wave function collapse solver

use clap::Parser;
use modulewfc::io::cli::{Cli, FileProcessor};

fn main() -> modulewfc::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
