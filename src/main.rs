//! CLI entry point for rendering illusion stimuli and replaying sessions

use clap::Parser;
use illusionlab::io::cli::{Cli, CommandRunner};

fn main() -> illusionlab::Result<()> {
    let cli = Cli::parse();
    let mut runner = CommandRunner::new(cli);
    runner.run()
}
