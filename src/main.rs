//! extbump CLI entry point

use clap::Parser;
use extbump::cli::Cli;
use std::process;

fn main() {
    let cli = Cli::parse();
    process::exit(extbump::cli::run_bump(&cli.paths));
}
