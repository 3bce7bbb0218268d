//! `runlog`: log runs by hand or from files and see them by date with their
//! pace.

mod cli;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
