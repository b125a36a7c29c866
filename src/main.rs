use anyhow::Result;
use clap::Parser;
use peron::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
