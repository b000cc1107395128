mod flamegraph;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Development tasks for mathwords",
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Profile the Criterion benchmark and render a CPU flamegraph.
    Flamegraph(flamegraph::FlamegraphArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Flamegraph(args) => flamegraph::run(args),
    }
}
