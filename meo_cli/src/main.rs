use std::path::PathBuf;

use clap::Parser;
use mimalloc::MiMalloc;

mod orient;
mod properties;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Maximum-edge-orientation engine: assigns directions to the undirected
/// edges of a mixed network so that as much source→target path weight as
/// possible survives.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Properties file driving the run
    properties: PathBuf,

    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    orient::run(&cli.properties)
}
