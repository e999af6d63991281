mod app;
mod config;
mod effects;
mod logging;
mod render;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = config::Args::parse();
    logging::initialize(logging::LogDestination::File);
    app::run(args)
}
