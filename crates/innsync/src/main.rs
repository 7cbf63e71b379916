//! innsync - Entry Point
//!
//! Binary entry point; command handling lives in [`innsync::cli`].

use clap::Parser;
use innsync::cli::{Cli, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run(Cli::parse()).await
}
