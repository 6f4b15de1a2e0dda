//! JSON output format CLI
//!
//! Runs one partition attempt end to end: records in, one JSON document out

use clap::Parser;
use json_output_format::cli::{Cli, Runner};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let runner = Runner::new(Cli::parse());
    if let Err(e) = runner.run().await {
        eprintln!("json-output-format: {e}");
        std::process::exit(1);
    }
}
