//! feature-builder CLI tool

use anyhow::Result;
use clap::Parser;
use feature_builder::observability::{self, ObservabilityConfig};
use feature_builder_cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    observability::init(
        &ObservabilityConfig::default()
            .with_verbose(cli.verbose)
            .with_json(cli.json_logs),
    )?;

    cli.run()
}
