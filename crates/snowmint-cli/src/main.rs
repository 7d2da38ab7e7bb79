#![doc = include_str!("../README.md")]

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::command::run;
use cli::config::{AppConfig, CliArgs};
use cli::telemetry::init_telemetry;
use snowmint::SnowflakeGenerator;
use std::io::{self, BufWriter};

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    init_telemetry()?;

    let config = AppConfig::try_from(args)?;
    if cfg!(debug_assertions) {
        tracing::debug!("Starting with full config: {:#?}", config);
    } else {
        tracing::debug!(
            worker_id = config.generator.worker_id,
            process_id = config.generator.process_id,
            "Starting"
        );
    }

    let mut generator =
        SnowflakeGenerator::new(config.generator).context("invalid generator configuration")?;

    let mut out = BufWriter::new(io::stdout().lock());
    run(&config, &mut generator, &mut out)
}
