use anyhow::Context;
use serde::Serialize;
use snowmint::{SnowflakeComponents, SnowflakeGenerator, SnowflakeId, SystemClock, TimeSource};
use std::io::Write;

use crate::cli::config::{AppConfig, Command};

/// One line of `--json` output.
#[derive(Serialize, Debug, PartialEq, Eq)]
struct IdRecord {
    #[serde(with = "snowmint::as_decimal_string")]
    id: SnowflakeId,
    #[serde(flatten)]
    components: Option<SnowflakeComponents>,
}

/// Runs the configured subcommand against a generator, writing one line per
/// ID to `out`.
pub fn run<T, W>(
    config: &AppConfig,
    generator: &mut SnowflakeGenerator<T>,
    out: &mut W,
) -> anyhow::Result<()>
where
    T: TimeSource,
    W: Write,
{
    match &config.command {
        Command::Generate { count } => {
            for _ in 0..*count {
                let id = generator.generate()?;
                write_record(out, config.json, id, None)?;
            }
        }
        Command::Compose {
            timestamp,
            worker,
            process,
            sequence,
        } => {
            let timestamp = timestamp.unwrap_or_else(|| SystemClock.current_millis());
            let worker = worker.unwrap_or(generator.worker_id());
            let process = process.unwrap_or(generator.process_id());
            let id = generator
                .compose(timestamp, worker, process, *sequence)
                .context("cannot compose id")?;
            tracing::debug!(%id, timestamp, worker, process, sequence, "composed");
            write_record(out, config.json, id, None)?;
        }
        Command::Decompose { ids } => {
            for input in ids {
                let id: SnowflakeId = input
                    .parse()
                    .map_err(snowmint::Error::from)
                    .with_context(|| format!("cannot decompose {input:?}"))?;
                let components = generator
                    .decompose(id)
                    .with_context(|| format!("cannot decompose {input:?}"))?;
                write_record(out, config.json, id, Some(components))?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn write_record<W: Write>(
    out: &mut W,
    json: bool,
    id: SnowflakeId,
    components: Option<SnowflakeComponents>,
) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, &IdRecord { id, components })?;
        writeln!(out)?;
    } else {
        match components {
            Some(parts) => writeln!(out, "{id} {parts}")?,
            None => writeln!(out, "{id}")?,
        }
    }
    Ok(())
}
