//! Log output for the binary.
//!
//! Events go to stderr so stdout carries nothing but IDs. The level is taken
//! from `RUST_LOG` and defaults to `warn`, which still surfaces clock
//! regressions reported by the generator.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()?;

    Ok(())
}
