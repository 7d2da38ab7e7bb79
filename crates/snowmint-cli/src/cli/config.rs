use anyhow::bail;
use clap::{Parser, Subcommand};
use core::time::Duration;
use snowmint::{BitAllocation, GeneratorConfig, MAX_ALLOCATED_BITS, TWITTER_EPOCH};

/// Upper bound on `generate --count`, so a typo cannot spin for hours.
const MAX_COUNT: u64 = 10_000_000;

/// Command-line configuration for the `snowmint` binary.
///
/// Generator settings are global options, each also readable from an
/// environment variable (or a `.env` file), so one deployment can pin its
/// worker identity once and run any subcommand against it.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "snowmint",
    version,
    about = "Mint, compose and decompose Snowflake IDs"
)]
pub struct CliArgs {
    /// Epoch in milliseconds since 1970-01-01 UTC. Must not be in the future.
    ///
    /// Environment variable: `SNOWMINT_EPOCH_MS`
    #[arg(long, env = "SNOWMINT_EPOCH_MS", global = true, default_value_t = TWITTER_EPOCH.as_millis() as u64)]
    pub epoch_ms: u64,

    /// Worker ID encoded into every minted ID.
    ///
    /// Environment variable: `SNOWMINT_WORKER_ID`
    #[arg(long, env = "SNOWMINT_WORKER_ID", global = true, default_value_t = 0)]
    pub worker_id: u64,

    /// Process ID encoded into every minted ID. Requires `--process-bits`.
    ///
    /// Environment variable: `SNOWMINT_PROCESS_ID`
    #[arg(long, env = "SNOWMINT_PROCESS_ID", global = true, default_value_t = 0)]
    pub process_id: u64,

    /// Width of the worker ID field.
    ///
    /// Environment variable: `SNOWMINT_WORKER_BITS`
    #[arg(long, env = "SNOWMINT_WORKER_BITS", global = true, default_value_t = BitAllocation::TWITTER.worker_bits)]
    pub worker_bits: u8,

    /// Width of the process ID field.
    ///
    /// Environment variable: `SNOWMINT_PROCESS_BITS`
    #[arg(long, env = "SNOWMINT_PROCESS_BITS", global = true, default_value_t = BitAllocation::TWITTER.process_bits)]
    pub process_bits: u8,

    /// Width of the sequence field.
    ///
    /// Environment variable: `SNOWMINT_SEQUENCE_BITS`
    #[arg(long, env = "SNOWMINT_SEQUENCE_BITS", global = true, default_value_t = BitAllocation::TWITTER.sequence_bits)]
    pub sequence_bits: u8,

    /// Print JSON lines instead of plain text. IDs are rendered as decimal
    /// strings.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Mint new IDs from the system clock.
    Generate {
        /// How many IDs to mint.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u64,
    },

    /// Pack explicit components into an ID.
    Compose {
        /// Absolute timestamp in milliseconds since 1970-01-01 UTC. Defaults
        /// to now.
        #[arg(long)]
        timestamp: Option<u64>,

        /// Worker ID. Defaults to `--worker-id`.
        #[arg(long)]
        worker: Option<u64>,

        /// Process ID. Defaults to `--process-id`.
        #[arg(long)]
        process: Option<u64>,

        /// Sequence number.
        #[arg(long, default_value_t = 0)]
        sequence: u64,
    },

    /// Split IDs back into their components.
    Decompose {
        /// Decimal IDs to decompose.
        #[arg(required = true, allow_negative_numbers = true)]
        ids: Vec<String>,
    },
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub generator: GeneratorConfig,
    pub json: bool,
    pub command: Command,
}

impl TryFrom<CliArgs> for AppConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        for (name, bits) in [
            ("WORKER_BITS", args.worker_bits),
            ("PROCESS_BITS", args.process_bits),
            ("SEQUENCE_BITS", args.sequence_bits),
        ] {
            if u32::from(bits) > MAX_ALLOCATED_BITS {
                bail!("{name} ({bits}) exceeds the {MAX_ALLOCATED_BITS} bits available");
            }
        }

        if let Command::Generate { count } = args.command {
            if count == 0 {
                bail!("--count must be greater than 0");
            }
            if count > MAX_COUNT {
                bail!("--count ({count}) exceeds the maximum of {MAX_COUNT}");
            }
        }

        let bits = BitAllocation::new(args.worker_bits, args.process_bits, args.sequence_bits);
        let generator = GeneratorConfig::new(Duration::from_millis(args.epoch_ms), args.worker_id)
            .with_process_id(args.process_id)
            .with_bits(bits);

        Ok(Self {
            generator,
            json: args.json,
            command: args.command,
        })
    }
}
