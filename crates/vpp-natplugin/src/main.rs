//! NAT44 state dump tool
//!
//! Loads a recorded dataplane snapshot, runs the NAT44 collector against it
//! and prints the declarative NAT44 state as JSON on stdout.

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use vpp_natplugin::{
    collect_state, DataplaneSnapshot, DumpResource, NatApiVersion, NatDumpConfig,
    NatPluginError, Result,
};

#[derive(Parser, Debug)]
#[command(name = "natdump", version, about = "Dump NAT44 configuration from a dataplane snapshot")]
struct Cli {
    /// Configuration file (defaults apply when missing)
    #[arg(short, long, default_value = vpp_natplugin::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Recorded dataplane snapshot (JSON)
    #[arg(short, long)]
    snapshot: PathBuf,

    /// NAT44 API generation: ed or ei
    #[arg(long)]
    nat_api: Option<NatApiVersion>,

    /// Log filter, e.g. "debug" or "vpp_natplugin=trace"
    #[arg(long)]
    log_level: Option<String>,

    /// Resource to dump; repeat for several (global, interfaces, address_pools, dnat)
    #[arg(short, long = "resource")]
    resources: Vec<DumpResource>,

    /// Include the deprecated global interface and address sections
    #[arg(long)]
    deprecated: bool,
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_logging(&config.log.level)?;

    info!(
        nat_api = %config.dataplane.nat_api,
        snapshot = %cli.snapshot.display(),
        "natdump: Starting"
    );

    match run(&cli, &config) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!(error = %e, "natdump: Dump failed");
            Err(Box::new(e))
        }
    }
}

/// Merges command line overrides into the file configuration.
fn load_config(cli: &Cli) -> Result<NatDumpConfig> {
    let mut config = NatDumpConfig::load_or_default(&cli.config)?;

    if let Some(nat_api) = cli.nat_api {
        config.dataplane.nat_api = nat_api;
    }
    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }
    if !cli.resources.is_empty() {
        config.dump.resources = cli.resources.clone();
    }
    if cli.deprecated {
        config.dump.dump_deprecated = true;
    }

    config.validate()?;
    Ok(config)
}

/// Initialize structured logging on stderr; stdout carries the dump.
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| NatPluginError::Config(format!("Invalid log level '{}': {}", level, e)))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| NatPluginError::Config(format!("Failed to set logger: {}", e)))?;

    Ok(())
}

fn run(cli: &Cli, config: &NatDumpConfig) -> Result<()> {
    let snapshot = DataplaneSnapshot::load(&cli.snapshot)?;
    let mut handler = snapshot.into_handler(config.dataplane.nat_api);

    let state = collect_state(
        &mut handler,
        &config.dump.resources,
        config.dump.dump_deprecated,
    )?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &state).map_err(std::io::Error::from)?;
    writeln!(stdout)?;
    Ok(())
}
