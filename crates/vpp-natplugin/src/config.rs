//! Configuration file support for natdump
//!
//! Loads and validates the collector configuration from TOML files.
//! Default location: /etc/vpp-agent/natdump.toml

use crate::error::{NatPluginError, Result};
use crate::vppcalls::NatApiVersion;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "/etc/vpp-agent/natdump.toml";

/// A part of the NAT44 state that can be dumped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DumpResource {
    Global,
    Interfaces,
    AddressPools,
    Dnat,
}

impl DumpResource {
    pub const ALL: [DumpResource; 4] = [
        DumpResource::Global,
        DumpResource::Interfaces,
        DumpResource::AddressPools,
        DumpResource::Dnat,
    ];
}

impl fmt::Display for DumpResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DumpResource::Global => "global",
            DumpResource::Interfaces => "interfaces",
            DumpResource::AddressPools => "address_pools",
            DumpResource::Dnat => "dnat",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for DumpResource {
    type Err = NatPluginError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "global" => Ok(DumpResource::Global),
            "interfaces" => Ok(DumpResource::Interfaces),
            "address_pools" | "pools" => Ok(DumpResource::AddressPools),
            "dnat" => Ok(DumpResource::Dnat),
            _ => Err(NatPluginError::Config(format!("unknown resource '{}'", s))),
        }
    }
}

/// Dataplane connection settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataplaneConfig {
    /// NAT44 API generation loaded in the dataplane
    #[serde(default)]
    pub nat_api: NatApiVersion,
}

/// What to dump
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Also report interfaces and addresses in the deprecated global form
    #[serde(default)]
    pub dump_deprecated: bool,

    /// Resources to dump, in output order
    #[serde(default = "default_resources")]
    pub resources: Vec<DumpResource>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter directive, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Complete natdump configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NatDumpConfig {
    #[serde(default)]
    pub dataplane: DataplaneConfig,

    #[serde(default)]
    pub dump: DumpConfig,

    #[serde(default)]
    pub log: LogConfig,
}

fn default_resources() -> Vec<DumpResource> {
    DumpResource::ALL.to_vec()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            dump_deprecated: false,
            resources: default_resources(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl NatDumpConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file, falling back to defaults if file not found
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content).map_err(|e| {
                NatPluginError::Config(format!(
                    "Failed to parse config file {}: {}",
                    path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                eprintln!(
                    "natdump: Config file {} not found, using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(NatPluginError::Io(e)),
        }
    }

    /// Load from default location or defaults
    pub fn load() -> Result<Self> {
        Self::load_or_default(DEFAULT_CONFIG_PATH)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.dump.resources.is_empty() {
            return Err(NatPluginError::Config(
                "dump.resources must not be empty".to_string(),
            ));
        }

        EnvFilter::try_new(&self.log.level).map_err(|e| {
            NatPluginError::Config(format!("invalid log level '{}': {}", self.log.level, e))
        })?;

        Ok(())
    }
}
