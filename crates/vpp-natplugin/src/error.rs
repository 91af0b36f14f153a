//! Error types for the NAT plugin state collector.

use thiserror::Error;
use vpp_binapi::BinApiError;

/// NAT plugin errors
#[derive(Error, Debug)]
pub enum NatPluginError {
    /// A dataplane dump failed; nothing partial is returned.
    #[error("failed to dump {what}: {source}")]
    Dump {
        what: &'static str,
        #[source]
        source: BinApiError,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed dataplane snapshot
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// TOML parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NatPluginError {
    /// Returns a closure wrapping a channel error with the failed dump.
    pub(crate) fn dump(what: &'static str) -> impl FnOnce(BinApiError) -> Self {
        move |source| NatPluginError::Dump { what, source }
    }
}

/// Result type for NAT plugin operations
pub type Result<T> = std::result::Result<T, NatPluginError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_error_display() {
        let err = NatPluginError::dump("NAT44 static mapping")(BinApiError::transport("reset"));
        assert_eq!(
            err.to_string(),
            "failed to dump NAT44 static mapping: transport error: reset"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_error_display() {
        let err = NatPluginError::Config("unknown nat_api".to_string());
        assert_eq!(err.to_string(), "Configuration error: unknown nat_api");
    }
}
