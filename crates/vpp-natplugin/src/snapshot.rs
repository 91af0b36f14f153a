//! Offline dataplane snapshots.
//!
//! A snapshot captures what a live dataplane would answer: the reply batches
//! per request name plus the interface and DHCP metadata needed to resolve
//! interface handles. Loading one yields a [`NatVppHandler`] backed by a
//! [`ReplayChannel`], so the collector runs unchanged against recorded state.

use crate::error::{NatPluginError, Result};
use crate::ifaceidx::{DhcpLeaseMap, InterfaceIndexMap};
use crate::vppcalls::{NatApiVersion, NatVppHandler};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use vpp_binapi::{ReplayChannel, ReplayScript, VppMessage};

/// Recorded dataplane state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataplaneSnapshot {
    /// Interfaces by name.
    pub interfaces: InterfaceIndexMap,
    /// DHCP leases by interface name.
    pub dhcp_leases: DhcpLeaseMap,
    /// Reply batches per request name.
    pub replies: BTreeMap<String, Vec<Vec<VppMessage>>>,
    /// Requests that fail with the given transport error.
    pub failures: BTreeMap<String, String>,
}

impl DataplaneSnapshot {
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| NatPluginError::Snapshot(format!("invalid snapshot: {}", e)))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let snapshot: Self = serde_json::from_str(&content).map_err(|e| {
            NatPluginError::Snapshot(format!("{}: {}", path.display(), e))
        })?;
        info!(
            path = %path.display(),
            interfaces = snapshot.interfaces.len(),
            requests = snapshot.replies.len(),
            "Loaded dataplane snapshot"
        );
        Ok(snapshot)
    }

    /// Builds a handler answering from this snapshot.
    pub fn into_handler(self, version: NatApiVersion) -> NatVppHandler<ReplayChannel> {
        let channel = ReplayChannel::from_script(ReplayScript {
            replies: self.replies,
            failures: self.failures,
        });
        NatVppHandler::new(
            version,
            channel,
            Arc::new(self.interfaces),
            Arc::new(self.dhcp_leases),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ifaceidx::IfaceIndex;

    #[test]
    fn test_empty_snapshot() {
        let snapshot = DataplaneSnapshot::from_json_str("{}").unwrap();
        assert!(snapshot.interfaces.is_empty());
        assert!(snapshot.replies.is_empty());
    }

    #[test]
    fn test_snapshot_sections() {
        let snapshot = DataplaneSnapshot::from_json_str(
            r#"{
                "interfaces": {"eth0": {"sw_if_index": 1, "ip_addresses": ["10.0.0.1/24"]}},
                "dhcp_leases": {"eth0": {"host_ip_address": "10.0.0.2/24"}},
                "replies": {"nat44_interface_dump": [[]]},
                "failures": {"nat44_address_dump": "broken pipe"}
            }"#,
        )
        .unwrap();
        assert_eq!(
            snapshot.interfaces.lookup_by_sw_if_index(1).map(|(n, _)| n),
            Some("eth0")
        );
        assert_eq!(snapshot.failures["nat44_address_dump"], "broken pipe");
    }

    #[test]
    fn test_invalid_snapshot() {
        let err = DataplaneSnapshot::from_json_str("{\"replies\": 5}").unwrap_err();
        assert!(matches!(err, NatPluginError::Snapshot(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = DataplaneSnapshot::load("/nonexistent/snapshot.json").unwrap_err();
        assert!(matches!(err, NatPluginError::Io(_)));
    }
}
