//! NAT44 state collector for the VPP NAT plugin.
//!
//! Reads NAT44 configuration back from a running dataplane over the binary
//! API and rebuilds the declarative model from `vpp-nat-model`, ready to be
//! compared against desired state. The collector is read-only.
//!
//! # Architecture
//!
//! - [`vppcalls`]: the [`NatVppHandler`] and the per-generation dumps
//! - [`ifaceidx`]: interface and DHCP lookups used to resolve handles
//! - [`dump`]: collection of several resources into one document
//! - [`snapshot`]: recorded dataplane state for offline runs
//! - [`config`]: TOML configuration of the `natdump` tool

pub mod config;
pub mod dump;
pub mod error;
pub mod ifaceidx;
pub mod snapshot;
pub mod vppcalls;

#[cfg(test)]
mod test_util;

pub use config::{DumpResource, NatDumpConfig};
pub use dump::{collect_state, Nat44State};
pub use error::{NatPluginError, Result};
pub use ifaceidx::{
    DhcpIndex, DhcpLease, DhcpLeaseMap, IfaceIndex, IfaceMetadata, InterfaceIndexMap,
    InterfaceResolver,
};
pub use snapshot::DataplaneSnapshot;
pub use vppcalls::{NatApiVersion, NatVppHandler};
