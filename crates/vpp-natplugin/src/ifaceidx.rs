//! Interface metadata lookups used to resolve dataplane interface handles.
//!
//! The dataplane only reports software interface indexes. The collector
//! translates them into the logical interface names the configuration model
//! uses, and reads the addresses assigned to an interface (statically or
//! through a DHCP lease) to recognise mappings the dataplane derived from it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::net::{IpAddr, Ipv4Addr};
use tracing::warn;
use vpp_binapi::InterfaceIndex;

/// Metadata stored for a configured interface.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IfaceMetadata {
    pub sw_if_index: u32,
    /// Statically configured addresses in CIDR notation.
    pub ip_addresses: Vec<String>,
}

/// Lookup of interface names and metadata by software interface index.
pub trait IfaceIndex: Send + Sync {
    fn lookup_by_sw_if_index(&self, sw_if_index: u32) -> Option<(&str, &IfaceMetadata)>;
}

/// A DHCP lease obtained on an interface.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DhcpLease {
    /// Leased host address in CIDR notation.
    pub host_ip_address: String,
    pub router_ip_address: String,
}

/// Lookup of DHCP leases by interface name.
pub trait DhcpIndex: Send + Sync {
    fn get_value(&self, interface: &str) -> Option<&DhcpLease>;
}

/// In-memory [`IfaceIndex`], serialized as a name to metadata map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, IfaceMetadata>",
    into = "BTreeMap<String, IfaceMetadata>"
)]
pub struct InterfaceIndexMap {
    interfaces: BTreeMap<String, IfaceMetadata>,
    by_index: HashMap<u32, String>,
}

impl InterfaceIndexMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an interface.
    pub fn put(&mut self, name: impl Into<String>, metadata: IfaceMetadata) {
        let name = name.into();
        if let Some(old) = self.interfaces.get(&name) {
            self.by_index.remove(&old.sw_if_index);
        }
        self.by_index.insert(metadata.sw_if_index, name.clone());
        self.interfaces.insert(name, metadata);
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}

impl From<BTreeMap<String, IfaceMetadata>> for InterfaceIndexMap {
    fn from(interfaces: BTreeMap<String, IfaceMetadata>) -> Self {
        let mut map = Self::new();
        for (name, metadata) in interfaces {
            map.put(name, metadata);
        }
        map
    }
}

impl From<InterfaceIndexMap> for BTreeMap<String, IfaceMetadata> {
    fn from(map: InterfaceIndexMap) -> Self {
        map.interfaces
    }
}

impl IfaceIndex for InterfaceIndexMap {
    fn lookup_by_sw_if_index(&self, sw_if_index: u32) -> Option<(&str, &IfaceMetadata)> {
        let name = self.by_index.get(&sw_if_index)?;
        let metadata = self.interfaces.get(name)?;
        Some((name.as_str(), metadata))
    }
}

/// In-memory [`DhcpIndex`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DhcpLeaseMap {
    leases: BTreeMap<String, DhcpLease>,
}

impl DhcpLeaseMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, interface: impl Into<String>, lease: DhcpLease) {
        self.leases.insert(interface.into(), lease);
    }
}

impl DhcpIndex for DhcpLeaseMap {
    fn get_value(&self, interface: &str) -> Option<&DhcpLease> {
        self.leases.get(interface)
    }
}

/// An interface handle resolved to its name and addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInterface {
    pub name: String,
    /// Static addresses followed by the DHCP-leased address, if any.
    pub ip_addresses: Vec<IpAddr>,
}

impl ResolvedInterface {
    pub fn ipv4_addresses(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        self.ip_addresses.iter().filter_map(|ip| match ip {
            IpAddr::V4(v4) => Some(*v4),
            IpAddr::V6(_) => None,
        })
    }
}

/// Resolves interface handles against the interface and DHCP indexes.
#[derive(Clone, Copy)]
pub struct InterfaceResolver<'a> {
    ifindex: &'a dyn IfaceIndex,
    dhcp: &'a dyn DhcpIndex,
}

impl<'a> InterfaceResolver<'a> {
    pub fn new(ifindex: &'a dyn IfaceIndex, dhcp: &'a dyn DhcpIndex) -> Self {
        Self { ifindex, dhcp }
    }

    /// Returns the interface name, or `None` for unknown handles.
    pub fn name(&self, sw_if_index: InterfaceIndex) -> Option<&'a str> {
        self.ifindex
            .lookup_by_sw_if_index(sw_if_index.as_raw())
            .map(|(name, _)| name)
    }

    /// Returns the interface name and all of its addresses.
    ///
    /// Prefix lengths are stripped. Addresses that do not parse are logged
    /// and left out.
    pub fn resolve(&self, sw_if_index: InterfaceIndex) -> Option<ResolvedInterface> {
        let (name, metadata) = self.ifindex.lookup_by_sw_if_index(sw_if_index.as_raw())?;

        let lease = self.dhcp.get_value(name);
        let cidrs = metadata
            .ip_addresses
            .iter()
            .chain(lease.map(|l| &l.host_ip_address));

        let mut ip_addresses = Vec::new();
        for cidr in cidrs {
            let addr = strip_prefix_len(cidr);
            match addr.parse::<IpAddr>() {
                Ok(ip) => ip_addresses.push(ip),
                Err(_) => warn!(interface = name, address = cidr.as_str(), "Invalid interface address"),
            }
        }

        Some(ResolvedInterface {
            name: name.to_string(),
            ip_addresses,
        })
    }
}

fn strip_prefix_len(cidr: &str) -> &str {
    cidr.split('/').next().unwrap_or(cidr)
}
