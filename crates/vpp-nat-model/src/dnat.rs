//! Destination NAT groups and the mappings they contain.

use crate::protocol::{Protocol, TwiceNatMode};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// A labelled group of static and identity mappings.
///
/// The empty label is a valid group of its own.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DNat44 {
    pub label: String,
    pub st_mappings: Vec<StaticMapping>,
    pub id_mappings: Vec<IdentityMapping>,
}

impl DNat44 {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.st_mappings.is_empty() && self.id_mappings.is_empty()
    }
}

/// Translation of an external address (and port) to one or more local ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticMapping {
    /// Interface whose addresses act as the external address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_interface: Option<String>,
    pub external_ip: Ipv4Addr,
    #[serde(default)]
    pub external_port: u16,
    pub local_ips: Vec<LocalIp>,
    #[serde(default)]
    pub protocol: Protocol,
    #[serde(default)]
    pub twice_nat: TwiceNatMode,
    /// Session affinity timeout in seconds, load-balanced mappings only.
    #[serde(default)]
    pub session_affinity: u32,
}

impl StaticMapping {
    /// Returns true if traffic is spread over several local addresses.
    pub fn is_load_balanced(&self) -> bool {
        self.local_ips.len() > 1 || self.local_ips.iter().any(|l| l.probability.is_some())
    }
}

/// One local endpoint of a static mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalIp {
    #[serde(default)]
    pub vrf_id: u32,
    pub local_ip: Ipv4Addr,
    #[serde(default)]
    pub local_port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<u8>,
}

/// Address (and port) exempted from translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityMapping {
    pub ip_address: Ipv4Addr,
    #[serde(default)]
    pub vrf_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub protocol: Protocol,
}
