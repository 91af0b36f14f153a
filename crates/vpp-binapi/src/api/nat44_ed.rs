//! Endpoint-dependent NAT44 messages (`nat44_ed.api`).
//!
//! Dump requests are answered with a stream of `*Details` messages; the
//! output-interface listing is cursor paginated.

use super::nat_types::{NatConfigFlags, NatLogLevel, NatTimeouts};
use crate::types::{Ip4Address, InterfaceIndex, Tag};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Nat44ShowRunningConfig {}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat44ShowRunningConfigReply {
    pub retval: i32,
    pub inside_vrf: u32,
    pub outside_vrf: u32,
    pub sessions: u32,
    pub translation_buckets: u32,
    pub forwarding_enabled: bool,
    pub ipfix_logging_enabled: bool,
    pub timeouts: NatTimeouts,
    pub log_level: NatLogLevel,
    pub flags: NatConfigFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Nat44InterfaceDump {}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat44InterfaceDetails {
    pub flags: NatConfigFlags,
    pub sw_if_index: InterfaceIndex,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Nat44EdOutputInterfaceGet {
    pub cursor: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat44EdOutputInterfaceGetReply {
    pub retval: i32,
    pub cursor: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat44EdOutputInterfaceDetails {
    pub sw_if_index: InterfaceIndex,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Nat44AddressDump {}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat44AddressDetails {
    pub ip_address: Ip4Address,
    pub flags: NatConfigFlags,
    pub vrf_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Nat44StaticMappingDump {}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat44StaticMappingDetails {
    pub flags: NatConfigFlags,
    pub local_ip_address: Ip4Address,
    pub external_ip_address: Ip4Address,
    pub protocol: u8,
    pub local_port: u16,
    pub external_port: u16,
    pub external_sw_if_index: InterfaceIndex,
    pub vrf_id: u32,
    pub tag: Tag,
}

/// One backend of a load-balanced static mapping.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat44LbAddrPort {
    pub addr: Ip4Address,
    pub port: u16,
    pub probability: u8,
    pub vrf_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Nat44LbStaticMappingDump {}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat44LbStaticMappingDetails {
    pub external_addr: Ip4Address,
    pub external_port: u16,
    pub protocol: u8,
    pub flags: NatConfigFlags,
    pub affinity: u32,
    pub tag: Tag,
    pub locals: Vec<Nat44LbAddrPort>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Nat44IdentityMappingDump {}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat44IdentityMappingDetails {
    pub flags: NatConfigFlags,
    pub ip_address: Ip4Address,
    pub protocol: u8,
    pub port: u16,
    pub sw_if_index: InterfaceIndex,
    pub vrf_id: u32,
    pub tag: Tag,
}
