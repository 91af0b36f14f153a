//! Endpoint-independent NAT44 messages (`nat44_ei.api`).
//!
//! The legacy generation has its own flag type and no twice-NAT or
//! load-balancing support.

use super::nat_types::{NatLogLevel, NatTimeouts};
use crate::types::{Ip4Address, InterfaceIndex, Tag};
use serde::{Deserialize, Serialize};

/// Configuration flag bitmask used by the endpoint-independent API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nat44EiConfigFlags(pub u8);

impl Nat44EiConfigFlags {
    pub const NAT44_EI_NONE: u8 = 0x00;
    pub const NAT44_EI_STATIC_MAPPING_ONLY: u8 = 0x01;
    pub const NAT44_EI_CONNECTION_TRACKING: u8 = 0x02;
    pub const NAT44_EI_OUT2IN_DPO: u8 = 0x04;
    pub const NAT44_EI_ADDR_ONLY_MAPPING: u8 = 0x08;
    pub const NAT44_EI_IF_INSIDE: u8 = 0x10;
    pub const NAT44_EI_IF_OUTSIDE: u8 = 0x20;
    pub const NAT44_EI_STATIC_MAPPING: u8 = 0x40;

    pub const fn bits(&self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Nat44EiShowRunningConfig {}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat44EiShowRunningConfigReply {
    pub retval: i32,
    pub inside_vrf: u32,
    pub outside_vrf: u32,
    pub users: u32,
    pub sessions: u32,
    pub user_sessions: u32,
    pub forwarding_enabled: bool,
    pub ipfix_logging_enabled: bool,
    pub timeouts: NatTimeouts,
    pub log_level: NatLogLevel,
    pub flags: Nat44EiConfigFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Nat44EiInterfaceDump {}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat44EiInterfaceDetails {
    pub sw_if_index: InterfaceIndex,
    pub flags: Nat44EiConfigFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Nat44EiOutputInterfaceGet {
    pub cursor: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat44EiOutputInterfaceGetReply {
    pub retval: i32,
    pub cursor: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat44EiOutputInterfaceDetails {
    pub sw_if_index: InterfaceIndex,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Nat44EiAddressDump {}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat44EiAddressDetails {
    pub ip_address: Ip4Address,
    pub vrf_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Nat44EiStaticMappingDump {}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat44EiStaticMappingDetails {
    pub flags: Nat44EiConfigFlags,
    pub local_ip_address: Ip4Address,
    pub external_ip_address: Ip4Address,
    pub protocol: u8,
    pub local_port: u16,
    pub external_port: u16,
    pub external_sw_if_index: InterfaceIndex,
    pub vrf_id: u32,
    pub tag: Tag,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Nat44EiIdentityMappingDump {}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat44EiIdentityMappingDetails {
    pub flags: Nat44EiConfigFlags,
    pub ip_address: Ip4Address,
    pub protocol: u8,
    pub port: u16,
    pub sw_if_index: InterfaceIndex,
    pub vrf_id: u32,
    pub tag: Tag,
}
