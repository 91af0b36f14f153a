//! Types shared by the NAT44 API generations (`nat_types.api`).

use serde::{Deserialize, Serialize};

/// Configuration flag bitmask used by the endpoint-dependent API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NatConfigFlags(pub u8);

impl NatConfigFlags {
    pub const NAT_IS_NONE: u8 = 0x00;
    pub const NAT_IS_TWICE_NAT: u8 = 0x01;
    pub const NAT_IS_SELF_TWICE_NAT: u8 = 0x02;
    pub const NAT_IS_OUT2IN_ONLY: u8 = 0x04;
    pub const NAT_IS_ADDR_ONLY: u8 = 0x08;
    pub const NAT_IS_OUTSIDE: u8 = 0x10;
    pub const NAT_IS_INSIDE: u8 = 0x20;
    pub const NAT_IS_STATIC: u8 = 0x40;
    pub const NAT_IS_EXT_HOST_VALID: u8 = 0x80;

    pub const fn bits(&self) -> u8 {
        self.0
    }
}

/// Session timeouts reported by show-running-config, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NatTimeouts {
    pub udp: u32,
    pub tcp_established: u32,
    pub tcp_transitory: u32,
    pub icmp: u32,
}

/// Logging level of the NAT plugin.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NatLogLevel {
    #[default]
    None = 0,
    Error = 1,
    Warning = 2,
    Notice = 3,
    Info = 4,
    Debug = 5,
}
