//! Mapping protocol and twice-NAT mode enumerations.
//!
//! Both enums carry a stable integer encoding (the northbound wire value). The
//! first variant of each is the zero value substituted for unknown input.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// L4 protocol of a static or identity mapping.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    #[default]
    Tcp = 0,
    Udp = 1,
    Icmp = 2,
}

impl Protocol {
    /// Returns the northbound integer encoding.
    pub const fn as_nb_value(&self) -> i32 {
        *self as i32
    }

    /// Decodes the northbound integer encoding.
    pub const fn from_nb_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(Protocol::Tcp),
            1 => Some(Protocol::Udp),
            2 => Some(Protocol::Icmp),
            _ => None,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
            Protocol::Icmp => "ICMP",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Protocol {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TCP" => Ok(Protocol::Tcp),
            "UDP" => Ok(Protocol::Udp),
            "ICMP" => Ok(Protocol::Icmp),
            _ => Err(ParseError::InvalidProtocol(s.to_string())),
        }
    }
}

/// Twice-NAT behaviour of a static mapping.
///
/// `SelfTwice` translates the source only for hairpinned traffic.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TwiceNatMode {
    #[default]
    Disabled = 0,
    Enabled = 1,
    #[serde(rename = "SELF")]
    SelfTwice = 2,
}

impl TwiceNatMode {
    pub const fn as_nb_value(&self) -> i32 {
        *self as i32
    }
}

impl fmt::Display for TwiceNatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TwiceNatMode::Disabled => "DISABLED",
            TwiceNatMode::Enabled => "ENABLED",
            TwiceNatMode::SelfTwice => "SELF",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TwiceNatMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DISABLED" => Ok(TwiceNatMode::Disabled),
            "ENABLED" => Ok(TwiceNatMode::Enabled),
            "SELF" => Ok(TwiceNatMode::SelfTwice),
            _ => Err(ParseError::InvalidTwiceNatMode(s.to_string())),
        }
    }
}
