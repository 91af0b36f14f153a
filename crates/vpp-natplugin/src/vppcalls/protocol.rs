//! Conversions between dataplane protocol numbers and model enums.

use tracing::warn;
use vpp_nat_model::{Protocol, TwiceNatMode};

/// IANA protocol numbers carried by mapping messages.
pub const TCP: u8 = 6;
pub const UDP: u8 = 17;
pub const ICMP: u8 = 1;

/// Converts a protocol number into the model enum.
///
/// Unknown numbers are logged and mapped to the zero value.
pub fn protocol_number_to_nb_value(protocol: u8) -> Protocol {
    match protocol {
        TCP => Protocol::Tcp,
        UDP => Protocol::Udp,
        ICMP => Protocol::Icmp,
        _ => {
            warn!(protocol, "Unknown protocol");
            Protocol::default()
        }
    }
}

/// Converts the integer encoding of [`Protocol`] into a protocol number.
///
/// Unknown values are logged and mapped to TCP.
pub fn protocol_nb_value_to_number(value: i32) -> u8 {
    match Protocol::from_nb_value(value) {
        Some(Protocol::Tcp) => TCP,
        Some(Protocol::Udp) => UDP,
        Some(Protocol::Icmp) => ICMP,
        None => {
            warn!(protocol = value, "Unknown protocol, defaulting to TCP");
            TCP
        }
    }
}

/// Combines the twice-NAT flags into a mode.
///
/// Both flags set is contradictory; it is logged and treated as disabled.
pub fn twice_nat_mode(twice_nat: bool, self_twice_nat: bool) -> TwiceNatMode {
    match (twice_nat, self_twice_nat) {
        (true, true) => {
            warn!("Both TwiceNAT and self-TwiceNAT are enabled");
            TwiceNatMode::default()
        }
        (true, false) => TwiceNatMode::Enabled,
        (false, true) => TwiceNatMode::SelfTwice,
        (false, false) => TwiceNatMode::Disabled,
    }
}
