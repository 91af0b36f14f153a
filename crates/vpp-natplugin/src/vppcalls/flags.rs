//! Decoding of the NAT configuration bitmasks into named flags.
//!
//! Bits without a named flag are ignored.

use vpp_binapi::api::{Nat44EiConfigFlags, NatConfigFlags};

/// Flags of the endpoint-dependent API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Nat44EdFlags {
    pub is_twice_nat: bool,
    pub is_self_twice_nat: bool,
    pub is_out2in_only: bool,
    pub is_addr_only: bool,
    pub is_outside: bool,
    pub is_inside: bool,
    pub is_static: bool,
    pub is_ext_host_valid: bool,
}

impl Nat44EdFlags {
    pub fn decode(flags: NatConfigFlags) -> Self {
        let bits = flags.bits();
        let has = |flag: u8| bits & flag != 0;
        Self {
            is_twice_nat: has(NatConfigFlags::NAT_IS_TWICE_NAT),
            is_self_twice_nat: has(NatConfigFlags::NAT_IS_SELF_TWICE_NAT),
            is_out2in_only: has(NatConfigFlags::NAT_IS_OUT2IN_ONLY),
            is_addr_only: has(NatConfigFlags::NAT_IS_ADDR_ONLY),
            is_outside: has(NatConfigFlags::NAT_IS_OUTSIDE),
            is_inside: has(NatConfigFlags::NAT_IS_INSIDE),
            is_static: has(NatConfigFlags::NAT_IS_STATIC),
            is_ext_host_valid: has(NatConfigFlags::NAT_IS_EXT_HOST_VALID),
        }
    }
}

/// Flags of the endpoint-independent API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Nat44EiFlags {
    pub static_mapping_only: bool,
    pub connection_tracking: bool,
    pub out2in_dpo: bool,
    pub addr_only_mapping: bool,
    pub if_inside: bool,
    pub if_outside: bool,
    pub static_mapping: bool,
}

impl Nat44EiFlags {
    pub fn decode(flags: Nat44EiConfigFlags) -> Self {
        let bits = flags.bits();
        let has = |flag: u8| bits & flag != 0;
        Self {
            static_mapping_only: has(Nat44EiConfigFlags::NAT44_EI_STATIC_MAPPING_ONLY),
            connection_tracking: has(Nat44EiConfigFlags::NAT44_EI_CONNECTION_TRACKING),
            out2in_dpo: has(Nat44EiConfigFlags::NAT44_EI_OUT2IN_DPO),
            addr_only_mapping: has(Nat44EiConfigFlags::NAT44_EI_ADDR_ONLY_MAPPING),
            if_inside: has(Nat44EiConfigFlags::NAT44_EI_IF_INSIDE),
            if_outside: has(Nat44EiConfigFlags::NAT44_EI_IF_OUTSIDE),
            static_mapping: has(Nat44EiConfigFlags::NAT44_EI_STATIC_MAPPING),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ed_empty_mask() {
        assert_eq!(Nat44EdFlags::decode(NatConfigFlags(0)), Nat44EdFlags::default());
    }

    #[test]
    fn test_ed_inside_outside() {
        let flags = Nat44EdFlags::decode(NatConfigFlags(
            NatConfigFlags::NAT_IS_INSIDE | NatConfigFlags::NAT_IS_OUTSIDE,
        ));
        assert_eq!(
            flags,
            Nat44EdFlags {
                is_inside: true,
                is_outside: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_ed_all_bits() {
        let flags = Nat44EdFlags::decode(NatConfigFlags(0xff));
        assert!(flags.is_twice_nat && flags.is_self_twice_nat && flags.is_ext_host_valid);
        assert!(flags.is_out2in_only && flags.is_addr_only && flags.is_static);
    }

    #[test]
    fn test_ei_interface_roles() {
        let flags = Nat44EiFlags::decode(Nat44EiConfigFlags(
            Nat44EiConfigFlags::NAT44_EI_IF_OUTSIDE,
        ));
        assert!(flags.if_outside);
        assert!(!flags.if_inside);
    }

    #[test]
    fn test_ei_unknown_bit_ignored() {
        assert_eq!(
            Nat44EiFlags::decode(Nat44EiConfigFlags(0x80)),
            Nat44EiFlags::default()
        );
    }
}
