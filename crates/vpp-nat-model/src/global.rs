//! Global NAT44 settings, interface roles and address pools.

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Global NAT44 configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat44Global {
    /// Forward packets that match no translation instead of dropping them.
    pub forwarding: bool,
    /// True when the endpoint-independent plugin generation is active.
    pub endpoint_independent: bool,
    /// Interface roles in the deprecated global form.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nat_interfaces: Vec<Nat44GlobalInterface>,
    /// Translation addresses in the deprecated global form.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub address_pools: Vec<Nat44AddressPool>,
}

/// Interface role inside the deprecated global configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat44GlobalInterface {
    pub name: String,
    pub is_inside: bool,
    pub output_feature: bool,
}

/// NAT roles enabled on one interface.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Nat44Interface {
    pub name: String,
    pub nat_inside: bool,
    pub nat_outside: bool,
    pub output_feature: bool,
}

/// Contiguous range of translation addresses, `first_ip..=last_ip`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nat44AddressPool {
    pub first_ip: Ipv4Addr,
    pub last_ip: Ipv4Addr,
    #[serde(default)]
    pub vrf_id: u32,
    #[serde(default)]
    pub twice_nat: bool,
}

impl Nat44AddressPool {
    /// Creates a pool holding exactly one address.
    pub const fn single(ip: Ipv4Addr, vrf_id: u32, twice_nat: bool) -> Self {
        Self {
            first_ip: ip,
            last_ip: ip,
            vrf_id,
            twice_nat,
        }
    }

    /// Returns true if `ip` lies within the pool range.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.first_ip <= ip && ip <= self.last_ip
    }

    /// Number of addresses in the pool.
    pub fn size(&self) -> u64 {
        u64::from(u32::from(self.last_ip)).saturating_sub(u64::from(u32::from(self.first_ip))) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_pool() {
        let ip = Ipv4Addr::new(10, 0, 0, 1);
        let pool = Nat44AddressPool::single(ip, 5, true);
        assert_eq!(pool.first_ip, pool.last_ip);
        assert_eq!(pool.size(), 1);
        assert!(pool.contains(ip));
        assert!(!pool.contains(Ipv4Addr::new(10, 0, 0, 2)));
    }

    #[test]
    fn test_pool_range() {
        let pool = Nat44AddressPool {
            first_ip: Ipv4Addr::new(10, 0, 0, 250),
            last_ip: Ipv4Addr::new(10, 0, 1, 4),
            vrf_id: 0,
            twice_nat: false,
        };
        assert_eq!(pool.size(), 11);
        assert!(pool.contains(Ipv4Addr::new(10, 0, 0, 255)));
        assert!(pool.contains(Ipv4Addr::new(10, 0, 1, 0)));
    }

    #[test]
    fn test_global_omits_empty_deprecated_sections() {
        let global = Nat44Global {
            forwarding: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&global).unwrap();
        assert_eq!(json, r#"{"forwarding":true,"endpoint_independent":false}"#);

        let back: Nat44Global = serde_json::from_str(&json).unwrap();
        assert_eq!(back, global);
    }
}
