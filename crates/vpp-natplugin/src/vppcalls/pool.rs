//! Merging of dumped single addresses into contiguous pools.

use std::net::Ipv4Addr;
use vpp_nat_model::Nat44AddressPool;

/// Returns the address following `ip`, wrapping after 255.255.255.255.
pub fn next_ip(ip: Ipv4Addr) -> Ipv4Addr {
    Ipv4Addr::from(u32::from(ip).wrapping_add(1))
}

/// Folds addresses, in the order they were dumped, into address pools.
///
/// An address extends the current pool when it directly follows the pool's
/// last address and carries the same VRF and twice-NAT attribute. The input
/// is never sorted, so a non-contiguous dump order yields separate pools.
#[derive(Debug, Default)]
pub struct AddressPoolMerger {
    pools: Vec<Nat44AddressPool>,
}

impl AddressPoolMerger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ip: Ipv4Addr, vrf_id: u32, twice_nat: bool) {
        if let Some(current) = self.pools.last_mut() {
            if current.vrf_id == vrf_id
                && current.twice_nat == twice_nat
                && ip == next_ip(current.last_ip)
            {
                current.last_ip = ip;
                return;
            }
        }
        self.pools
            .push(Nat44AddressPool::single(ip, vrf_id, twice_nat));
    }

    pub fn finish(self) -> Vec<Nat44AddressPool> {
        self.pools
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ip(last: u8) -> Ipv4Addr {
        Ipv4Addr::new(10, 0, 0, last)
    }

    fn merge(records: &[(Ipv4Addr, u32, bool)]) -> Vec<Nat44AddressPool> {
        let mut merger = AddressPoolMerger::new();
        for &(addr, vrf, twice) in records {
            merger.push(addr, vrf, twice);
        }
        merger.finish()
    }

    #[test]
    fn test_next_ip_carries() {
        assert_eq!(next_ip(ip(1)), ip(2));
        assert_eq!(
            next_ip(Ipv4Addr::new(10, 0, 0, 255)),
            Ipv4Addr::new(10, 0, 1, 0)
        );
        assert_eq!(
            next_ip(Ipv4Addr::new(10, 255, 255, 255)),
            Ipv4Addr::new(11, 0, 0, 0)
        );
        assert_eq!(next_ip(Ipv4Addr::BROADCAST), Ipv4Addr::UNSPECIFIED);
    }

    #[test]
    fn test_empty() {
        assert!(merge(&[]).is_empty());
    }

    #[test]
    fn test_contiguous_run_merges() {
        let pools = merge(&[(ip(1), 0, false), (ip(2), 0, false), (ip(3), 0, false)]);
        assert_eq!(
            pools,
            vec![Nat44AddressPool {
                first_ip: ip(1),
                last_ip: ip(3),
                vrf_id: 0,
                twice_nat: false,
            }]
        );
    }

    #[test]
    fn test_merge_across_octet_boundary() {
        let pools = merge(&[
            (Ipv4Addr::new(10, 0, 0, 255), 0, false),
            (Ipv4Addr::new(10, 0, 1, 0), 0, false),
        ]);
        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].last_ip, Ipv4Addr::new(10, 0, 1, 0));
    }

    #[test]
    fn test_vrf_change_splits() {
        let pools = merge(&[(ip(1), 0, false), (ip(2), 1, false)]);
        assert_eq!(
            pools,
            vec![
                Nat44AddressPool::single(ip(1), 0, false),
                Nat44AddressPool::single(ip(2), 1, false),
            ]
        );
    }

    #[test]
    fn test_twice_nat_change_splits() {
        let pools = merge(&[(ip(1), 0, false), (ip(2), 0, true), (ip(3), 0, true)]);
        assert_eq!(pools.len(), 2);
        assert_eq!(pools[1].first_ip, ip(2));
        assert_eq!(pools[1].last_ip, ip(3));
        assert!(pools[1].twice_nat);
    }

    #[test]
    fn test_gap_splits_and_order_is_kept() {
        let pools = merge(&[(ip(5), 0, false), (ip(1), 0, false), (ip(2), 0, false)]);
        assert_eq!(
            pools,
            vec![
                Nat44AddressPool::single(ip(5), 0, false),
                Nat44AddressPool {
                    first_ip: ip(1),
                    last_ip: ip(2),
                    vrf_id: 0,
                    twice_nat: false,
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_address_starts_new_pool() {
        let pools = merge(&[(ip(1), 0, false), (ip(1), 0, false)]);
        assert_eq!(pools.len(), 2);
    }
}
