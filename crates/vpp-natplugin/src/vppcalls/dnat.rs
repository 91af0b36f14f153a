//! Grouping of dumped mappings by label into DNAT groups.
//!
//! A mapping bound to an interface makes the dataplane install one extra
//! mapping per address of that interface. Those derived entries are dumped
//! next to the user's mapping, indistinguishable except by content. They are
//! recomputed from the interface addresses here and filtered out of the
//! result so that only the interface-bound mapping remains.

use super::protocol::{protocol_number_to_nb_value, twice_nat_mode};
use super::resolve_interface;
use crate::ifaceidx::InterfaceResolver;
use std::collections::{BTreeMap, HashMap};
use std::net::Ipv4Addr;
use vpp_binapi::{InterfaceIndex, Ip4Address, Tag};
use vpp_nat_model::{DNat44, IdentityMapping, LocalIp, StaticMapping};

/// Static mapping fields common to both API generations.
#[derive(Debug, Clone)]
pub(crate) struct StaticMappingRecord {
    pub tag: Tag,
    pub external_sw_if_index: InterfaceIndex,
    pub external_ip: Ip4Address,
    pub external_port: u16,
    pub local_ip: Ip4Address,
    pub local_port: u16,
    pub vrf_id: u32,
    pub protocol: u8,
    pub twice_nat: bool,
    pub self_twice_nat: bool,
}

/// Identity mapping fields common to both API generations.
#[derive(Debug, Clone)]
pub(crate) struct IdentityMappingRecord {
    pub tag: Tag,
    pub sw_if_index: InterfaceIndex,
    pub ip_address: Ip4Address,
    pub port: u16,
    pub vrf_id: u32,
    pub protocol: u8,
}

/// A mapping that can be bound to an interface instead of an address.
pub trait InterfaceBound: Clone {
    /// Returns the copy the dataplane derives for one interface address.
    fn derive_for_address(&self, ip: Ipv4Addr) -> Self;
}

impl InterfaceBound for StaticMapping {
    fn derive_for_address(&self, ip: Ipv4Addr) -> Self {
        Self {
            external_interface: None,
            external_ip: ip,
            ..self.clone()
        }
    }
}

impl InterfaceBound for IdentityMapping {
    fn derive_for_address(&self, ip: Ipv4Addr) -> Self {
        Self {
            interface: None,
            ip_address: ip,
            ..self.clone()
        }
    }
}

/// Mappings collected per label, with the derived entries to drop.
#[derive(Debug)]
pub struct MappingGroups<T> {
    entries: BTreeMap<String, Vec<T>>,
    derived: HashMap<String, Vec<T>>,
}

impl<T> Default for MappingGroups<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            derived: HashMap::new(),
        }
    }
}

impl<T: PartialEq> MappingGroups<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `label` part of the result even if no mapping ends up in it.
    pub fn register(&mut self, label: &str) {
        if !self.entries.contains_key(label) {
            self.entries.insert(label.to_string(), Vec::new());
        }
    }

    pub fn insert(&mut self, label: &str, mapping: T) {
        self.entries
            .entry(label.to_string())
            .or_default()
            .push(mapping);
    }

    /// Records an entry the dataplane derived on its own under `label`.
    pub fn insert_derived(&mut self, label: &str, mapping: T) {
        self.derived
            .entry(label.to_string())
            .or_default()
            .push(mapping);
    }

    /// Drops every entry equal to a derived entry of the same label.
    pub fn finish(self) -> BTreeMap<String, Vec<T>> {
        let Self {
            mut entries,
            derived,
        } = self;
        for (label, mappings) in entries.iter_mut() {
            if let Some(children) = derived.get(label) {
                mappings.retain(|mapping| !children.contains(mapping));
            }
        }
        entries
    }
}

impl<T: InterfaceBound + PartialEq> MappingGroups<T> {
    /// Inserts an interface-bound mapping and derives its per-address copies.
    pub fn insert_bound<I>(&mut self, label: &str, mapping: T, addresses: I)
    where
        I: IntoIterator<Item = Ipv4Addr>,
    {
        for ip in addresses {
            let child = mapping.derive_for_address(ip);
            self.insert_derived(label, child);
        }
        self.insert(label, mapping);
    }
}

/// Groups dumped static mappings by label.
///
/// Records bound to an unknown interface are skipped, but their label still
/// produces a group.
pub(crate) fn group_static_mappings<I>(
    records: I,
    ifaces: &InterfaceResolver<'_>,
) -> BTreeMap<String, Vec<StaticMapping>>
where
    I: IntoIterator<Item = StaticMappingRecord>,
{
    let mut groups = MappingGroups::new();

    for record in records {
        let label = record.tag.label();
        groups.register(label);

        let iface = if record.external_sw_if_index.is_some() {
            match resolve_interface(ifaces, record.external_sw_if_index) {
                Some(iface) => Some(iface),
                None => continue,
            }
        } else {
            None
        };

        let mapping = StaticMapping {
            external_interface: iface.as_ref().map(|i| i.name.clone()),
            external_ip: record.external_ip.to_ipv4(),
            external_port: record.external_port,
            local_ips: vec![LocalIp {
                vrf_id: record.vrf_id,
                local_ip: record.local_ip.to_ipv4(),
                local_port: record.local_port,
                probability: None,
            }],
            protocol: protocol_number_to_nb_value(record.protocol),
            twice_nat: twice_nat_mode(record.twice_nat, record.self_twice_nat),
            // a single backend cannot carry session affinity
            session_affinity: 0,
        };

        match iface {
            Some(iface) => groups.insert_bound(label, mapping, iface.ipv4_addresses()),
            None => groups.insert(label, mapping),
        }
    }

    groups.finish()
}

/// Groups dumped identity mappings by label.
pub(crate) fn group_identity_mappings<I>(
    records: I,
    ifaces: &InterfaceResolver<'_>,
) -> BTreeMap<String, Vec<IdentityMapping>>
where
    I: IntoIterator<Item = IdentityMappingRecord>,
{
    let mut groups = MappingGroups::new();

    for record in records {
        let label = record.tag.label();
        groups.register(label);

        let iface = if record.sw_if_index.is_some() {
            match resolve_interface(ifaces, record.sw_if_index) {
                Some(iface) => Some(iface),
                None => continue,
            }
        } else {
            None
        };

        let mapping = IdentityMapping {
            ip_address: record.ip_address.to_ipv4(),
            vrf_id: record.vrf_id,
            interface: iface.as_ref().map(|i| i.name.clone()),
            port: record.port,
            protocol: protocol_number_to_nb_value(record.protocol),
        };

        match iface {
            Some(iface) => groups.insert_bound(label, mapping, iface.ipv4_addresses()),
            None => groups.insert(label, mapping),
        }
    }

    groups.finish()
}

/// Merges static, load-balanced and identity mappings into DNAT groups
/// ordered by label.
pub fn assemble_dnat_groups(
    static_mappings: BTreeMap<String, Vec<StaticMapping>>,
    lb_mappings: BTreeMap<String, Vec<StaticMapping>>,
    identity_mappings: BTreeMap<String, Vec<IdentityMapping>>,
) -> Vec<DNat44> {
    let mut groups: BTreeMap<String, DNat44> = BTreeMap::new();

    for (label, mappings) in static_mappings.into_iter().chain(lb_mappings) {
        groups
            .entry(label.clone())
            .or_insert_with(|| DNat44::new(label))
            .st_mappings
            .extend(mappings);
    }
    for (label, mappings) in identity_mappings {
        groups
            .entry(label.clone())
            .or_insert_with(|| DNat44::new(label))
            .id_mappings
            .extend(mappings);
    }

    groups.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vpp_nat_model::{LocalIp, Protocol, TwiceNatMode};

    fn static_mapping(external_ip: Ipv4Addr, interface: Option<&str>) -> StaticMapping {
        StaticMapping {
            external_interface: interface.map(str::to_string),
            external_ip,
            external_port: 80,
            local_ips: vec![LocalIp {
                vrf_id: 0,
                local_ip: Ipv4Addr::new(10, 0, 0, 5),
                local_port: 8080,
                probability: None,
            }],
            protocol: Protocol::Tcp,
            twice_nat: TwiceNatMode::Disabled,
            session_affinity: 0,
        }
    }

    fn identity_mapping(ip: Ipv4Addr, interface: Option<&str>) -> IdentityMapping {
        IdentityMapping {
            ip_address: ip,
            vrf_id: 0,
            interface: interface.map(str::to_string),
            port: 22,
            protocol: Protocol::Tcp,
        }
    }

    #[test]
    fn test_derived_entries_are_dropped() {
        let ext = Ipv4Addr::new(80, 80, 80, 1);
        let mut groups = MappingGroups::new();
        let bound = static_mapping(Ipv4Addr::UNSPECIFIED, Some("eth0"));
        groups.insert_bound("web", bound.clone(), [ext]);
        groups.insert("web", static_mapping(ext, None));

        let result = groups.finish();
        assert_eq!(result["web"], vec![bound]);
    }

    #[test]
    fn test_derived_entries_only_match_same_label() {
        let ext = Ipv4Addr::new(80, 80, 80, 1);
        let mut groups = MappingGroups::new();
        groups.insert_bound("a", static_mapping(Ipv4Addr::UNSPECIFIED, Some("eth0")), [ext]);
        groups.insert("b", static_mapping(ext, None));

        let result = groups.finish();
        assert_eq!(result["a"].len(), 1);
        assert_eq!(result["b"], vec![static_mapping(ext, None)]);
    }

    #[test]
    fn test_different_port_is_not_derived() {
        let ext = Ipv4Addr::new(80, 80, 80, 1);
        let mut groups = MappingGroups::new();
        groups.insert_bound("a", static_mapping(Ipv4Addr::UNSPECIFIED, Some("eth0")), [ext]);
        let mut user = static_mapping(ext, None);
        user.external_port = 443;
        groups.insert("a", user.clone());

        let result = groups.finish();
        assert_eq!(result["a"].len(), 2);
        assert!(result["a"].contains(&user));
    }

    #[test]
    fn test_identity_derivation() {
        let ip = Ipv4Addr::new(192, 168, 1, 1);
        let mut groups = MappingGroups::new();
        groups.insert_bound("ssh", identity_mapping(Ipv4Addr::UNSPECIFIED, Some("eth1")), [ip]);
        groups.insert("ssh", identity_mapping(ip, None));

        let result = groups.finish();
        assert_eq!(
            result["ssh"],
            vec![identity_mapping(Ipv4Addr::UNSPECIFIED, Some("eth1"))]
        );
    }

    #[test]
    fn test_registered_label_survives_empty() {
        let mut groups: MappingGroups<StaticMapping> = MappingGroups::new();
        groups.register("skipped");
        let result = groups.finish();
        assert_eq!(result.get("skipped"), Some(&Vec::new()));
    }

    #[test]
    fn test_assemble_merges_and_sorts() {
        let mut st = BTreeMap::new();
        st.insert("b".to_string(), vec![static_mapping(Ipv4Addr::new(1, 1, 1, 1), None)]);
        let mut lb = BTreeMap::new();
        lb.insert("b".to_string(), vec![static_mapping(Ipv4Addr::new(2, 2, 2, 2), None)]);
        let mut id = BTreeMap::new();
        id.insert("a".to_string(), vec![identity_mapping(Ipv4Addr::new(3, 3, 3, 3), None)]);
        id.insert(String::new(), vec![]);

        let groups = assemble_dnat_groups(st, lb, id);
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["", "a", "b"]);
        assert_eq!(groups[2].st_mappings.len(), 2);
        assert_eq!(groups[2].st_mappings[0].external_ip, Ipv4Addr::new(1, 1, 1, 1));
        assert!(groups[0].is_empty());
    }
}
