//! Dumps over the endpoint-independent NAT44 API.
//!
//! This generation has no twice-NAT and no load-balanced mappings.

use super::dnat::{self, IdentityMappingRecord, StaticMappingRecord};
use super::flags::Nat44EiFlags;
use super::pool::AddressPoolMerger;
use super::{cursor_dump_all, dump_all, interface_name};
use crate::error::{NatPluginError, Result};
use crate::ifaceidx::InterfaceResolver;
use std::collections::BTreeMap;
use vpp_binapi::api::nat44_ei::*;
use vpp_binapi::{Channel, ChannelExt};
use vpp_nat_model::{
    IdentityMapping, Nat44AddressPool, Nat44Global, Nat44GlobalInterface, Nat44Interface,
    StaticMapping,
};

pub(super) fn nat44_global_config_dump<C: Channel + ?Sized>(
    ch: &mut C,
    ifaces: &InterfaceResolver<'_>,
    dump_deprecated: bool,
) -> Result<Nat44Global> {
    let reply = ch
        .request(Nat44EiShowRunningConfig {})
        .map_err(NatPluginError::dump("NAT44 global config"))?;

    let mut cfg = Nat44Global {
        forwarding: reply.forwarding_enabled,
        endpoint_independent: true,
        ..Default::default()
    };
    if dump_deprecated {
        cfg.nat_interfaces = global_interfaces_dump(ch, ifaces)?;
        cfg.address_pools = global_addresses_dump(ch)?;
    }
    Ok(cfg)
}

pub(super) fn nat44_interfaces_dump<C: Channel + ?Sized>(
    ch: &mut C,
    ifaces: &InterfaceResolver<'_>,
) -> Result<Vec<Nat44Interface>> {
    let mut interfaces = Vec::new();

    for details in dump_all(ch, Nat44EiInterfaceDump {}, "NAT44 interface")? {
        let Some(name) = interface_name(ifaces, details.sw_if_index) else {
            continue;
        };
        let flags = Nat44EiFlags::decode(details.flags);
        interfaces.push(Nat44Interface {
            name: name.to_string(),
            nat_inside: flags.if_inside,
            nat_outside: flags.if_outside,
            output_feature: false,
        });
    }

    let outputs = cursor_dump_all::<_, Nat44EiOutputInterfaceGet>(ch, "NAT44 interface output feature")?;
    for details in outputs {
        let Some(name) = interface_name(ifaces, details.sw_if_index) else {
            continue;
        };
        interfaces.push(Nat44Interface {
            name: name.to_string(),
            output_feature: true,
            ..Default::default()
        });
    }

    Ok(interfaces)
}

pub(super) fn nat44_address_pools_dump<C: Channel + ?Sized>(
    ch: &mut C,
) -> Result<Vec<Nat44AddressPool>> {
    let mut merger = AddressPoolMerger::new();
    for details in dump_all(ch, Nat44EiAddressDump {}, "NAT44 address pool")? {
        merger.push(details.ip_address.to_ipv4(), details.vrf_id, false);
    }
    Ok(merger.finish())
}

pub(super) fn static_mapping_dump<C: Channel + ?Sized>(
    ch: &mut C,
    ifaces: &InterfaceResolver<'_>,
) -> Result<BTreeMap<String, Vec<StaticMapping>>> {
    let records = dump_all(ch, Nat44EiStaticMappingDump {}, "NAT44 static mapping")?
        .into_iter()
        .map(|details| StaticMappingRecord {
            tag: details.tag,
            external_sw_if_index: details.external_sw_if_index,
            external_ip: details.external_ip_address,
            external_port: details.external_port,
            local_ip: details.local_ip_address,
            local_port: details.local_port,
            vrf_id: details.vrf_id,
            protocol: details.protocol,
            twice_nat: false,
            self_twice_nat: false,
        });
    Ok(dnat::group_static_mappings(records, ifaces))
}

pub(super) fn identity_mapping_dump<C: Channel + ?Sized>(
    ch: &mut C,
    ifaces: &InterfaceResolver<'_>,
) -> Result<BTreeMap<String, Vec<IdentityMapping>>> {
    let records = dump_all(ch, Nat44EiIdentityMappingDump {}, "NAT44 identity mapping")?
        .into_iter()
        .map(|details| IdentityMappingRecord {
            tag: details.tag,
            sw_if_index: details.sw_if_index,
            ip_address: details.ip_address,
            port: details.port,
            vrf_id: details.vrf_id,
            protocol: details.protocol,
        });
    Ok(dnat::group_identity_mappings(records, ifaces))
}

fn global_interfaces_dump<C: Channel + ?Sized>(
    ch: &mut C,
    ifaces: &InterfaceResolver<'_>,
) -> Result<Vec<Nat44GlobalInterface>> {
    let mut interfaces = Vec::new();

    for details in dump_all(ch, Nat44EiInterfaceDump {}, "NAT44 interface")? {
        let Some(name) = interface_name(ifaces, details.sw_if_index) else {
            continue;
        };
        interfaces.push(Nat44GlobalInterface {
            name: name.to_string(),
            is_inside: Nat44EiFlags::decode(details.flags).if_inside,
            output_feature: false,
        });
    }

    let outputs = cursor_dump_all::<_, Nat44EiOutputInterfaceGet>(ch, "NAT44 interface output feature")?;
    for details in outputs {
        let Some(name) = interface_name(ifaces, details.sw_if_index) else {
            continue;
        };
        interfaces.push(Nat44GlobalInterface {
            name: name.to_string(),
            is_inside: false,
            output_feature: true,
        });
    }

    Ok(interfaces)
}

fn global_addresses_dump<C: Channel + ?Sized>(ch: &mut C) -> Result<Vec<Nat44AddressPool>> {
    let addresses = dump_all(ch, Nat44EiAddressDump {}, "NAT44 address pool")?
        .into_iter()
        .map(|details| Nat44AddressPool::single(details.ip_address.to_ipv4(), details.vrf_id, false))
        .collect();
    Ok(addresses)
}
