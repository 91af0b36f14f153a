//! Shared fixtures for the collector integration tests.

#![allow(dead_code)]

use std::io;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use vpp_binapi::{ReplayChannel, Tag};
use vpp_nat_model::{IdentityMapping, LocalIp, Protocol, StaticMapping, TwiceNatMode};
use vpp_natplugin::{
    DhcpLease, DhcpLeaseMap, IfaceMetadata, InterfaceIndexMap, NatApiVersion, NatVppHandler,
};

pub const ETH0: u32 = 1;
pub const ETH1: u32 = 2;
pub const TAP0: u32 = 3;
pub const UNKNOWN: u32 = 42;

/// eth0 carries 80.80.80.1 statically and 80.80.80.2 from DHCP.
pub fn interfaces() -> (InterfaceIndexMap, DhcpLeaseMap) {
    let mut ifindex = InterfaceIndexMap::new();
    ifindex.put(
        "eth0",
        IfaceMetadata {
            sw_if_index: ETH0,
            ip_addresses: vec!["80.80.80.1/24".to_string()],
        },
    );
    ifindex.put(
        "eth1",
        IfaceMetadata {
            sw_if_index: ETH1,
            ip_addresses: vec!["192.168.1.1/24".to_string()],
        },
    );
    ifindex.put(
        "tap0",
        IfaceMetadata {
            sw_if_index: TAP0,
            ip_addresses: vec![],
        },
    );

    let mut dhcp = DhcpLeaseMap::new();
    dhcp.put(
        "eth0",
        DhcpLease {
            host_ip_address: "80.80.80.2/24".to_string(),
            router_ip_address: "80.80.80.254/24".to_string(),
        },
    );
    (ifindex, dhcp)
}

pub fn handler(version: NatApiVersion, channel: ReplayChannel) -> NatVppHandler<ReplayChannel> {
    let (ifindex, dhcp) = interfaces();
    NatVppHandler::new(version, channel, Arc::new(ifindex), Arc::new(dhcp))
}

pub fn tag(label: &str) -> Tag {
    Tag::padded(label)
}

pub fn static_mapping(
    external_ip: Ipv4Addr,
    external_interface: Option<&str>,
    local_ip: Ipv4Addr,
) -> StaticMapping {
    StaticMapping {
        external_interface: external_interface.map(str::to_string),
        external_ip,
        external_port: 80,
        local_ips: vec![LocalIp {
            vrf_id: 0,
            local_ip,
            local_port: 8080,
            probability: None,
        }],
        protocol: Protocol::Tcp,
        twice_nat: TwiceNatMode::Disabled,
        session_affinity: 0,
    }
}

pub fn identity_mapping(ip_address: Ipv4Addr, interface: Option<&str>) -> IdentityMapping {
    IdentityMapping {
        ip_address,
        vrf_id: 0,
        interface: interface.map(str::to_string),
        port: 22,
        protocol: Protocol::Tcp,
    }
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuf {
    type Writer = SharedBuf;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `f` under a scoped subscriber and returns its result with the
/// formatted log output.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buf = SharedBuf::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buf.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buf.0.lock().unwrap()).into_owned();
    (result, logs)
}
