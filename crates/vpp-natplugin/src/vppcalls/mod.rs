//! Dataplane calls that read NAT44 state back into the configuration model.
//!
//! The NAT plugin ships in two API generations with equivalent features and
//! different messages. [`NatVppHandler`] is bound to one of them at
//! construction; every dump dispatches to either the [`ed`] or the [`ei`]
//! module and never mixes the two.
//!
//! Shared building blocks:
//!
//! - [`flags`]: decoding of the flag bitmasks
//! - [`protocol`]: protocol number and twice-NAT mode conversions
//! - [`pool`]: merging of single addresses into pools
//! - [`dnat`]: label grouping and removal of interface-derived mappings

pub mod dnat;
mod ed;
mod ei;
pub mod flags;
pub mod pool;
pub mod protocol;

use crate::error::{NatPluginError, Result};
use crate::ifaceidx::{DhcpIndex, IfaceIndex, InterfaceResolver, ResolvedInterface};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use vpp_binapi::{BinApiResult, Channel, ChannelExt, CursorRequest, DumpRequest, InterfaceIndex};
use vpp_nat_model::{DNat44, Nat44AddressPool, Nat44Global, Nat44Interface};

/// NAT44 API generation loaded in the dataplane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NatApiVersion {
    /// Endpoint-dependent plugin.
    #[default]
    Ed,
    /// Legacy endpoint-independent plugin.
    Ei,
}

impl fmt::Display for NatApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NatApiVersion::Ed => "ed",
            NatApiVersion::Ei => "ei",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for NatApiVersion {
    type Err = NatPluginError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ed" => Ok(NatApiVersion::Ed),
            "ei" => Ok(NatApiVersion::Ei),
            _ => Err(NatPluginError::Config(format!(
                "unknown NAT API generation '{}' (expected 'ed' or 'ei')",
                s
            ))),
        }
    }
}

/// Reads NAT44 configuration from the dataplane over one channel.
pub struct NatVppHandler<C> {
    version: NatApiVersion,
    channel: C,
    ifindex: Arc<dyn IfaceIndex>,
    dhcp: Arc<dyn DhcpIndex>,
}

impl<C: Channel> NatVppHandler<C> {
    pub fn new(
        version: NatApiVersion,
        channel: C,
        ifindex: Arc<dyn IfaceIndex>,
        dhcp: Arc<dyn DhcpIndex>,
    ) -> Self {
        Self {
            version,
            channel,
            ifindex,
            dhcp,
        }
    }

    pub fn version(&self) -> NatApiVersion {
        self.version
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn into_channel(self) -> C {
        self.channel
    }

    /// Whether NAT still has to be configured through startup config.
    ///
    /// Only plugins older than both supported generations did.
    pub fn with_legacy_startup_conf(&self) -> bool {
        false
    }

    /// Global configuration of a freshly started plugin.
    pub fn default_nat44_global_config(&self) -> Nat44Global {
        Nat44Global::default()
    }

    /// Dumps global NAT44 settings.
    ///
    /// With `dump_deprecated` the interface roles and the translation
    /// addresses are also reported in their deprecated global form.
    #[instrument(skip(self), fields(api = %self.version))]
    pub fn nat44_global_config_dump(&mut self, dump_deprecated: bool) -> Result<Nat44Global> {
        let (version, ch, ifaces) = self.parts();
        match version {
            NatApiVersion::Ed => ed::nat44_global_config_dump(ch, &ifaces, dump_deprecated),
            NatApiVersion::Ei => ei::nat44_global_config_dump(ch, &ifaces, dump_deprecated),
        }
    }

    /// Dumps the NAT roles of every NAT-enabled interface.
    #[instrument(skip(self), fields(api = %self.version))]
    pub fn nat44_interfaces_dump(&mut self) -> Result<Vec<Nat44Interface>> {
        let (version, ch, ifaces) = self.parts();
        match version {
            NatApiVersion::Ed => ed::nat44_interfaces_dump(ch, &ifaces),
            NatApiVersion::Ei => ei::nat44_interfaces_dump(ch, &ifaces),
        }
    }

    /// Dumps translation addresses merged into contiguous pools.
    #[instrument(skip(self), fields(api = %self.version))]
    pub fn nat44_address_pools_dump(&mut self) -> Result<Vec<Nat44AddressPool>> {
        let (version, ch, _) = self.parts();
        match version {
            NatApiVersion::Ed => ed::nat44_address_pools_dump(ch),
            NatApiVersion::Ei => ei::nat44_address_pools_dump(ch),
        }
    }

    /// Dumps static, load-balanced and identity mappings grouped by label,
    /// ordered by label.
    #[instrument(skip(self), fields(api = %self.version))]
    pub fn dnat44_dump(&mut self) -> Result<Vec<DNat44>> {
        let (version, ch, ifaces) = self.parts();
        let (static_mappings, lb_mappings, identity_mappings) = match version {
            NatApiVersion::Ed => (
                ed::static_mapping_dump(ch, &ifaces)?,
                ed::lb_static_mapping_dump(ch)?,
                ed::identity_mapping_dump(ch, &ifaces)?,
            ),
            NatApiVersion::Ei => (
                ei::static_mapping_dump(ch, &ifaces)?,
                BTreeMap::new(),
                ei::identity_mapping_dump(ch, &ifaces)?,
            ),
        };

        let dnats = dnat::assemble_dnat_groups(static_mappings, lb_mappings, identity_mappings);
        debug!(groups = dnats.len(), "Dumped DNAT groups");
        Ok(dnats)
    }

    fn parts(&mut self) -> (NatApiVersion, &mut C, InterfaceResolver<'_>) {
        (
            self.version,
            &mut self.channel,
            InterfaceResolver::new(&*self.ifindex, &*self.dhcp),
        )
    }
}

/// Drains a multi-reply dump, failing on the first error.
fn dump_all<C, R>(ch: &mut C, req: R, what: &'static str) -> Result<Vec<R::Details>>
where
    C: Channel + ?Sized,
    R: DumpRequest,
{
    ch.dump(req)
        .and_then(|stream| stream.collect::<BinApiResult<Vec<_>>>())
        .map_err(NatPluginError::dump(what))
}

/// Collects every page of a cursor-paginated dump.
fn cursor_dump_all<C, R>(ch: &mut C, what: &'static str) -> Result<Vec<R::Details>>
where
    C: Channel + ?Sized,
    R: CursorRequest,
{
    ch.cursor_dump::<R>().map_err(NatPluginError::dump(what))
}

/// Resolves an interface name, logging unknown handles.
fn interface_name<'a>(ifaces: &InterfaceResolver<'a>, sw_if_index: InterfaceIndex) -> Option<&'a str> {
    let name = ifaces.name(sw_if_index);
    if name.is_none() {
        warn!(%sw_if_index, "Interface not found in the mapping");
    }
    name
}

/// Resolves an interface with its addresses, logging unknown handles.
fn resolve_interface(
    ifaces: &InterfaceResolver<'_>,
    sw_if_index: InterfaceIndex,
) -> Option<ResolvedInterface> {
    let resolved = ifaces.resolve(sw_if_index);
    if resolved.is_none() {
        warn!(%sw_if_index, "Interface not found in the mapping");
    }
    resolved
}
