//! Collection of the requested NAT44 resources into one document.

use crate::config::DumpResource;
use crate::error::Result;
use crate::vppcalls::NatVppHandler;
use serde::Serialize;
use tracing::info;
use vpp_binapi::Channel;
use vpp_nat_model::{DNat44, Nat44AddressPool, Nat44Global, Nat44Interface};

/// NAT44 state read from the dataplane; unrequested sections are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Nat44State {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<Nat44Global>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interfaces: Option<Vec<Nat44Interface>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_pools: Option<Vec<Nat44AddressPool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnat: Option<Vec<DNat44>>,
}

/// Dumps each requested resource in turn. The first failure aborts.
pub fn collect_state<C: Channel>(
    handler: &mut NatVppHandler<C>,
    resources: &[DumpResource],
    dump_deprecated: bool,
) -> Result<Nat44State> {
    let mut state = Nat44State::default();

    for resource in resources {
        match resource {
            DumpResource::Global => {
                state.global = Some(handler.nat44_global_config_dump(dump_deprecated)?);
            }
            DumpResource::Interfaces => {
                state.interfaces = Some(handler.nat44_interfaces_dump()?);
            }
            DumpResource::AddressPools => {
                state.address_pools = Some(handler.nat44_address_pools_dump()?);
            }
            DumpResource::Dnat => {
                state.dnat = Some(handler.dnat44_dump()?);
            }
        }
        info!(%resource, "Dumped");
    }

    Ok(state)
}
