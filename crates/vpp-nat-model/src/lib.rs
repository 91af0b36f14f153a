//! Declarative NAT44 configuration model.
//!
//! These are the normalized objects reconstructed from dataplane state and
//! compared against desired state by the reconciliation engine:
//!
//! - [`Nat44Global`]: global NAT44 settings
//! - [`Nat44Interface`]: NAT roles of one interface
//! - [`Nat44AddressPool`]: a contiguous range of translation addresses
//! - [`DNat44`]: a labelled group of static and identity mappings
//! - [`Protocol`], [`TwiceNatMode`]: enumerations shared by the mappings
//!
//! Everything here is plain owned data, built fresh by each dump and never
//! mutated afterwards.

mod dnat;
mod global;
mod protocol;

pub use dnat::{DNat44, IdentityMapping, LocalIp, StaticMapping};
pub use global::{Nat44AddressPool, Nat44Global, Nat44GlobalInterface, Nat44Interface};
pub use protocol::{Protocol, TwiceNatMode};

/// Error type for parsing model enumerations from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid protocol: {0}")]
    InvalidProtocol(String),

    #[error("invalid twice-NAT mode: {0}")]
    InvalidTwiceNatMode(String),
}
