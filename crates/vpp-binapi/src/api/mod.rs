//! NAT44 message definitions.
//!
//! The NAT plugin exposes two API generations that cannot be active at the
//! same time:
//!
//! - [`nat44_ed`]: the endpoint-dependent plugin
//! - [`nat44_ei`]: the legacy endpoint-independent plugin
//!
//! [`nat_types`] holds the types both generations share.

pub mod nat44_ed;
pub mod nat44_ei;
pub mod nat_types;

pub use nat_types::{NatConfigFlags, NatLogLevel, NatTimeouts};
pub use nat44_ei::Nat44EiConfigFlags;
