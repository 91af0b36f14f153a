//! Typed access to the VPP binary API used by the NAT44 collector.
//!
//! This crate models the request, reply and details messages of the NAT44
//! plugins and the three ways they are exchanged over a connection, keeping
//! raw wire encodings (interface handles, fixed-width tags, return values)
//! behind type-safe wrappers.
//!
//! # Architecture
//!
//! - [`types`]: wire-level wrappers such as [`InterfaceIndex`] and [`Tag`]
//! - [`error`]: return value and transport error handling
//! - [`api`]: message structs for both NAT44 API generations
//! - [`message`]: the [`VppMessage`] registry and request/reply pairings
//! - [`channel`]: the [`Channel`] transport and the dump drivers
//! - [`replay`]: a scripted [`Channel`] for tests and offline snapshots
//!
//! # Example
//!
//! ```ignore
//! use vpp_binapi::api::nat44_ed::{Nat44AddressDump, Nat44EdOutputInterfaceGet};
//! use vpp_binapi::{BinApiResult, Channel, ChannelExt};
//!
//! fn count(ch: &mut dyn Channel) -> BinApiResult<usize> {
//!     let pools = ch.dump(Nat44AddressDump {})?.collect::<BinApiResult<Vec<_>>>()?;
//!     let outputs = ch.cursor_dump::<Nat44EdOutputInterfaceGet>()?;
//!     Ok(pools.len() + outputs.len())
//! }
//! ```

pub mod api;
pub mod channel;
pub mod error;
pub mod message;
pub mod replay;
pub mod types;

pub use channel::{Channel, ChannelExt, DumpStream, CURSOR_END};
pub use error::{BinApiError, BinApiResult, VppRetval};
pub use message::{CursorReply, CursorRequest, DumpRequest, Message, Reply, Request, VppMessage};
pub use replay::{ReplayChannel, ReplayScript};
pub use types::{InterfaceIndex, Ip4Address, Tag, TAG_LEN};
