//! Message registry and typed request/reply pairings.
//!
//! A [`Channel`](crate::Channel) moves opaque [`VppMessage`] values. The traits
//! in this module recover the static types on both ends:
//!
//! - [`Message`]: a concrete message with its API name
//! - [`Request`]: a request answered by exactly one reply
//! - [`DumpRequest`]: a request answered by a stream of details
//! - [`CursorRequest`]: a paginated request whose pages end with a reply
//!   carrying the next cursor

use crate::api::nat44_ed::*;
use crate::api::nat44_ei::*;
use serde::{Deserialize, Serialize};

/// A single typed API message.
pub trait Message: Sized + Into<VppMessage> {
    /// API message name, e.g. `nat44_address_dump`.
    const NAME: &'static str;

    /// Unwraps the message, handing the message back on mismatch.
    fn try_from_message(msg: VppMessage) -> Result<Self, VppMessage>;
}

/// A reply that acknowledges a request with a return value.
pub trait Reply: Message {
    fn retval(&self) -> i32;
}

/// A page terminator of a cursor-paginated request.
pub trait CursorReply: Reply {
    fn cursor(&self) -> u32;
}

/// A request answered by exactly one reply.
pub trait Request: Message {
    type Reply: Reply;
}

/// A request answered by zero or more details and an end marker.
pub trait DumpRequest: Message {
    type Details: Message;
}

/// A cursor-paginated request.
pub trait CursorRequest: Message {
    type Details: Message;
    type Reply: CursorReply;

    fn with_cursor(cursor: u32) -> Self;
}

macro_rules! define_messages {
    ($($msg:ident => $name:literal),* $(,)?) => {
        /// Every message the NAT44 collector exchanges with the dataplane.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub enum VppMessage {
            $($msg($msg),)*
        }

        impl VppMessage {
            /// Returns the API name of the wrapped message.
            pub fn name(&self) -> &'static str {
                match self {
                    $(VppMessage::$msg(_) => $name,)*
                }
            }
        }

        $(
            impl From<$msg> for VppMessage {
                fn from(msg: $msg) -> Self {
                    VppMessage::$msg(msg)
                }
            }

            impl Message for $msg {
                const NAME: &'static str = $name;

                fn try_from_message(msg: VppMessage) -> Result<Self, VppMessage> {
                    match msg {
                        VppMessage::$msg(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

define_messages! {
    // endpoint-dependent
    Nat44ShowRunningConfig => "nat44_show_running_config",
    Nat44ShowRunningConfigReply => "nat44_show_running_config_reply",
    Nat44InterfaceDump => "nat44_interface_dump",
    Nat44InterfaceDetails => "nat44_interface_details",
    Nat44EdOutputInterfaceGet => "nat44_ed_output_interface_get",
    Nat44EdOutputInterfaceGetReply => "nat44_ed_output_interface_get_reply",
    Nat44EdOutputInterfaceDetails => "nat44_ed_output_interface_details",
    Nat44AddressDump => "nat44_address_dump",
    Nat44AddressDetails => "nat44_address_details",
    Nat44StaticMappingDump => "nat44_static_mapping_dump",
    Nat44StaticMappingDetails => "nat44_static_mapping_details",
    Nat44LbStaticMappingDump => "nat44_lb_static_mapping_dump",
    Nat44LbStaticMappingDetails => "nat44_lb_static_mapping_details",
    Nat44IdentityMappingDump => "nat44_identity_mapping_dump",
    Nat44IdentityMappingDetails => "nat44_identity_mapping_details",
    // endpoint-independent
    Nat44EiShowRunningConfig => "nat44_ei_show_running_config",
    Nat44EiShowRunningConfigReply => "nat44_ei_show_running_config_reply",
    Nat44EiInterfaceDump => "nat44_ei_interface_dump",
    Nat44EiInterfaceDetails => "nat44_ei_interface_details",
    Nat44EiOutputInterfaceGet => "nat44_ei_output_interface_get",
    Nat44EiOutputInterfaceGetReply => "nat44_ei_output_interface_get_reply",
    Nat44EiOutputInterfaceDetails => "nat44_ei_output_interface_details",
    Nat44EiAddressDump => "nat44_ei_address_dump",
    Nat44EiAddressDetails => "nat44_ei_address_details",
    Nat44EiStaticMappingDump => "nat44_ei_static_mapping_dump",
    Nat44EiStaticMappingDetails => "nat44_ei_static_mapping_details",
    Nat44EiIdentityMappingDump => "nat44_ei_identity_mapping_dump",
    Nat44EiIdentityMappingDetails => "nat44_ei_identity_mapping_details",
}

macro_rules! impl_reply {
    ($($reply:ident),* $(,)?) => {
        $(
            impl Reply for $reply {
                fn retval(&self) -> i32 {
                    self.retval
                }
            }
        )*
    };
}

impl_reply!(
    Nat44ShowRunningConfigReply,
    Nat44EdOutputInterfaceGetReply,
    Nat44EiShowRunningConfigReply,
    Nat44EiOutputInterfaceGetReply,
);

impl CursorReply for Nat44EdOutputInterfaceGetReply {
    fn cursor(&self) -> u32 {
        self.cursor
    }
}

impl CursorReply for Nat44EiOutputInterfaceGetReply {
    fn cursor(&self) -> u32 {
        self.cursor
    }
}

impl Request for Nat44ShowRunningConfig {
    type Reply = Nat44ShowRunningConfigReply;
}

impl Request for Nat44EiShowRunningConfig {
    type Reply = Nat44EiShowRunningConfigReply;
}

macro_rules! impl_dump {
    ($($req:ident => $details:ident),* $(,)?) => {
        $(
            impl DumpRequest for $req {
                type Details = $details;
            }
        )*
    };
}

impl_dump!(
    Nat44InterfaceDump => Nat44InterfaceDetails,
    Nat44AddressDump => Nat44AddressDetails,
    Nat44StaticMappingDump => Nat44StaticMappingDetails,
    Nat44LbStaticMappingDump => Nat44LbStaticMappingDetails,
    Nat44IdentityMappingDump => Nat44IdentityMappingDetails,
    Nat44EiInterfaceDump => Nat44EiInterfaceDetails,
    Nat44EiAddressDump => Nat44EiAddressDetails,
    Nat44EiStaticMappingDump => Nat44EiStaticMappingDetails,
    Nat44EiIdentityMappingDump => Nat44EiIdentityMappingDetails,
);

impl CursorRequest for Nat44EdOutputInterfaceGet {
    type Details = Nat44EdOutputInterfaceDetails;
    type Reply = Nat44EdOutputInterfaceGetReply;

    fn with_cursor(cursor: u32) -> Self {
        Self { cursor }
    }
}

impl CursorRequest for Nat44EiOutputInterfaceGet {
    type Details = Nat44EiOutputInterfaceDetails;
    type Reply = Nat44EiOutputInterfaceGetReply;

    fn with_cursor(cursor: u32) -> Self {
        Self { cursor }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Ip4Address;

    #[test]
    fn test_message_names() {
        let msg: VppMessage = Nat44AddressDump {}.into();
        assert_eq!(msg.name(), "nat44_address_dump");
        assert_eq!(Nat44EiAddressDetails::NAME, "nat44_ei_address_details");
    }

    #[test]
    fn test_try_from_message() {
        let details = Nat44AddressDetails {
            ip_address: Ip4Address::new(10, 0, 0, 1),
            ..Default::default()
        };
        let msg = VppMessage::from(details.clone());
        assert_eq!(Nat44AddressDetails::try_from_message(msg.clone()), Ok(details));

        let mismatch = Nat44EiAddressDetails::try_from_message(msg.clone());
        assert_eq!(mismatch, Err(msg));
    }

    #[test]
    fn test_cursor_request() {
        let req = Nat44EdOutputInterfaceGet::with_cursor(7);
        assert_eq!(req.cursor, 7);
    }

    #[test]
    fn test_serde_externally_tagged() {
        let msg = VppMessage::from(Nat44EdOutputInterfaceGetReply {
            retval: 0,
            cursor: u32::MAX,
        });
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.starts_with("{\"Nat44EdOutputInterfaceGetReply\""));
        let back: VppMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
