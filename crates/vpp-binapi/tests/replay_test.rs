//! Drives the typed channel helpers over a JSON replay script.

use pretty_assertions::assert_eq;
use vpp_binapi::api::nat44_ei::*;
use vpp_binapi::{
    BinApiError, ChannelExt, InterfaceIndex, Ip4Address, Message, ReplayChannel, ReplayScript,
};

const SCRIPT: &str = r#"{
    "replies": {
        "nat44_ei_show_running_config": [[
            {"Nat44EiShowRunningConfigReply": {"retval": 0, "forwarding_enabled": true, "sessions": 10240}}
        ]],
        "nat44_ei_address_dump": [[
            {"Nat44EiAddressDetails": {"ip_address": "203.0.113.1", "vrf_id": 0}},
            {"Nat44EiAddressDetails": {"ip_address": "203.0.113.2", "vrf_id": 5}}
        ]],
        "nat44_ei_output_interface_get": [
            [
                {"Nat44EiOutputInterfaceDetails": {"sw_if_index": 1}},
                {"Nat44EiOutputInterfaceGetReply": {"retval": 0, "cursor": 7}}
            ],
            [
                {"Nat44EiOutputInterfaceDetails": {"sw_if_index": 2}},
                {"Nat44EiOutputInterfaceGetReply": {"retval": 0, "cursor": 4294967295}}
            ]
        ],
        "nat44_ei_interface_dump": [[
            {"Nat44EiShowRunningConfigReply": {"retval": 0}}
        ]]
    },
    "failures": {
        "nat44_ei_identity_mapping_dump": "VPP API socket closed"
    }
}"#;

fn channel() -> ReplayChannel {
    let script: ReplayScript = serde_json::from_str(SCRIPT).unwrap();
    ReplayChannel::from_script(script)
}

#[test]
fn test_request_reply() {
    let mut ch = channel();
    let reply = ch.request(Nat44EiShowRunningConfig {}).unwrap();
    assert!(reply.forwarding_enabled);
    assert_eq!(reply.sessions, 10240);
}

#[test]
fn test_dump_stream() {
    let mut ch = channel();
    let addresses: Vec<_> = ch
        .dump(Nat44EiAddressDump {})
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        addresses,
        vec![
            Nat44EiAddressDetails {
                ip_address: Ip4Address::new(203, 0, 113, 1),
                vrf_id: 0,
            },
            Nat44EiAddressDetails {
                ip_address: Ip4Address::new(203, 0, 113, 2),
                vrf_id: 5,
            },
        ]
    );
}

#[test]
fn test_cursor_pages() {
    let mut ch = channel();
    let details = ch.cursor_dump::<Nat44EiOutputInterfaceGet>().unwrap();
    let indexes: Vec<InterfaceIndex> = details.iter().map(|d| d.sw_if_index).collect();
    assert_eq!(indexes, vec![InterfaceIndex(1), InterfaceIndex(2)]);

    let cursors: Vec<_> = ch
        .sent()
        .iter()
        .map(|msg| match msg {
            vpp_binapi::VppMessage::Nat44EiOutputInterfaceGet(req) => req.cursor,
            other => panic!("unexpected request {}", other.name()),
        })
        .collect();
    assert_eq!(cursors, vec![0, 7]);
}

#[test]
fn test_unexpected_reply_type() {
    let mut ch = channel();
    let err = ch
        .dump(Nat44EiInterfaceDump {})
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap_err();
    assert_eq!(
        err,
        BinApiError::UnexpectedReply {
            request: Nat44EiInterfaceDump::NAME,
            expected: Nat44EiInterfaceDetails::NAME,
            received: Nat44EiShowRunningConfigReply::NAME,
        }
    );
}

#[test]
fn test_scripted_transport_failure() {
    let mut ch = channel();
    let err = ch.dump(Nat44EiIdentityMappingDump {}).err().unwrap();
    assert_eq!(err, BinApiError::Transport("VPP API socket closed".to_string()));
    assert_eq!(ch.sent_count(Nat44EiIdentityMappingDump::NAME), 1);
}

#[test]
fn test_unscripted_request_has_no_reply() {
    let mut ch = channel();
    let err = ch.request(vpp_binapi::api::nat44_ed::Nat44ShowRunningConfig {}).unwrap_err();
    assert!(matches!(err, BinApiError::NoReply { .. }));
}
