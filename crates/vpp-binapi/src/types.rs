//! Fixed-layout wire types shared by the NAT44 messages.
//!
//! Reply messages carry addresses as fixed 4-byte buffers, interface handles
//! as raw `u32` software interface indexes and labels as NUL-padded
//! fixed-length strings. These wrappers keep those encodings distinct from the
//! plain Rust types they decode into.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// Length of the `tag` buffer carried by mapping messages.
pub const TAG_LEN: usize = 64;

/// A software interface index (`sw_if_index`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterfaceIndex(pub u32);

impl InterfaceIndex {
    /// Marks a record that is not bound to any interface (`~0`).
    pub const NONE: Self = InterfaceIndex(u32::MAX);

    /// Returns the raw index value.
    pub const fn as_raw(&self) -> u32 {
        self.0
    }

    /// Returns true unless this is the `NONE` marker.
    pub const fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }
}

impl Default for InterfaceIndex {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for InterfaceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An IPv4 address as carried on the wire (network byte order).
///
/// Serialized in snapshots as dotted-quad text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Ipv4Addr", into = "Ipv4Addr")]
pub struct Ip4Address(pub [u8; 4]);

impl Ip4Address {
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Ip4Address([a, b, c, d])
    }

    pub const fn to_ipv4(self) -> Ipv4Addr {
        Ipv4Addr::new(self.0[0], self.0[1], self.0[2], self.0[3])
    }
}

impl From<Ipv4Addr> for Ip4Address {
    fn from(addr: Ipv4Addr) -> Self {
        Ip4Address(addr.octets())
    }
}

impl From<Ip4Address> for Ipv4Addr {
    fn from(addr: Ip4Address) -> Self {
        addr.to_ipv4()
    }
}

impl fmt::Display for Ip4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_ipv4().fmt(f)
    }
}

/// A NUL-padded fixed-length label (`string tag[64]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Wraps raw buffer contents as received, padding included.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Tag(raw.into())
    }

    /// Builds a tag the way the dataplane stores it: NUL-padded to
    /// [`TAG_LEN`] bytes, truncated if longer.
    pub fn padded(label: &str) -> Self {
        let mut raw: String = label.chars().take(TAG_LEN).collect();
        while raw.len() < TAG_LEN {
            raw.push('\0');
        }
        Tag(raw)
    }

    /// Returns the label with trailing NUL padding removed.
    pub fn label(&self) -> &str {
        self.0.trim_end_matches('\0')
    }

    /// Returns the raw buffer contents.
    pub fn as_raw(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interface_index_none() {
        assert!(!InterfaceIndex::NONE.is_some());
        assert!(InterfaceIndex(1).is_some());
        assert_eq!(InterfaceIndex::default(), InterfaceIndex::NONE);
    }

    #[test]
    fn test_ip4_address_conversion() {
        let addr = Ip4Address::new(10, 0, 0, 1);
        assert_eq!(addr.to_ipv4(), Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(Ip4Address::from(Ipv4Addr::new(192, 168, 1, 1)).0, [192, 168, 1, 1]);
        assert_eq!(addr.to_string(), "10.0.0.1");
    }

    #[test]
    fn test_ip4_address_serde_text() {
        let json = serde_json::to_string(&Ip4Address::new(172, 16, 0, 9)).unwrap();
        assert_eq!(json, "\"172.16.0.9\"");
        let back: Ip4Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Ip4Address::new(172, 16, 0, 9));
    }

    #[test]
    fn test_tag_trims_padding() {
        let tag = Tag::padded("web");
        assert_eq!(tag.as_raw().len(), TAG_LEN);
        assert_eq!(tag.label(), "web");
    }

    #[test]
    fn test_all_nul_tag_is_empty_label() {
        let tag = Tag::from_raw("\0".repeat(TAG_LEN));
        assert_eq!(tag.label(), "");
        assert_eq!(Tag::default().label(), "");
    }
}
