//! Binary API error types and return value handling.
//!
//! Every reply message that acknowledges a request carries an `i32` return
//! value. This module converts those raw values into Rust's `Result` type and
//! describes the transport failures a [`Channel`](crate::Channel) can report.

use std::fmt;
use thiserror::Error;

/// Return values reported by the dataplane API.
///
/// These correspond to the `VNET_API_ERROR_*` codes returned in the `retval`
/// field of reply messages.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VppRetval {
    Success = 0,
    Unspecified = -1,
    InvalidSwIfIndex = -2,
    NoSuchFib = -3,
    NoSuchInnerFib = -4,
    NoSuchLabel = -5,
    NoSuchEntry = -6,
    InvalidValue = -7,
    InvalidValue2 = -8,
    Unimplemented = -9,
    InvalidSwIfIndex2 = -10,
}

impl VppRetval {
    /// Creates a VppRetval from a raw i32 value.
    ///
    /// Codes without a dedicated variant collapse to `Unspecified`; the raw
    /// value is kept by [`BinApiError::Retval`].
    pub fn from_raw(retval: i32) -> Self {
        match retval {
            0 => VppRetval::Success,
            -2 => VppRetval::InvalidSwIfIndex,
            -3 => VppRetval::NoSuchFib,
            -4 => VppRetval::NoSuchInnerFib,
            -5 => VppRetval::NoSuchLabel,
            -6 => VppRetval::NoSuchEntry,
            -7 => VppRetval::InvalidValue,
            -8 => VppRetval::InvalidValue2,
            -9 => VppRetval::Unimplemented,
            -10 => VppRetval::InvalidSwIfIndex2,
            _ => VppRetval::Unspecified,
        }
    }

    /// Returns true if the value indicates success.
    pub fn is_success(&self) -> bool {
        *self == VppRetval::Success
    }
}

impl fmt::Display for VppRetval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VppRetval::Success => "VNET_API_ERROR_OK",
            VppRetval::Unspecified => "VNET_API_ERROR_UNSPECIFIED",
            VppRetval::InvalidSwIfIndex => "VNET_API_ERROR_INVALID_SW_IF_INDEX",
            VppRetval::NoSuchFib => "VNET_API_ERROR_NO_SUCH_FIB",
            VppRetval::NoSuchInnerFib => "VNET_API_ERROR_NO_SUCH_INNER_FIB",
            VppRetval::NoSuchLabel => "VNET_API_ERROR_NO_SUCH_LABEL",
            VppRetval::NoSuchEntry => "VNET_API_ERROR_NO_SUCH_ENTRY",
            VppRetval::InvalidValue => "VNET_API_ERROR_INVALID_VALUE",
            VppRetval::InvalidValue2 => "VNET_API_ERROR_INVALID_VALUE_2",
            VppRetval::Unimplemented => "VNET_API_ERROR_UNIMPLEMENTED",
            VppRetval::InvalidSwIfIndex2 => "VNET_API_ERROR_INVALID_SW_IF_INDEX_2",
        };
        write!(f, "{}", s)
    }
}

/// Error type for binary API calls.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BinApiError {
    /// The dataplane answered with a non-zero return value.
    #[error("{message} returned {retval} ({raw})")]
    Retval {
        message: &'static str,
        retval: VppRetval,
        raw: i32,
    },

    /// The underlying connection failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// A reply of the wrong type arrived.
    #[error("unexpected reply to {request}: expected {expected}, received {received}")]
    UnexpectedReply {
        request: &'static str,
        expected: &'static str,
        received: &'static str,
    },

    /// The channel signalled end of stream where a reply was mandatory.
    #[error("no reply received for {request}")]
    NoReply { request: &'static str },
}

impl BinApiError {
    /// Checks a raw reply return value for the given message.
    pub fn check_retval(message: &'static str, raw: i32) -> BinApiResult<()> {
        let retval = VppRetval::from_raw(raw);
        if retval.is_success() {
            Ok(())
        } else {
            Err(BinApiError::Retval {
                message,
                retval,
                raw,
            })
        }
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        BinApiError::Transport(message.into())
    }

    /// Returns the raw return value if this is a Retval error.
    pub fn retval(&self) -> Option<i32> {
        match self {
            BinApiError::Retval { raw, .. } => Some(*raw),
            _ => None,
        }
    }
}

/// Result type for binary API calls.
pub type BinApiResult<T> = Result<T, BinApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retval_from_raw() {
        assert_eq!(VppRetval::from_raw(0), VppRetval::Success);
        assert_eq!(VppRetval::from_raw(-6), VppRetval::NoSuchEntry);
        assert_eq!(VppRetval::from_raw(-999), VppRetval::Unspecified);
    }

    #[test]
    fn test_check_retval() {
        assert!(BinApiError::check_retval("nat44_show_running_config_reply", 0).is_ok());

        let err = BinApiError::check_retval("nat44_show_running_config_reply", -6).unwrap_err();
        assert_eq!(err.retval(), Some(-6));
        assert_eq!(
            err.to_string(),
            "nat44_show_running_config_reply returned VNET_API_ERROR_NO_SUCH_ENTRY (-6)"
        );
    }

    #[test]
    fn test_unknown_retval_keeps_raw_value() {
        let err = BinApiError::check_retval("nat44_ed_output_interface_get_reply", -142)
            .unwrap_err();
        assert!(matches!(
            err,
            BinApiError::Retval {
                retval: VppRetval::Unspecified,
                raw: -142,
                ..
            }
        ));
    }

    #[test]
    fn test_transport_display() {
        let err = BinApiError::transport("socket closed");
        assert_eq!(err.to_string(), "transport error: socket closed");
        assert_eq!(err.retval(), None);
    }
}
