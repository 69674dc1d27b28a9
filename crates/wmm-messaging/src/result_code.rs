//! ---
//! wmm_section: "02-messaging-envelope"
//! wmm_subsection: "module"
//! wmm_type: "source"
//! wmm_scope: "code"
//! wmm_description: "Closed set of operation outcome codes shared by all responses."
//! wmm_version: "v0.1.0"
//! wmm_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, FromRepr, IntoStaticStr};

use crate::error::{MessagingError, Result};

/// Outcome of a gateway operation, carried in every response header.
///
/// Discriminants equal the wire values of `ErrorCode`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    FromRepr,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[repr(i32)]
#[allow(missing_docs)]
pub enum ResultCode {
    Ok = 0,
    InternalError = 1,
    InvalidSinkId = 2,
    InvalidRole = 3,
    InvalidNetworkAddress = 4,
    InvalidNetworkChannel = 5,
    InvalidChannelMap = 6,
    InvalidNetworkKeys = 7,
    InvalidAcRange = 8,
    InvalidSinkState = 9,
    InvalidDestAddress = 10,
    InvalidDestEndpoint = 11,
    InvalidSrcEndpoint = 12,
    InvalidQos = 13,
    InvalidDataPayload = 14,
    InvalidScratchpad = 15,
    InvalidScratchpadSize = 16,
    InvalidSequenceNumber = 17,
    InvalidRebootDelay = 18,
    InvalidDiagInterval = 19,
    InvalidAppConfig = 20,
    InvalidParam = 21,
    NoScratchpadPresent = 22,
    AccessDenied = 23,
    RequestNeedsSinkId = 24,
    InvalidMaxHopCount = 25,
    SinkOutOfMemory = 26,
    SinkTimeout = 27,
}

impl ResultCode {
    /// Whether the operation succeeded.
    pub fn is_success(self) -> bool {
        self == Self::Ok
    }

    /// Raw value written into the `res` field.
    pub fn to_wire(self) -> i32 {
        self as i32
    }

    /// Interpret a raw `res` value; values outside the set fail to parse.
    pub fn from_wire(raw: i32) -> Result<Self> {
        Self::from_repr(raw).ok_or_else(|| {
            MessagingError::parsing("ResponseHeader", format!("unknown result code {raw}"))
        })
    }
}
