//! ---
//! wmm_section: "02-messaging-envelope"
//! wmm_subsection: "module"
//! wmm_type: "source"
//! wmm_scope: "code"
//! wmm_description: "Common header values and their codec to the wire header carriers."
//! wmm_version: "v0.1.0"
//! wmm_owner: "tbd"
//! ---
//! Header codec.
//!
//! Every request, response, and event embeds one of three header shapes. The
//! `parse_*` functions read an already decoded wire header; the `load_*`
//! functions fill a wire header before the envelope is encoded. Identifiers and
//! result codes are mandatory and their absence is a parse failure; an absent
//! sink id reads as empty and an absent timestamp as zero.

use rand::Rng;
use serde::{Deserialize, Serialize};
use wmm_proto::gateway_api as wire;

use crate::error::{MessagingError, Result};
use crate::ids;
use crate::result_code::ResultCode;

/// Header carried by every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestHeader {
    /// Entity the request concerns (a sink on the gateway).
    pub source_id: String,
    /// Identifier echoed by the matching response.
    pub correlation_id: u64,
    /// Creation time in milliseconds since epoch.
    pub timestamp_ms: u64,
}

impl RequestHeader {
    /// Build a header stamped now, generating the correlation id when absent.
    ///
    /// `source_id` must not be empty; debug builds assert it.
    pub fn new(source_id: impl Into<String>, correlation_id: Option<u64>) -> Self {
        Self::with_rng(source_id, correlation_id, &mut rand::thread_rng())
    }

    /// Same as [`RequestHeader::new`] with an explicit random source.
    ///
    /// `source_id` must not be empty: an empty sink id is indistinguishable
    /// from an absent one once decoded.
    pub fn with_rng<R: Rng + ?Sized>(
        source_id: impl Into<String>,
        correlation_id: Option<u64>,
        rng: &mut R,
    ) -> Self {
        let source_id = source_id.into();
        debug_assert!(!source_id.is_empty(), "request source id must not be empty");
        Self {
            source_id,
            correlation_id: ids::resolve_id(correlation_id, rng),
            timestamp_ms: ids::now_ms(),
        }
    }
}

/// Header carried by every response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeader {
    /// Correlation id of the originating request.
    pub correlation_id: u64,
    /// Gateway that produced the response.
    pub responder_id: String,
    /// Outcome of the operation.
    pub result_code: ResultCode,
    /// Sub-resource the response concerns (a sink).
    pub source_id: String,
    /// Creation time in milliseconds since epoch.
    pub timestamp_ms: u64,
}

impl ResponseHeader {
    /// Build a header stamped now.
    pub fn new(
        correlation_id: u64,
        responder_id: impl Into<String>,
        result_code: ResultCode,
        source_id: impl Into<String>,
    ) -> Self {
        Self {
            correlation_id,
            responder_id: responder_id.into(),
            result_code,
            source_id: source_id.into(),
            timestamp_ms: ids::now_ms(),
        }
    }
}

/// Header carried by every event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventHeader {
    /// Gateway that emitted the event.
    pub responder_id: String,
    /// Sink the event concerns, when it concerns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// Instance identifier consumers use for deduplication.
    pub event_id: u64,
    /// Creation time in milliseconds since epoch.
    pub timestamp_ms: u64,
}

impl EventHeader {
    /// Build a header stamped now, generating the event id when absent.
    pub fn new(responder_id: impl Into<String>, event_id: Option<u64>) -> Self {
        Self::with_rng(responder_id, event_id, &mut rand::thread_rng())
    }

    /// Same as [`EventHeader::new`] with an explicit random source.
    ///
    /// `responder_id` must not be empty.
    pub fn with_rng<R: Rng + ?Sized>(
        responder_id: impl Into<String>,
        event_id: Option<u64>,
        rng: &mut R,
    ) -> Self {
        let responder_id = responder_id.into();
        debug_assert!(!responder_id.is_empty(), "event responder id must not be empty");
        Self {
            responder_id,
            source_id: None,
            event_id: ids::resolve_id(event_id, rng),
            timestamp_ms: ids::now_ms(),
        }
    }
}

/// Read a request header. The correlation id must be present.
pub fn parse_request_header(raw: &wire::RequestHeader) -> Result<RequestHeader> {
    const CONTEXT: &str = "RequestHeader";
    Ok(RequestHeader {
        source_id: raw.sink_id.clone().unwrap_or_default(),
        correlation_id: present(raw.req_id, CONTEXT, "req_id")?,
        timestamp_ms: raw.time_ms_epoch.unwrap_or_default(),
    })
}

/// Write a request header into its wire carrier.
pub fn load_request_header(target: &mut wire::RequestHeader, header: &RequestHeader) {
    target.req_id = Some(header.correlation_id);
    target.sink_id = Some(header.source_id.clone());
    target.time_ms_epoch = Some(header.timestamp_ms);
}

/// Read a response header.
///
/// Correlation id, gateway id, and result code must be present. The result
/// code is the one field with a closed value set; anything outside it is a
/// parse failure.
pub fn parse_response_header(raw: &wire::ResponseHeader) -> Result<ResponseHeader> {
    const CONTEXT: &str = "ResponseHeader";
    Ok(ResponseHeader {
        correlation_id: present(raw.req_id, CONTEXT, "req_id")?,
        responder_id: present(raw.gw_id.clone(), CONTEXT, "gw_id")?,
        result_code: ResultCode::from_wire(present(raw.res, CONTEXT, "res")?)?,
        source_id: raw.sink_id.clone().unwrap_or_default(),
        timestamp_ms: raw.time_ms_epoch.unwrap_or_default(),
    })
}

/// Write a response header into its wire carrier.
pub fn load_response_header(target: &mut wire::ResponseHeader, header: &ResponseHeader) {
    target.req_id = Some(header.correlation_id);
    target.gw_id = Some(header.responder_id.clone());
    target.res = Some(header.result_code.to_wire());
    target.sink_id = Some(header.source_id.clone());
    target.time_ms_epoch = Some(header.timestamp_ms);
}

/// Read an event header. Gateway id and event id must be present.
pub fn parse_event_header(raw: &wire::EventHeader) -> Result<EventHeader> {
    const CONTEXT: &str = "EventHeader";
    Ok(EventHeader {
        responder_id: present(raw.gw_id.clone(), CONTEXT, "gw_id")?,
        source_id: raw.sink_id.clone(),
        event_id: present(raw.event_id, CONTEXT, "event_id")?,
        timestamp_ms: raw.time_ms_epoch.unwrap_or_default(),
    })
}

/// Write an event header into its wire carrier.
pub fn load_event_header(target: &mut wire::EventHeader, header: &EventHeader) {
    target.gw_id = Some(header.responder_id.clone());
    target.sink_id = header.source_id.clone();
    target.event_id = Some(header.event_id);
    target.time_ms_epoch = Some(header.timestamp_ms);
}

/// A decoded operation must carry its header sub-message.
pub(crate) fn require<'a, T>(header: Option<&'a T>, context: &'static str) -> Result<&'a T> {
    header.ok_or_else(|| MessagingError::parsing(context, "missing header"))
}

/// A mandatory field must be present on the wire.
pub(crate) fn present<T>(value: Option<T>, context: &'static str, field: &str) -> Result<T> {
    value.ok_or_else(|| MessagingError::parsing(context, format!("missing {field}")))
}
