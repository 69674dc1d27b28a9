//! ---
//! wmm_section: "02-messaging-envelope"
//! wmm_subsection: "module"
//! wmm_type: "source"
//! wmm_scope: "code"
//! wmm_description: "Gateway status event and the version gate on the inbound path."
//! wmm_version: "v0.1.0"
//! wmm_owner: "tbd"
//! ---
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use wmm_proto::gateway_api::{self as wire, OnOffState};

use crate::envelope::{MessageKind, Operation};
use crate::error::Result;
use crate::header::{self, EventHeader};
use crate::message::{self, TypedMessage};
use crate::version::{self, MESSAGE_DEFINITION_VERSION};

/// Reachability of a gateway as announced in its status event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GatewayState {
    /// Connected to the backend.
    Online,
    /// Disconnected; usually published as a last will by the broker.
    Offline,
}

impl GatewayState {
    fn to_wire(self) -> i32 {
        match self {
            Self::Online => OnOffState::On as i32,
            Self::Offline => OnOffState::Off as i32,
        }
    }

    // Anything but ON reads as offline.
    fn from_wire(raw: i32) -> Self {
        if raw == OnOffState::On as i32 {
            Self::Online
        } else {
            Self::Offline
        }
    }
}

/// Unsolicited notification that a gateway went online or offline.
///
/// The message definition version is always [`MESSAGE_DEFINITION_VERSION`]:
/// it is stamped on encode and enforced on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEvent {
    #[serde(flatten)]
    header: EventHeader,
    state: GatewayState,
    version: u32,
}

impl StatusEvent {
    /// Build an event with a freshly drawn event id.
    pub fn new(responder_id: impl Into<String>, state: GatewayState) -> Self {
        Self::with_event_id(responder_id, state, None)
    }

    /// Build an event, drawing an event id only when `event_id` is `None`.
    pub fn with_event_id(
        responder_id: impl Into<String>,
        state: GatewayState,
        event_id: Option<u64>,
    ) -> Self {
        Self::with_rng(responder_id, state, event_id, &mut rand::thread_rng())
    }

    /// Same as [`StatusEvent::with_event_id`] with an explicit random source.
    pub fn with_rng<R: Rng + ?Sized>(
        responder_id: impl Into<String>,
        state: GatewayState,
        event_id: Option<u64>,
        rng: &mut R,
    ) -> Self {
        Self {
            header: EventHeader::with_rng(responder_id, event_id, rng),
            state,
            version: MESSAGE_DEFINITION_VERSION,
        }
    }

    /// Override the creation timestamp.
    pub fn with_timestamp_ms(mut self, timestamp_ms: u64) -> Self {
        self.header.timestamp_ms = timestamp_ms;
        self
    }

    /// Header fields.
    pub fn header(&self) -> &EventHeader {
        &self.header
    }

    /// Gateway announcing its state.
    pub fn responder_id(&self) -> &str {
        &self.header.responder_id
    }

    /// Instance identifier used for deduplication.
    pub fn event_id(&self) -> u64 {
        self.header.event_id
    }

    /// Creation time in milliseconds since epoch.
    pub fn timestamp_ms(&self) -> u64 {
        self.header.timestamp_ms
    }

    /// Announced state.
    pub fn state(&self) -> GatewayState {
        self.state
    }

    /// Message definition version the event was produced with.
    pub fn version(&self) -> u32 {
        self.version
    }
}

impl TypedMessage for StatusEvent {
    const KIND: MessageKind = MessageKind::StatusEvent;
    const NAME: &'static str = "StatusEvent";

    fn from_operation(operation: Operation) -> Result<Self> {
        let Operation::StatusEvent(event) = operation else {
            return Err(message::unexpected::<Self>(&operation));
        };
        let found = header::present(event.version, Self::NAME, "version")?;
        version::ensure_supported(found)?;
        let raw = header::require(event.header.as_ref(), Self::NAME)?;
        Ok(Self {
            header: header::parse_event_header(raw)?,
            state: GatewayState::from_wire(header::present(event.state, Self::NAME, "state")?),
            version: found,
        })
    }

    fn to_operation(&self) -> Operation {
        let mut event = wire::StatusEvent::default();
        header::load_event_header(event.header.get_or_insert_with(Default::default), &self.header);
        event.version = Some(MESSAGE_DEFINITION_VERSION);
        event.state = Some(self.state.to_wire());
        Operation::StatusEvent(event)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::envelope;
    use crate::error::MessagingError;

    fn raw_event(version: u32, state: i32) -> wire::StatusEvent {
        wire::StatusEvent {
            header: Some(wire::EventHeader {
                gw_id: Some("gw-1".into()),
                sink_id: None,
                event_id: Some(10),
                time_ms_epoch: Some(1),
            }),
            version: Some(version),
            state: Some(state),
        }
    }

    fn parse_raw(raw: wire::StatusEvent) -> Result<StatusEvent> {
        StatusEvent::from_payload(&envelope::encode(Operation::StatusEvent(raw)))
    }

    #[test]
    fn online_round_trip_carries_the_supported_version() {
        let event = StatusEvent::new("gw-1", GatewayState::Online);
        let parsed = StatusEvent::from_payload(&event.payload()).unwrap();
        assert_eq!(parsed.state(), GatewayState::Online);
        assert_eq!(parsed.version(), MESSAGE_DEFINITION_VERSION);
        assert_eq!(parsed, event);
    }

    #[test]
    fn offline_round_trip() {
        let event = StatusEvent::with_rng(
            "gw-2",
            GatewayState::Offline,
            None,
            &mut StdRng::seed_from_u64(9),
        );
        let parsed = StatusEvent::from_payload(&event.payload()).unwrap();
        assert_eq!(parsed.state(), GatewayState::Offline);
        assert_eq!(parsed.event_id(), event.event_id());
    }

    #[test]
    fn next_version_is_rejected_as_fatal() {
        let bytes = envelope::encode(Operation::StatusEvent(raw_event(
            MESSAGE_DEFINITION_VERSION + 1,
            OnOffState::On as i32,
        )));
        let err = StatusEvent::from_payload(&bytes).unwrap_err();
        assert_eq!(
            err,
            MessagingError::VersionMismatch {
                expected: MESSAGE_DEFINITION_VERSION,
                found: MESSAGE_DEFINITION_VERSION + 1,
            }
        );
        assert!(err.is_fatal());
    }

    #[test]
    fn version_is_checked_before_the_header() {
        let mut raw = raw_event(7, OnOffState::Off as i32);
        raw.header = None;
        let bytes = envelope::encode(Operation::StatusEvent(raw));
        assert!(matches!(
            StatusEvent::from_payload(&bytes),
            Err(MessagingError::VersionMismatch { found: 7, .. })
        ));
    }

    #[test]
    fn absent_version_is_a_parse_error() {
        let mut raw = raw_event(MESSAGE_DEFINITION_VERSION, OnOffState::On as i32);
        raw.version = None;
        let err = parse_raw(raw).unwrap_err();
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "cannot parse StatusEvent payload: missing version");
    }

    #[test]
    fn absent_state_is_a_parse_error_not_online() {
        let mut raw = raw_event(MESSAGE_DEFINITION_VERSION, OnOffState::On as i32);
        raw.state = None;
        assert_eq!(
            parse_raw(raw).unwrap_err().to_string(),
            "cannot parse StatusEvent payload: missing state"
        );
    }

    #[test]
    fn explicit_on_state_reads_as_online() {
        let raw = raw_event(MESSAGE_DEFINITION_VERSION, OnOffState::On as i32);
        assert_eq!(parse_raw(raw).unwrap().state(), GatewayState::Online);
    }

    #[test]
    fn unknown_state_value_reads_as_offline() {
        let bytes = envelope::encode(Operation::StatusEvent(raw_event(
            MESSAGE_DEFINITION_VERSION,
            5,
        )));
        let parsed = StatusEvent::from_payload(&bytes).unwrap();
        assert_eq!(parsed.state(), GatewayState::Offline);
    }

    #[test]
    fn state_names_parse_from_text() {
        assert_eq!("online".parse::<GatewayState>().unwrap(), GatewayState::Online);
        assert_eq!(GatewayState::Offline.to_string(), "offline");
    }
}
