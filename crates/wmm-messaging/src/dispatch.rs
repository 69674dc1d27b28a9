//! ---
//! wmm_section: "02-messaging-envelope"
//! wmm_subsection: "module"
//! wmm_type: "source"
//! wmm_scope: "code"
//! wmm_description: "Decode any payload without knowing its operation up front."
//! wmm_version: "v0.1.0"
//! wmm_owner: "tbd"
//! ---
use serde::Serialize;
use tracing::debug;

use crate::envelope::{self, MessageKind, Operation};
use crate::error::Result;
use crate::message::TypedMessage;
use crate::process_scratchpad::{ProcessScratchpadRequest, ProcessScratchpadResponse};
use crate::status::StatusEvent;

/// Any typed message the envelope can carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum AnyMessage {
    /// Gateway status event.
    StatusEvent(StatusEvent),
    /// Scratchpad processing request.
    ProcessScratchpadReq(ProcessScratchpadRequest),
    /// Scratchpad processing response.
    ProcessScratchpadResp(ProcessScratchpadResponse),
}

impl AnyMessage {
    /// Decode a payload and hand it to the typed message its tag selects.
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        let operation = envelope::decode(payload)?;
        let kind = MessageKind::of(&operation);
        let message = match operation {
            op @ Operation::StatusEvent(_) => Self::StatusEvent(StatusEvent::from_operation(op)?),
            op @ Operation::ProcessScratchpadReq(_) => {
                Self::ProcessScratchpadReq(ProcessScratchpadRequest::from_operation(op)?)
            }
            op @ Operation::ProcessScratchpadResp(_) => {
                Self::ProcessScratchpadResp(ProcessScratchpadResponse::from_operation(op)?)
            }
        };
        debug!(kind = %kind, "payload dispatched");
        Ok(message)
    }

    /// Serialise whichever message is held.
    pub fn payload(&self) -> Vec<u8> {
        match self {
            Self::StatusEvent(message) => message.payload(),
            Self::ProcessScratchpadReq(message) => message.payload(),
            Self::ProcessScratchpadResp(message) => message.payload(),
        }
    }

    /// Operation tag of the held message.
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::StatusEvent(_) => StatusEvent::KIND,
            Self::ProcessScratchpadReq(_) => ProcessScratchpadRequest::KIND,
            Self::ProcessScratchpadResp(_) => ProcessScratchpadResponse::KIND,
        }
    }
}

impl From<StatusEvent> for AnyMessage {
    fn from(message: StatusEvent) -> Self {
        Self::StatusEvent(message)
    }
}

impl From<ProcessScratchpadRequest> for AnyMessage {
    fn from(message: ProcessScratchpadRequest) -> Self {
        Self::ProcessScratchpadReq(message)
    }
}

impl From<ProcessScratchpadResponse> for AnyMessage {
    fn from(message: ProcessScratchpadResponse) -> Self {
        Self::ProcessScratchpadResp(message)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::MessagingError;
    use crate::result_code::ResultCode;
    use crate::status::GatewayState;

    #[test]
    fn dispatch_selects_the_populated_operation() {
        let messages: Vec<AnyMessage> = vec![
            StatusEvent::new("gw-1", GatewayState::Online).into(),
            ProcessScratchpadRequest::new("sink-1", Some(1)).into(),
            ProcessScratchpadResponse::new(1, "gw-1", ResultCode::Ok, "sink-1").into(),
        ];
        for message in messages {
            let decoded = AnyMessage::from_payload(&message.payload()).unwrap();
            assert_eq!(decoded.kind(), message.kind());
            assert_eq!(decoded, message);
        }
    }

    #[test]
    fn empty_payload_fails_to_dispatch() {
        assert!(matches!(
            AnyMessage::from_payload(&[]),
            Err(MessagingError::Parsing { .. })
        ));
    }

    #[test]
    fn json_rendering_is_tagged_by_kind() {
        let message: AnyMessage = ProcessScratchpadRequest::new("sink-42", Some(7))
            .with_timestamp_ms(1_000)
            .into();
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "kind": "process_scratchpad_req",
                "message": {
                    "source_id": "sink-42",
                    "correlation_id": 7,
                    "timestamp_ms": 1000
                }
            })
        );
    }
}
