//! ---
//! wmm_section: "02-messaging-envelope"
//! wmm_subsection: "module"
//! wmm_type: "source"
//! wmm_scope: "code"
//! wmm_description: "Single entry and exit point between bytes and the message envelope."
//! wmm_version: "v0.1.0"
//! wmm_owner: "tbd"
//! ---
use prost::Message as _;
use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};
use tracing::trace;
use wmm_proto::{GenericMessage, WirepasMessage};

use crate::error::{MessagingError, Result};

/// The populated operation of an envelope. Exactly one per payload.
pub use wmm_proto::wirepas_message::Message as Operation;

/// Discriminant of an [`Operation`], named after its wire field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MessageKind {
    /// Gateway reachability notification.
    StatusEvent,
    /// Request to process the scratchpad of a sink.
    ProcessScratchpadReq,
    /// Outcome of a scratchpad processing request.
    ProcessScratchpadResp,
}

impl MessageKind {
    /// Kind of the operation carried by an envelope.
    pub fn of(operation: &Operation) -> Self {
        match operation {
            Operation::StatusEvent(_) => Self::StatusEvent,
            Operation::ProcessScratchpadReq(_) => Self::ProcessScratchpadReq,
            Operation::ProcessScratchpadResp(_) => Self::ProcessScratchpadResp,
        }
    }
}

/// Decode payload bytes into the operation they carry.
///
/// Every failure is a [`MessagingError::Parsing`]; an envelope without a
/// populated operation counts as malformed.
pub fn decode(bytes: &[u8]) -> Result<Operation> {
    decode_as("GenericMessage", bytes)
}

pub(crate) fn decode_as(context: &'static str, bytes: &[u8]) -> Result<Operation> {
    let message =
        GenericMessage::decode(bytes).map_err(|err| MessagingError::parsing(context, err))?;
    let operation = message
        .wirepas
        .and_then(|wirepas| wirepas.message)
        .ok_or_else(|| MessagingError::parsing(context, "no operation populated"))?;
    trace!(kind = %MessageKind::of(&operation), bytes = bytes.len(), "envelope decoded");
    Ok(operation)
}

/// Wrap an operation in a fresh envelope and serialise it.
pub fn encode(operation: Operation) -> Vec<u8> {
    let kind = MessageKind::of(&operation);
    let message = GenericMessage {
        wirepas: Some(WirepasMessage {
            message: Some(operation),
        }),
    };
    let bytes = message.encode_to_vec();
    trace!(kind = %kind, bytes = bytes.len(), "envelope encoded");
    bytes
}
