//! ---
//! wmm_section: "02-messaging-envelope"
//! wmm_subsection: "module"
//! wmm_type: "source"
//! wmm_scope: "code"
//! wmm_description: "Typed gateway messages, header codec, envelope, and version gate."
//! wmm_version: "v0.1.0"
//! wmm_owner: "tbd"
//! ---
//! Typed messages for the gateway-to-backend API.
//!
//! Every message travels inside a [`wmm_proto::GenericMessage`] envelope that
//! carries exactly one operation. Typed messages convert to and from that
//! envelope through the [`TypedMessage`] trait; [`AnyMessage`] decodes a payload
//! without knowing the operation up front.
#![warn(missing_docs)]

pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod header;
pub mod ids;
pub mod message;
pub mod process_scratchpad;
pub mod result_code;
pub mod status;
pub mod version;

pub use dispatch::AnyMessage;
pub use envelope::{MessageKind, Operation};
pub use error::{MessagingError, Result};
pub use header::{EventHeader, RequestHeader, ResponseHeader};
pub use message::TypedMessage;
pub use process_scratchpad::{ProcessScratchpadRequest, ProcessScratchpadResponse};
pub use result_code::ResultCode;
pub use status::{GatewayState, StatusEvent};
pub use version::MESSAGE_DEFINITION_VERSION;
