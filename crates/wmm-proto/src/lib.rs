//! ---
//! wmm_section: "01-wire-schema"
//! wmm_subsection: "module"
//! wmm_type: "source"
//! wmm_scope: "code"
//! wmm_description: "Re-exports the generated gateway API protobuf types."
//! wmm_version: "v0.1.0"
//! wmm_owner: "tbd"
//! ---
//! Wire schema for the gateway-to-backend messaging API.
//!
//! The types are generated at build time from `proto/wirepas/gateway_api.proto`.
//! Consumers should treat them as plain carriers and go through the typed
//! messages in `wmm-messaging` instead of filling them by hand.

#[allow(missing_docs, clippy::all)]
pub mod gateway_api {
    include!(concat!(env!("OUT_DIR"), "/wirepas.proto.gateway_api.rs"));
}

pub use gateway_api::{wirepas_message, GenericMessage, WirepasMessage};
pub use prost::Message;
