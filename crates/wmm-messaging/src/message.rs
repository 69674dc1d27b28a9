//! ---
//! wmm_section: "02-messaging-envelope"
//! wmm_subsection: "module"
//! wmm_type: "source"
//! wmm_scope: "code"
//! wmm_description: "Uniform construct, serialise, and parse contract for typed messages."
//! wmm_version: "v0.1.0"
//! wmm_owner: "tbd"
//! ---
use crate::envelope::{self, MessageKind, Operation};
use crate::error::{MessagingError, Result};

/// Contract shared by every typed request, response, and event.
///
/// Implementors only describe how they map onto their envelope operation;
/// byte handling is provided.
pub trait TypedMessage: Sized {
    /// Envelope operation this message binds to.
    const KIND: MessageKind;

    /// Name used in parse error messages.
    const NAME: &'static str;

    /// Build the typed message from a decoded operation.
    fn from_operation(operation: Operation) -> Result<Self>;

    /// Fill a fresh operation from this message.
    fn to_operation(&self) -> Operation;

    /// Parse a typed message from payload bytes.
    ///
    /// Fails with [`MessagingError::Parsing`] on malformed bytes or when the
    /// payload carries a different operation.
    fn from_payload(payload: &[u8]) -> Result<Self> {
        Self::from_operation(envelope::decode_as(Self::NAME, payload)?)
    }

    /// Serialise the message into a complete envelope.
    fn payload(&self) -> Vec<u8> {
        envelope::encode(self.to_operation())
    }
}

pub(crate) fn unexpected<M: TypedMessage>(operation: &Operation) -> MessagingError {
    MessagingError::parsing(
        M::NAME,
        format!(
            "expected {} operation, found {}",
            M::KIND,
            MessageKind::of(operation)
        ),
    )
}
