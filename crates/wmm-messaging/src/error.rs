//! ---
//! wmm_section: "02-messaging-envelope"
//! wmm_subsection: "module"
//! wmm_type: "source"
//! wmm_scope: "code"
//! wmm_description: "Error taxonomy for payload decoding."
//! wmm_version: "v0.1.0"
//! wmm_owner: "tbd"
//! ---
use std::fmt;

/// Shared result type for messaging operations.
pub type Result<T> = std::result::Result<T, MessagingError>;

/// Failures surfaced while turning payload bytes into typed messages.
///
/// Encoding has no failure mode, so every variant belongs to the inbound path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessagingError {
    /// The bytes are not a well-formed envelope for the requested message.
    ///
    /// Truncation, invalid encoding, a missing sub-message, and an unexpected
    /// operation all land here.
    #[error("cannot parse {context} payload: {reason}")]
    Parsing {
        /// Message that was being parsed.
        context: &'static str,
        /// Rendering of the underlying cause.
        reason: String,
    },
    /// The peer speaks a different message definition revision.
    #[error(
        "unsupported gateway message definition version {found}; the only supported version is {expected}"
    )]
    VersionMismatch {
        /// Version this implementation is built against.
        expected: u32,
        /// Version declared by the payload.
        found: u32,
    },
}

impl MessagingError {
    pub(crate) fn parsing(context: &'static str, reason: impl fmt::Display) -> Self {
        Self::Parsing {
            context,
            reason: reason.to_string(),
        }
    }

    /// Whether the error means the two endpoints cannot talk at all.
    ///
    /// A parse failure concerns one message; a version mismatch concerns every
    /// message the peer will ever send.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::VersionMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_version_mismatch_is_fatal() {
        let parsing = MessagingError::parsing("StatusEvent", "truncated");
        let mismatch = MessagingError::VersionMismatch {
            expected: 1,
            found: 2,
        };
        assert!(!parsing.is_fatal());
        assert!(mismatch.is_fatal());
    }

    #[test]
    fn messages_name_the_context() {
        let err = MessagingError::parsing("ProcessScratchpadRequest", "missing request header");
        assert_eq!(
            err.to_string(),
            "cannot parse ProcessScratchpadRequest payload: missing request header"
        );
    }
}
