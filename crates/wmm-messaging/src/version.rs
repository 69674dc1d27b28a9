//! ---
//! wmm_section: "02-messaging-envelope"
//! wmm_subsection: "module"
//! wmm_type: "source"
//! wmm_scope: "code"
//! wmm_description: "Message definition version gate."
//! wmm_version: "v0.1.0"
//! wmm_owner: "tbd"
//! ---
use crate::error::{MessagingError, Result};

/// Message definition revision this implementation parses and stamps.
///
/// Exact match only. A schema change means a new implementation, not a
/// compatibility branch.
pub const MESSAGE_DEFINITION_VERSION: u32 = 1;

/// Reject any declared version other than [`MESSAGE_DEFINITION_VERSION`].
pub fn ensure_supported(found: u32) -> Result<()> {
    if found == MESSAGE_DEFINITION_VERSION {
        Ok(())
    } else {
        Err(MessagingError::VersionMismatch {
            expected: MESSAGE_DEFINITION_VERSION,
            found,
        })
    }
}
