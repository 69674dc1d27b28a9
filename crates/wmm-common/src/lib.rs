//! ---
//! wmm_section: "03-runtime-support"
//! wmm_subsection: "module"
//! wmm_type: "source"
//! wmm_scope: "code"
//! wmm_description: "Shared runtime support for gateway messaging executables."
//! wmm_version: "v0.1.0"
//! wmm_owner: "tbd"
//! ---
//! Configuration and logging setup shared by the workspace executables. The
//! message library itself depends on neither.

pub mod config;
pub mod logging;

pub use config::{CtlConfig, LoggingConfig, OutputFormat};
pub use logging::{init_tracing, LogFormat};
