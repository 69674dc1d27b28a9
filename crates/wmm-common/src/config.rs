//! ---
//! wmm_section: "03-runtime-support"
//! wmm_subsection: "module"
//! wmm_type: "source"
//! wmm_scope: "code"
//! wmm_description: "TOML configuration for the control CLI."
//! wmm_version: "v0.1.0"
//! wmm_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::logging::LogFormat;

fn default_pretty_json() -> bool {
    true
}

fn default_directive() -> String {
    "warn".to_owned()
}

/// How encoded payloads are emitted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Lowercase hex on stdout.
    #[default]
    Hex,
    /// Raw bytes, written to a file.
    Raw,
}

/// Configuration for `wmmctl`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CtlConfig {
    /// Responder id used when a command does not name a gateway.
    #[serde(default)]
    pub gateway_id: Option<String>,
    #[serde(default)]
    pub output: OutputFormat,
    /// Indent decoded JSON.
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging section of [`CtlConfig`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    /// Directory for rolling log files; console only when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    /// Filter used when neither `WMM_LOG` nor `RUST_LOG` is set.
    #[serde(default = "default_directive")]
    pub default_directive: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            directory: None,
            default_directive: default_directive(),
        }
    }
}

impl Default for CtlConfig {
    fn default() -> Self {
        Self {
            gateway_id: None,
            output: OutputFormat::default(),
            pretty_json: default_pretty_json(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CtlConfig {
    pub const ENV_CONFIG_PATH: &'static str = "WMM_CONFIG";

    /// Load configuration, honouring `WMM_CONFIG` before the candidates.
    ///
    /// Falls back to defaults when no candidate exists. A path named by
    /// `WMM_CONFIG` must exist.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                return Self::from_path(Path::new(&env_path));
            }
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                return Self::from_path(candidate.as_ref());
            }
        }

        debug!("no configuration file found; using defaults");
        Ok(Self::default())
    }

    /// Read and validate one configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<CtlConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        if let Some(gateway_id) = &self.gateway_id {
            if gateway_id.trim().is_empty() {
                return Err(anyhow!("gateway_id must not be empty when set"));
            }
        }
        if self.logging.default_directive.trim().is_empty() {
            return Err(anyhow!("logging.default_directive must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: CtlConfig = toml::from_str("").unwrap();
        assert_eq!(config, CtlConfig::default());
        assert!(config.pretty_json);
        assert_eq!(config.logging.default_directive, "warn");
    }

    #[test]
    fn full_file_parses() {
        let config: CtlConfig = toml::from_str(
            r#"
            gateway_id = "gw-lab"
            output = "raw"
            pretty_json = false

            [logging]
            format = "structured-json"
            directory = "target/logs"
            default_directive = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.gateway_id.as_deref(), Some("gw-lab"));
        assert_eq!(config.output, OutputFormat::Raw);
        assert_eq!(config.logging.format, LogFormat::StructuredJson);
        assert_eq!(config.logging.directory, Some(PathBuf::from("target/logs")));
    }

    #[test]
    fn blank_gateway_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wmmctl.toml");
        fs::write(&path, "gateway_id = \"  \"\n").unwrap();
        let err = CtlConfig::from_path(&path).unwrap_err();
        assert!(err.to_string().contains("gateway_id"));
    }

    #[test]
    fn parse_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "output = [").unwrap();
        let err = CtlConfig::from_path(&path).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn absent_file_is_an_error_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = CtlConfig::from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn missing_candidates_fall_back_to_defaults() {
        // No other test in this crate sets the variable.
        std::env::remove_var(CtlConfig::ENV_CONFIG_PATH);
        let dir = tempfile::tempdir().unwrap();
        let loaded = CtlConfig::load(&[dir.path().join("absent.toml")]).unwrap();
        assert_eq!(loaded, CtlConfig::default());
    }

    #[test]
    fn first_existing_candidate_wins() {
        std::env::remove_var(CtlConfig::ENV_CONFIG_PATH);
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("wmmctl.toml");
        fs::write(&present, "gateway_id = \"gw-lab\"\n").unwrap();
        let loaded = CtlConfig::load(&[dir.path().join("absent.toml"), present]).unwrap();
        assert_eq!(loaded.gateway_id.as_deref(), Some("gw-lab"));
    }
}
