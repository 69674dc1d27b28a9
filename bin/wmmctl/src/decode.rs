//! ---
//! wmm_section: "04-tooling"
//! wmm_subsection: "binary"
//! wmm_type: "source"
//! wmm_scope: "code"
//! wmm_description: "Decode subcommand."
//! wmm_version: "v0.1.0"
//! wmm_owner: "tbd"
//! ---
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use tracing::info;
use wmm_common::CtlConfig;
use wmm_messaging::AnyMessage;

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct DecodeArgs {
    #[arg(long, help = "Payload as hex")]
    hex: Option<String>,
    #[arg(long, help = "File holding the raw payload")]
    file: Option<PathBuf>,
}

fn read_payload(args: DecodeArgs) -> Result<Vec<u8>> {
    match (args.hex, args.file) {
        (Some(text), _) => hex::decode(text.trim()).context("--hex is not valid hex"),
        (None, Some(path)) => fs::read(&path)
            .with_context(|| format!("unable to read payload from {}", path.display())),
        (None, None) => Err(anyhow!("pass --hex or --file")),
    }
}

pub fn run(args: DecodeArgs, config: &CtlConfig) -> Result<()> {
    let payload = read_payload(args)?;
    let message = AnyMessage::from_payload(&payload).map_err(|err| {
        let context = if err.is_fatal() {
            "peer runs an incompatible protocol revision"
        } else {
            "payload rejected"
        };
        anyhow::Error::new(err).context(context)
    })?;
    info!(kind = %message.kind(), bytes = payload.len(), "payload decoded");

    let rendered = if config.pretty_json {
        serde_json::to_string_pretty(&message)?
    } else {
        serde_json::to_string(&message)?
    };
    println!("{rendered}");
    Ok(())
}
