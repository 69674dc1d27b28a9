//! ---
//! wmm_section: "04-tooling"
//! wmm_subsection: "binary"
//! wmm_type: "source"
//! wmm_scope: "code"
//! wmm_description: "Encode subcommands."
//! wmm_version: "v0.1.0"
//! wmm_owner: "tbd"
//! ---
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, ensure, Context, Result};
use clap::{Args, Subcommand};
use tracing::info;
use wmm_common::{CtlConfig, OutputFormat};
use wmm_messaging::{
    AnyMessage, GatewayState, ProcessScratchpadRequest, ProcessScratchpadResponse, ResultCode,
    StatusEvent,
};

#[derive(Debug, Args)]
pub struct EncodeArgs {
    #[arg(long, global = true, help = "Write raw payload bytes to this file")]
    out: Option<PathBuf>,
    #[command(subcommand)]
    message: EncodeCommand,
}

#[derive(Debug, Subcommand)]
pub enum EncodeCommand {
    #[command(about = "Gateway status event")]
    Status {
        #[arg(long)]
        gateway: Option<String>,
        #[arg(long)]
        state: GatewayState,
        #[arg(long)]
        event_id: Option<u64>,
        #[arg(long)]
        timestamp_ms: Option<u64>,
    },
    #[command(about = "Request to process the scratchpad of a sink")]
    ProcessScratchpadRequest {
        #[arg(long)]
        sink: String,
        #[arg(long)]
        correlation_id: Option<u64>,
        #[arg(long)]
        timestamp_ms: Option<u64>,
    },
    #[command(about = "Response to a scratchpad processing request")]
    ProcessScratchpadResponse {
        #[arg(long)]
        correlation_id: u64,
        #[arg(long)]
        gateway: Option<String>,
        #[arg(long)]
        result: ResultCode,
        #[arg(long)]
        sink: String,
        #[arg(long)]
        timestamp_ms: Option<u64>,
    },
}

fn gateway_id(explicit: Option<String>, config: &CtlConfig) -> Result<String> {
    let gateway = explicit
        .or_else(|| config.gateway_id.clone())
        .context("no gateway id: pass --gateway or set gateway_id in the config")?;
    ensure!(!gateway.trim().is_empty(), "gateway id must not be empty");
    Ok(gateway)
}

fn sink_id(sink: String) -> Result<String> {
    ensure!(!sink.trim().is_empty(), "--sink must not be empty");
    Ok(sink)
}

fn build(command: EncodeCommand, config: &CtlConfig) -> Result<AnyMessage> {
    let message = match command {
        EncodeCommand::Status {
            gateway,
            state,
            event_id,
            timestamp_ms,
        } => {
            let mut event =
                StatusEvent::with_event_id(gateway_id(gateway, config)?, state, event_id);
            if let Some(ms) = timestamp_ms {
                event = event.with_timestamp_ms(ms);
            }
            event.into()
        }
        EncodeCommand::ProcessScratchpadRequest {
            sink,
            correlation_id,
            timestamp_ms,
        } => {
            let mut request = ProcessScratchpadRequest::new(sink_id(sink)?, correlation_id);
            if let Some(ms) = timestamp_ms {
                request = request.with_timestamp_ms(ms);
            }
            request.into()
        }
        EncodeCommand::ProcessScratchpadResponse {
            correlation_id,
            gateway,
            result,
            sink,
            timestamp_ms,
        } => {
            let mut response = ProcessScratchpadResponse::new(
                correlation_id,
                gateway_id(gateway, config)?,
                result,
                sink_id(sink)?,
            );
            if let Some(ms) = timestamp_ms {
                response = response.with_timestamp_ms(ms);
            }
            response.into()
        }
    };
    Ok(message)
}

pub fn run(args: EncodeArgs, config: &CtlConfig) -> Result<()> {
    let message = build(args.message, config)?;
    let payload = message.payload();
    info!(kind = %message.kind(), bytes = payload.len(), "payload encoded");

    match (&args.out, config.output) {
        (Some(path), _) => fs::write(path, &payload)
            .with_context(|| format!("unable to write payload to {}", path.display()))?,
        (None, OutputFormat::Raw) => return Err(anyhow!("raw output needs --out <PATH>")),
        (None, OutputFormat::Hex) => println!("{}", hex::encode(&payload)),
    }
    Ok(())
}
