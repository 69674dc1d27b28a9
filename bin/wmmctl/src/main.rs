//! ---
//! wmm_section: "04-tooling"
//! wmm_subsection: "binary"
//! wmm_type: "source"
//! wmm_scope: "code"
//! wmm_description: "Control CLI for encoding and decoding gateway message payloads."
//! wmm_version: "v0.1.0"
//! wmm_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use wmm_common::{init_tracing, CtlConfig};

mod decode;
mod encode;

const CONFIG_CANDIDATES: &[&str] = &["wmmctl.toml", "/etc/wmm/wmmctl.toml"];

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Gateway-to-backend message payload utility",
    long_about = None
)]
struct Cli {
    #[arg(long, global = true, help = "Configuration file (overrides WMM_CONFIG)")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Build a message and print its payload")]
    Encode(encode::EncodeArgs),
    #[command(about = "Decode a payload and print it as JSON")]
    Decode(decode::DecodeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => CtlConfig::from_path(path)?,
        None => CtlConfig::load(CONFIG_CANDIDATES)?,
    };
    init_tracing("wmmctl", &config.logging)?;
    match cli.command {
        Commands::Encode(args) => encode::run(args, &config)?,
        Commands::Decode(args) => decode::run(args, &config)?,
    }
    Ok(())
}
