// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Matthias Bilger <matthias@bilger.info>

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use devnotify_hid::{
    ConnectionManager, ConnectionState, HidApiTransport, HotplugWatcher, LogSink,
};
use log::{info, warn};
use std::path::PathBuf;

/// Watch one USB HID device and keep a handle open while it is present
#[derive(Parser, Debug)]
#[command(name = "devnotify", version, about)]
struct Args {
    /// Target vendor ID as 4-digit hex, e.g. 1A86
    #[arg(long, value_parser = parse_hex_u16)]
    vid: Option<u16>,

    /// Target product ID as 4-digit hex, e.g. FE07
    #[arg(long, value_parser = parse_hex_u16)]
    pid: Option<u16>,

    /// Open attempts per arrival event
    #[arg(long)]
    retries: Option<u32>,

    /// Path to a YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_hex_u16(value: &str) -> Result<u16, String> {
    let digits = value.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid hex value {value:?}: {e}"))
}

fn init_logging(config: &Config) {
    // RUST_LOG wins over the configured level
    let env = env_logger::Env::default().default_filter_or(config.logging.level.as_str());
    env_logger::Builder::from_env(env).init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => Config::default(),
    };

    // Command-line flags override the file
    if let Some(vid) = args.vid {
        config.device.vendor_id = vid;
    }
    if let Some(pid) = args.pid {
        config.device.product_id = pid;
    }
    if let Some(retries) = args.retries {
        config.open_retries = retries;
    }

    init_logging(&config);

    let signature = config.signature();
    info!("Watching for {}", signature.match_token());

    let transport = HidApiTransport::new().context("Failed to initialize HID API")?;
    let mut manager =
        ConnectionManager::with_retry_limit(transport, LogSink, signature, config.open_retries);

    match HotplugWatcher::subscribe() {
        Ok(mut watcher) => {
            // Runs until the subscription shuts down
            manager.run(watcher.events());
            watcher.unsubscribe();
        }
        Err(e) => {
            warn!("Hot-plug detection unavailable: {}", e);
            if manager.state() == ConnectionState::Connected {
                info!("Keeping the startup connection; reconnecting requires a restart");
            }
            // Without notifications there is nothing to react to; hold
            // whatever handle the startup attempt produced until killed
            loop {
                std::thread::park();
            }
        }
    }

    Ok(())
}
