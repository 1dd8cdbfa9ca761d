use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;

use crate::{command::Command, communication::CommandFrame, config::Config};

const DEFAULT_TIMEOUT_MS: u64 = 100;
const DEFAULT_READ_LIMIT: usize = 256;

/// Sends a single command frame to the MQTT interface module and prints the
/// raw response.
#[derive(Debug, Parser)]
#[command(name = "mqttif", version)]
pub struct Args {
    /// Serial port name
    #[arg(long, required_unless_present = "config")]
    pub port: Option<String>,

    /// Serial port baud rate
    #[arg(long, required_unless_present = "config")]
    pub baud: Option<u32>,

    /// Command to send
    #[arg(long, value_enum)]
    pub cmd: Command,

    /// Optional payload string appended to the frame
    #[arg(long)]
    pub data: Option<String>,

    /// Read timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Maximum number of response bytes to read
    #[arg(long)]
    pub read_limit: Option<usize>,

    /// TOML file supplying defaults for port, baud, timeout and read limit
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log frame bytes and other debug detail
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything needed for one send/read cycle, with config defaults and CLI
/// overrides already merged.
#[derive(Debug)]
pub struct Invocation {
    pub port: String,
    pub baud: u32,
    pub frame: CommandFrame,
    pub command: Command,
    pub timeout: Duration,
    pub read_limit: usize,
}

impl Args {
    /// Merges CLI flags over config file defaults and builds the frame to
    /// send. Explicit flags always win over the file.
    pub fn resolve(self) -> anyhow::Result<Invocation> {
        let config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        let port = self
            .port
            .or(config.port)
            .context("No serial port given, pass --port or set it in the config file")?;
        let baud = self
            .baud
            .or(config.baud)
            .context("No baud rate given, pass --baud or set it in the config file")?;
        let timeout_ms = self.timeout_ms.or(config.timeout_ms).unwrap_or(DEFAULT_TIMEOUT_MS);
        let read_limit = self.read_limit.or(config.read_limit).unwrap_or(DEFAULT_READ_LIMIT);

        let frame = match &self.data {
            Some(data) => CommandFrame::with_payload(self.cmd, data)?,
            None => CommandFrame::new(self.cmd),
        };

        Ok(Invocation {
            port,
            baud,
            frame,
            command: self.cmd,
            timeout: Duration::from_millis(timeout_ms),
            read_limit,
        })
    }
}
