// BFGMiner Monitor - Free and Open Source Software Statement
//
// This project, bfgminer-monitor, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/types.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file defines core data structures for the BFGMiner monitor, located in
// the core subdirectory. It includes the command-line arguments and the
// connection target handed to the API client.
//
// Tree Location:
// - src/core/types.rs (core data structures)
// - Depends on: clap

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for the BFGMiner monitor
#[derive(Parser, Debug)]
#[command(
    name = "bfgmon",
    author = "BFGMiner Monitor Team",
    version,
    about = "Telemetry poller for the BFGMiner/CGMiner API",
    long_about = "bfgmon polls a BFGMiner (or CGMiner-compatible) API daemon over TCP.\n\
                  Each cycle issues `summary` and `devs`, normalizes the replies into one\n\
                  snapshot, and derives hardware error rates for display.\n\n\
                  The daemon must be started with its API enabled, e.g. --api-listen.\n\n\
                  Examples:\n\
                    Local daemon: bfgmon\n\
                    Remote rig: bfgmon --host 192.168.1.50 --port 4028 --title rig-01\n\
                    One-shot check: bfgmon --once\n\
                    With dashboard: bfgmon --web --web-port 8080\n\
                    From file: bfgmon --config monitor.json"
)]
pub struct Args {
    /// Daemon host name or IP address [default: 127.0.0.1]
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Daemon API port [default: 4028]
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Poll interval in milliseconds [default: 1000]
    #[arg(short, long, value_name = "MS")]
    pub interval: Option<u64>,

    /// Display label for this miner (defaults to the instance id)
    #[arg(short, long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Instance identifier [default: bfgminer]
    #[arg(long, value_name = "ID")]
    pub id: Option<String>,

    /// Per-command timeout in milliseconds (none by default)
    #[arg(long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Skip a tick while the previous poll cycle is still running
    #[arg(long, default_value = "false")]
    pub skip_overlapping: bool,

    /// JSON configuration file; command-line flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Poll once, print the view and exit (non-zero when disconnected)
    #[arg(long, default_value = "false")]
    pub once: bool,

    /// Serve the live view at http://localhost:<web-port>
    #[arg(long, default_value = "false")]
    pub web: bool,

    /// Port for the web view
    #[arg(long, default_value = "8080", value_name = "PORT")]
    pub web_port: u16,

    /// log4rs configuration file; written from the built-in sample when missing
    #[arg(long, default_value = "logs/bfgmon/log4rs_config.yml", value_name = "FILE")]
    pub log_config: PathBuf,
}

/// Where the daemon lives. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    pub host: String,
    pub port: u16,
    /// `None` leaves timing to the transport, which is the default
    pub timeout: Option<Duration>,
}

impl ConnectionTarget {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// `host:port`, bracketing bare IPv6 hosts
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}


// Changelog:
// - v1.0.0 (2026-10-16): Initial core types.
//   - Purpose: Command-line arguments and the immutable daemon connection target.
//   - Note: Connection flags are optional so they can override a config file.
// - v1.0.1 (2026-10-16): `Args` is built only through clap so defaults stay in
//   one place.
