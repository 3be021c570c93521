// BFGMiner Monitor - Free and Open Source Software Statement
//
// This project, bfgminer-monitor, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/config.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file holds the monitor configuration, located in the core subdirectory.
// Values come from an optional JSON file, then command-line overrides.
//
// Tree Location:
// - src/core/config.rs (monitor configuration)
// - Depends on: serde, serde_json, tokio, core::types

use super::types::{Args, ConnectionTarget};
use crate::monitor::scheduler::OverlapPolicy;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::fs;

const LOG_TARGET: &str = "bfgmon::config";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4028;
pub const DEFAULT_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_ID: &str = "bfgminer";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Poll interval in milliseconds
    #[serde(default = "default_interval")]
    pub interval: u64,
    /// Per-command timeout in milliseconds
    #[serde(default)]
    pub timeout: Option<u64>,
    #[serde(default)]
    pub skip_overlapping: bool,
}

fn default_id() -> String {
    DEFAULT_ID.into()
}
fn default_host() -> String {
    DEFAULT_HOST.into()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_interval() -> u64 {
    DEFAULT_INTERVAL_MS
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            id: default_id(),
            title: None,
            host: default_host(),
            port: default_port(),
            interval: default_interval(),
            timeout: None,
            skip_overlapping: false,
        }
    }
}

impl MonitorConfig {
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).await.map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(target: LOG_TARGET, "Loaded config from {:?}", path);
        Ok(config)
    }

    /// Build the effective config: file (or defaults), then flags, then validation
    pub async fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let base = match &args.config {
            Some(path) => Self::load(path).await?,
            None => Self::default(),
        };
        let config = base.apply_args(args);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_args(mut self, args: &Args) -> Self {
        if let Some(host) = &args.host {
            self.host = host.clone();
        }
        if let Some(port) = args.port {
            self.port = port;
        }
        if let Some(interval) = args.interval {
            self.interval = interval;
        }
        if let Some(title) = &args.title {
            self.title = Some(title.clone());
        }
        if let Some(id) = &args.id {
            self.id = id.clone();
        }
        if args.timeout.is_some() {
            self.timeout = args.timeout;
        }
        if args.skip_overlapping {
            self.skip_overlapping = true;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be non-zero".into()));
        }
        if self.interval == 0 {
            return Err(ConfigError::Invalid("interval must be at least 1ms".into()));
        }
        if self.timeout == Some(0) {
            return Err(ConfigError::Invalid("timeout must be at least 1ms".into()));
        }
        Ok(())
    }

    /// Display label, falling back to the instance id
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }

    pub fn target(&self) -> ConnectionTarget {
        let target = ConnectionTarget::new(self.host.clone(), self.port);
        match self.timeout {
            Some(ms) => target.with_timeout(Duration::from_millis(ms)),
            None => target,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.interval)
    }

    pub fn overlap_policy(&self) -> OverlapPolicy {
        if self.skip_overlapping {
            OverlapPolicy::SkipWhileBusy
        } else {
            OverlapPolicy::Allow
        }
    }
}


// Changelog:
// - v1.0.0 (2026-10-16): Initial monitor configuration.
//   - Purpose: Supplies host, port, interval, title and optional timeout.
//   - Features: JSON file loading, command-line overrides and validation.
