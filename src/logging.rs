// BFGMiner Monitor - Free and Open Source Software Statement
//
// This project, bfgminer-monitor, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/logging.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file sets up log4rs from a YAML file, seeding the file from the
// built-in sample on first run.
//
// Tree Location:
// - src/logging.rs (logging setup)
// - Depends on: log4rs, anyhow

use anyhow::Context;
use std::fs;
use std::path::Path;

/// Sample configuration shipped with the binary
pub const DEFAULT_LOG_CONFIG: &str = include_str!("../log4rs_sample.yml");

/// Write `default_config` to `config_path` unless a file is already there.
/// Returns true when the file was created.
pub fn ensure_log_config(config_path: &Path, default_config: &str) -> anyhow::Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }
    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("could not create log config directory {:?}", parent))?;
        }
    }
    fs::write(config_path, default_config)
        .with_context(|| format!("could not write log config {:?}", config_path))?;
    Ok(true)
}

/// Initialize the global logger. Only the first call in a process succeeds.
pub fn initialize_logging(config_path: &Path, default_config: &str) -> anyhow::Result<()> {
    ensure_log_config(config_path, default_config)?;
    log4rs::init_file(config_path, Default::default())
        .with_context(|| format!("could not load log config {:?}", config_path))?;
    Ok(())
}


// Changelog:
// - v1.0.0 (2026-10-16): Initial logging setup.
//   - Purpose: Seeds and loads a log4rs YAML configuration.
