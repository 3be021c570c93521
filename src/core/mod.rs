// BFGMiner Monitor - Free and Open Source Software Statement
//
// This project, bfgminer-monitor, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/mod.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file is the module declaration for the core functionality of the
// monitor, located in the core subdirectory.

pub mod config;
pub mod types;

// Re-export the most commonly used items
pub use config::{ConfigError, MonitorConfig};
pub use types::{Args, ConnectionTarget};

// Changelog:
// - v1.0.0 (2026-10-16): Initial core module with config and types.
