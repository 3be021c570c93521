// BFGMiner Monitor - Free and Open Source Software Statement
//
// This project, bfgminer-monitor, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/lib.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file serves as the main library entry point for the BFGMiner monitor,
// located at the root of the source tree. It exports all public modules
// and types that other crates or binaries can use.
//
// Tree Location:
// - src/lib.rs (root library file)
// - Exports modules: api, core, logging, monitor, utils, view

pub mod api;
pub mod core;
pub mod logging;
pub mod monitor;
pub mod utils;
pub mod view;

// Re-export commonly used types at the crate root for convenience
pub use crate::api::{ApiClient, ApiError, Command};
pub use crate::core::{Args, ConnectionTarget, MonitorConfig};
pub use crate::monitor::{Dispatcher, OverlapPolicy, PollScheduler, Snapshot};
pub use crate::view::MinerView;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

// Changelog:
// - v1.0.0 (2026-10-16): Initial library root.
//   - Purpose: Organizes the monitor into api, core, monitor, view, logging and
//     utils modules.
//   - Features: Re-exports the client, scheduler and snapshot types.
