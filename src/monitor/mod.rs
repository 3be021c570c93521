// BFGMiner Monitor - Free and Open Source Software Statement
//
// This project, bfgminer-monitor, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/monitor/mod.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file is the module declaration for polling and snapshot logic, located
// in the monitor subdirectory.
//
// Tree Location:
// - src/monitor/mod.rs (monitor module entry point)
// - Submodules: dispatcher, scheduler, snapshot

pub mod dispatcher;
pub mod scheduler;
pub mod snapshot;

pub use dispatcher::Dispatcher;
pub use scheduler::{OverlapPolicy, PollScheduler};
pub use snapshot::{DeviceTelemetry, MinerSnapshot, Snapshot, SummaryTelemetry};

// Changelog:
// - v1.0.0 (2026-10-16): Initial monitor module.
//   - Purpose: Groups the poll cycle, its scheduler and the snapshot model.
