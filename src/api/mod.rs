// BFGMiner Monitor - Free and Open Source Software Statement
//
// This project, bfgminer-monitor, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/api/mod.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file is the module declaration for the daemon API functionality,
// located in the api subdirectory.
//
// Tree Location:
// - src/api/mod.rs (api module entry point)
// - Submodules: client, error, messages, protocol

pub mod client;
pub mod error;
pub mod messages;
pub mod protocol;

// Re-export key types for convenience
pub use client::ApiClient;
pub use error::ApiError;
pub use protocol::Command;

// Changelog:
// - v1.0.0 (2026-10-16): Initial api module.
//   - Purpose: Groups the daemon client, wire format, reply types and errors.
