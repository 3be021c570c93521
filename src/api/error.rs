// BFGMiner Monitor - Free and Open Source Software Statement
//
// This project, bfgminer-monitor, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/api/error.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file defines the error taxonomy for talking to the BFGMiner API daemon,
// located in the api subdirectory.

use super::protocol::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("transport error on `{command}` to {address}: {source}")]
    Transport {
        command: Command,
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode `{command}` response: {source}")]
    Decode {
        command: Command,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed `{command}` response: {reason}")]
    MalformedResponse { command: Command, reason: String },
}

impl ApiError {
    pub fn command(&self) -> Command {
        match self {
            ApiError::Transport { command, .. }
            | ApiError::Decode { command, .. }
            | ApiError::MalformedResponse { command, .. } => *command,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. })
    }
}
