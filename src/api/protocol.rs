// BFGMiner Monitor - Free and Open Source Software Statement
//
// This project, bfgminer-monitor, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/api/protocol.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements the BFGMiner API wire format, located in the api
// subdirectory. It builds command requests and unframes NUL-terminated replies.
//
// Tree Location:
// - src/api/protocol.rs (API wire format)
// - Depends on: serde, serde_json

use log::debug;
use serde::Serialize;
use std::fmt;

const LOG_TARGET: &str = "bfgmon::api::protocol";

/// Terminator the daemon appends to every reply
pub const FRAME_TERMINATOR: u8 = 0x00;

/// Commands issued against the daemon each poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Summary,
    Devs,
}

impl Command {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Command::Summary => "summary",
            Command::Devs => "devs",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request, written as the entire payload of a connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandRequest {
    pub command: String,
    pub parameter: String,
}

impl CommandRequest {
    pub fn new(command: Command, parameter: &str) -> Self {
        Self {
            command: command.as_str().to_string(),
            parameter: parameter.to_string(),
        }
    }
}

/// Constructs and unframes BFGMiner API messages
pub struct ApiProtocol;

impl ApiProtocol {
    /// Serialize a request. No terminator is appended; the daemon reads until
    /// the payload parses.
    pub fn encode_request(request: &CommandRequest) -> serde_json::Result<Vec<u8>> {
        let bytes = serde_json::to_vec(request)?;
        debug!(target: LOG_TARGET, "Serialized API request: {}", String::from_utf8_lossy(&bytes));
        Ok(bytes)
    }

    /// True once a buffered reply holds its terminator
    pub fn is_complete(buffer: &[u8]) -> bool {
        buffer.contains(&FRAME_TERMINATOR)
    }

    /// Remove the first NUL byte only. Any later NUL is left in place and will
    /// fail decoding, which is the daemon-compatible behavior.
    pub fn unframe(mut buffer: Vec<u8>) -> Vec<u8> {
        if let Some(pos) = buffer.iter().position(|b| *b == FRAME_TERMINATOR) {
            buffer.remove(pos);
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names() {
        assert_eq!(Command::Summary.as_str(), "summary");
        assert_eq!(Command::Devs.to_string(), "devs");
    }

    #[test]
    fn test_encode_request() {
        let request = CommandRequest::new(Command::Summary, "");
        let bytes = ApiProtocol::encode_request(&request).unwrap();
        assert_eq!(bytes, br#"{"command":"summary","parameter":""}"#.to_vec());
    }

    #[test]
    fn test_unframe_trailing_nul() {
        let framed = b"{\"a\":1}\x00".to_vec();
        assert_eq!(ApiProtocol::unframe(framed), b"{\"a\":1}".to_vec());
    }

    #[test]
    fn test_unframe_only_first_nul() {
        let framed = b"{\"a\":1}\x00\x00".to_vec();
        assert_eq!(ApiProtocol::unframe(framed), b"{\"a\":1}\x00".to_vec());
    }

    #[test]
    fn test_unframe_without_terminator() {
        let framed = b"{\"a\":1}".to_vec();
        assert_eq!(ApiProtocol::unframe(framed), b"{\"a\":1}".to_vec());
    }

    #[test]
    fn test_is_complete() {
        assert!(!ApiProtocol::is_complete(b"{\"STATUS\""));
        assert!(ApiProtocol::is_complete(b"{}\x00"));
    }
}

// Changelog:
// - v1.0.0 (2026-10-16): Initial API wire format.
//   - Purpose: Builds {"command","parameter"} requests and strips the NUL
//     terminator from daemon replies.
//   - Note: Only the first NUL is removed, matching daemons that emit exactly one.
