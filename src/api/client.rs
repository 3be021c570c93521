// BFGMiner Monitor - Free and Open Source Software Statement
//
// This project, bfgminer-monitor, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/api/client.rs
// Version: 1.0.1
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements the TCP client for the BFGMiner API daemon, located in
// the api subdirectory. Every command uses its own short-lived connection.
//
// Tree Location:
// - src/api/client.rs (API TCP client logic)
// - Depends on: tokio, serde_json, api::protocol, api::messages

use super::error::ApiError;
use super::messages::{DevsResponse, SummaryResponse};
use super::protocol::{ApiProtocol, Command, CommandRequest};
use crate::core::types::ConnectionTarget;
use log::{debug, trace};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::io;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, lookup_host};

const LOG_TARGET: &str = "bfgmon::api::client";

const READ_CHUNK: usize = 4096;

/// Largest reply accepted before the terminator; past this the exchange fails
/// with `InvalidData` instead of buffering without bound
pub const MAX_REPLY_BYTES: usize = 1 << 20;

/// Client for one daemon. Holds no connection state between calls.
#[derive(Debug, Clone)]
pub struct ApiClient {
    target: ConnectionTarget,
}

impl ApiClient {
    pub fn new(target: ConnectionTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &ConnectionTarget {
        &self.target
    }

    /// Resolve daemon address from either IP:port or domain:port format
    async fn resolve_address(address: &str) -> io::Result<SocketAddr> {
        if let Ok(addr) = address.parse::<SocketAddr>() {
            return Ok(addr);
        }

        let mut addrs = lookup_host(address).await?;
        addrs.next().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no addresses found for {}", address),
            )
        })
    }

    /// Send one command and return the decoded reply as an untyped tree
    pub async fn send_command(&self, command: Command, parameter: &str) -> Result<Value, ApiError> {
        self.send_typed(command, parameter).await
    }

    /// Send one command and decode the reply into `T`. A single attempt is
    /// made and exactly one result is returned.
    pub async fn send_typed<T: DeserializeOwned>(
        &self,
        command: Command,
        parameter: &str,
    ) -> Result<T, ApiError> {
        let address = self.target.address();
        let request = CommandRequest::new(command, parameter);

        let exchange = Self::exchange(&address, &request);
        let framed = match self.target.timeout {
            Some(limit) => match tokio::time::timeout(limit, exchange).await {
                Ok(result) => result,
                Err(_) => Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("no reply within {}ms", limit.as_millis()),
                )),
            },
            None => exchange.await,
        }
        .map_err(|source| ApiError::Transport {
            command,
            address: address.clone(),
            source,
        })?;

        let payload = ApiProtocol::unframe(framed);
        trace!(target: LOG_TARGET, "`{}` reply: {}", command, String::from_utf8_lossy(&payload));

        serde_json::from_slice(&payload).map_err(|source| ApiError::Decode { command, source })
    }

    pub async fn summary(&self) -> Result<SummaryResponse, ApiError> {
        self.send_typed(Command::Summary, "").await
    }

    pub async fn devs(&self) -> Result<DevsResponse, ApiError> {
        self.send_typed(Command::Devs, "").await
    }

    /// Connect, write the request, and read until the terminator or EOF.
    /// The stream is dropped on every return path.
    async fn exchange(address: &str, request: &CommandRequest) -> io::Result<Vec<u8>> {
        let resolved = Self::resolve_address(address).await?;
        let mut stream = TcpStream::connect(resolved).await?;
        stream.set_nodelay(true)?;
        debug!(target: LOG_TARGET, "Connected to {} for `{}`", resolved, request.command);

        let payload = ApiProtocol::encode_request(request).map_err(io::Error::other)?;
        stream.write_all(&payload).await?;

        let mut buffer = Vec::new();
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            let n = stream.read(&mut chunk).await?;
            if n == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..n]);
            if ApiProtocol::is_complete(&buffer) {
                break;
            }
            if buffer.len() > MAX_REPLY_BYTES {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("reply exceeded {} bytes without a terminator", MAX_REPLY_BYTES),
                ));
            }
        }

        debug!(target: LOG_TARGET, "Read {} bytes for `{}`", buffer.len(), request.command);
        Ok(buffer)
    }
}

// Changelog:
// - v1.0.0 (2026-10-16): Initial API client.
//   - Purpose: Issues one command per TCP connection against the daemon.
//   - Features: Resolves IP or hostname targets, reads until the NUL terminator
//     or EOF, and classifies failures as transport or decode errors.
//   - Note: No retry or backoff; an optional timeout covers the whole exchange.
// - v1.0.1 (2026-10-16): Replies are capped at `MAX_REPLY_BYTES`.
