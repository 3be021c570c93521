// BFGMiner Monitor - Free and Open Source Software Statement
//
// This project, bfgminer-monitor, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/monitor/dispatcher.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements one poll cycle, located in the monitor subdirectory.
// It fans out `summary` and `devs` concurrently and combines the replies.
//
// Tree Location:
// - src/monitor/dispatcher.rs (poll cycle)
// - Depends on: tokio, api::client, monitor::snapshot

use super::snapshot::{MinerSnapshot, Snapshot, build_snapshot};
use crate::api::{ApiClient, ApiError};
use crate::core::types::ConnectionTarget;
use crate::utils::FormatUtils;
use log::{debug, warn};

const LOG_TARGET: &str = "bfgmon::monitor::dispatcher";

#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: ApiClient,
}

impl Dispatcher {
    pub fn new(target: ConnectionTarget) -> Self {
        Self {
            client: ApiClient::new(target),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Run both commands on separate connections and wait for both. The
    /// `summary` error wins when both fail.
    pub async fn try_poll_once(&self) -> Result<MinerSnapshot, ApiError> {
        let (summary, devs) = tokio::join!(self.client.summary(), self.client.devs());

        let summary = summary?;
        let devs = devs?;
        build_snapshot(&summary, &devs)
    }

    /// One full cycle. Failures become a disconnected snapshot carrying a
    /// single error message.
    pub async fn poll_once(&self) -> Snapshot {
        match self.try_poll_once().await {
            Ok(miner) => {
                debug!(target: LOG_TARGET,
                    "Polled {}: {}, {} device(s)",
                    self.client.target().address(),
                    FormatUtils::format_hashrate(miner.summary.avg_hashrate),
                    miner.devices.len()
                );
                Snapshot::Connected(miner)
            }
            Err(e) => {
                warn!(target: LOG_TARGET, "Poll of {} failed: {}", self.client.target().address(), e);
                Snapshot::disconnected(e)
            }
        }
    }
}

// Changelog:
// - v1.0.0 (2026-10-16): Initial dispatcher.
//   - Purpose: Issues `summary` and `devs` together and never publishes a mix of
//     one success and one failure.
