// BFGMiner Monitor - Free and Open Source Software Statement
//
// This project, bfgminer-monitor, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/monitor/snapshot.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file defines the published snapshot and the pure mapping from daemon
// replies into it, located in the monitor subdirectory.
//
// Tree Location:
// - src/monitor/snapshot.rs (snapshot model and normalization)
// - Depends on: serde, api::messages

use crate::api::messages::{DevsResponse, SummaryResponse};
use crate::api::{ApiError, Command};
use serde::Serialize;

/// Status string the daemon reports for a working device
pub const DEVICE_ALIVE: &str = "Alive";

/// Telemetry for one mining device
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceTelemetry {
    pub id: String,
    pub connected: bool,
    pub description: String,
    /// MH/s over the daemon's 300s window
    pub avg_hashrate: f64,
    pub hardware_errors: u64,
    /// errors / accepted; non-finite when nothing was accepted
    pub hardware_error_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareCounts {
    pub accepted: u64,
    pub rejected: u64,
    pub best: u64,
    pub stale: u64,
    pub discarded: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifficultyTotals {
    pub accepted: f64,
    pub rejected: f64,
    pub stale: f64,
}

/// Aggregate telemetry from `summary`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTelemetry {
    pub connected: bool,
    pub description: String,
    /// MH/s averaged since start
    pub avg_hashrate: f64,
    pub hardware_errors: u64,
    pub hardware_error_rate: f64,
    pub shares: ShareCounts,
    pub difficulty: DifficultyTotals,
}

/// Result of a successful poll cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinerSnapshot {
    #[serde(flatten)]
    pub summary: SummaryTelemetry,
    pub devices: Vec<DeviceTelemetry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisconnectedSnapshot {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The unit of published state. Replaced wholesale every cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Snapshot {
    Connected(MinerSnapshot),
    Disconnected(DisconnectedSnapshot),
}

impl Snapshot {
    /// State before the first cycle has published
    pub fn pending() -> Self {
        Snapshot::Disconnected(DisconnectedSnapshot {
            connected: false,
            error: None,
        })
    }

    pub fn disconnected(error: impl ToString) -> Self {
        Snapshot::Disconnected(DisconnectedSnapshot {
            connected: false,
            error: Some(error.to_string()),
        })
    }

    pub fn connected(summary: SummaryTelemetry, devices: Vec<DeviceTelemetry>) -> Self {
        Snapshot::Connected(MinerSnapshot { summary, devices })
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Snapshot::Connected(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Snapshot::Disconnected(d) => d.error.as_deref(),
            Snapshot::Connected(_) => None,
        }
    }

    pub fn as_miner(&self) -> Option<&MinerSnapshot> {
        match self {
            Snapshot::Connected(m) => Some(m),
            Snapshot::Disconnected(_) => None,
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::pending()
    }
}

/// Plain IEEE division; 0 accepted yields NaN or infinity and is kept as such
pub fn hardware_error_rate(hardware_errors: u64, accepted: u64) -> f64 {
    hardware_errors as f64 / accepted as f64
}

pub fn normalize_summary(raw: &SummaryResponse) -> Result<SummaryTelemetry, ApiError> {
    let status = raw.status.first().ok_or_else(|| ApiError::MalformedResponse {
        command: Command::Summary,
        reason: "STATUS array is empty".into(),
    })?;
    let summary = raw.summary.first().ok_or_else(|| ApiError::MalformedResponse {
        command: Command::Summary,
        reason: "SUMMARY array is empty".into(),
    })?;

    Ok(SummaryTelemetry {
        connected: true,
        description: status.description.clone(),
        avg_hashrate: summary.mhs_av,
        hardware_errors: summary.hardware_errors,
        hardware_error_rate: hardware_error_rate(summary.hardware_errors, summary.accepted),
        shares: ShareCounts {
            accepted: summary.accepted,
            rejected: summary.rejected,
            best: summary.best_share,
            stale: summary.stale,
            discarded: summary.discarded,
        },
        difficulty: DifficultyTotals {
            accepted: summary.difficulty_accepted,
            rejected: summary.difficulty_rejected,
            stale: summary.difficulty_stale,
        },
    })
}

pub fn normalize_devices(raw: &DevsResponse) -> Vec<DeviceTelemetry> {
    raw.devs
        .iter()
        .map(|dev| DeviceTelemetry {
            id: dev.id.clone(),
            connected: dev.status == DEVICE_ALIVE,
            description: dev.name.clone(),
            avg_hashrate: dev.mhs_300s,
            hardware_errors: dev.hardware_errors,
            hardware_error_rate: hardware_error_rate(dev.hardware_errors, dev.accepted),
        })
        .collect()
}

/// Combine both replies into a connected snapshot
pub fn build_snapshot(summary: &SummaryResponse, devs: &DevsResponse) -> Result<MinerSnapshot, ApiError> {
    Ok(MinerSnapshot {
        summary: normalize_summary(summary)?,
        devices: normalize_devices(devs),
    })
}


// Changelog:
// - v1.0.0 (2026-10-16): Initial snapshot model.
//   - Purpose: Maps `summary` and `devs` replies into the published snapshot and
//     derives hardware error rates.
//   - Note: Non-finite rates are data, not errors.
