// BFGMiner Monitor - Free and Open Source Software Statement
//
// This project, bfgminer-monitor, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/view.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file builds the display model handed to renderers. The numeric
// snapshot is only read; formatted copies of the derived fields are produced.
//
// Tree Location:
// - src/view.rs (display model and text panel)
// - Depends on: serde, monitor::snapshot, utils::format

use crate::monitor::snapshot::{DeviceTelemetry, DifficultyTotals, MinerSnapshot, ShareCounts, Snapshot};
use crate::utils::format::FormatUtils;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceView {
    pub id: String,
    pub connected: bool,
    pub description: String,
    pub avg_hashrate: String,
    pub hardware_errors: u64,
    /// Percentage
    pub hardware_error_rate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryView {
    pub description: String,
    pub avg_hashrate: String,
    pub hardware_errors: u64,
    /// Percentage
    pub hardware_error_rate: String,
    pub shares: ShareCounts,
    pub difficulty: DifficultyTotals,
    pub devices: Vec<DeviceView>,
}

/// What a renderer receives. Disconnected views carry only id, title and error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinerView {
    pub id: String,
    pub title: String,
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub telemetry: Option<TelemetryView>,
}

impl MinerView {
    pub fn render(id: &str, title: &str, snapshot: &Snapshot) -> Self {
        match snapshot {
            Snapshot::Connected(miner) => Self {
                id: id.to_string(),
                title: title.to_string(),
                connected: true,
                error: None,
                telemetry: Some(TelemetryView::from(miner)),
            },
            Snapshot::Disconnected(disconnected) => Self {
                id: id.to_string(),
                title: title.to_string(),
                connected: false,
                error: disconnected.error.clone(),
                telemetry: None,
            },
        }
    }
}

impl From<&DeviceTelemetry> for DeviceView {
    fn from(dev: &DeviceTelemetry) -> Self {
        Self {
            id: dev.id.clone(),
            connected: dev.connected,
            description: dev.description.clone(),
            avg_hashrate: FormatUtils::format_fixed(dev.avg_hashrate),
            hardware_errors: dev.hardware_errors,
            hardware_error_rate: FormatUtils::format_percent(dev.hardware_error_rate),
        }
    }
}

impl From<&MinerSnapshot> for TelemetryView {
    fn from(miner: &MinerSnapshot) -> Self {
        let summary = &miner.summary;
        Self {
            description: summary.description.clone(),
            avg_hashrate: FormatUtils::format_fixed(summary.avg_hashrate),
            hardware_errors: summary.hardware_errors,
            hardware_error_rate: FormatUtils::format_percent(summary.hardware_error_rate),
            shares: summary.shares.clone(),
            difficulty: summary.difficulty.clone(),
            devices: miner.devices.iter().map(DeviceView::from).collect(),
        }
    }
}

impl fmt::Display for MinerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ({}) ==", self.title, self.id)?;

        let Some(telemetry) = &self.telemetry else {
            return match &self.error {
                Some(error) => write!(f, "Disconnected: {}", error),
                None => write!(f, "Disconnected: waiting for first poll"),
            };
        };

        writeln!(
            f,
            "{} | {} MH/s | HW errors {} ({}%)",
            telemetry.description,
            telemetry.avg_hashrate,
            telemetry.hardware_errors,
            telemetry.hardware_error_rate
        )?;
        writeln!(
            f,
            "Shares: accepted {}, rejected {}, stale {}, discarded {}, best {}",
            telemetry.shares.accepted,
            telemetry.shares.rejected,
            telemetry.shares.stale,
            telemetry.shares.discarded,
            FormatUtils::format_number(telemetry.shares.best)
        )?;
        write!(
            f,
            "Difficulty: accepted {}, rejected {}, stale {}",
            FormatUtils::format_fixed(telemetry.difficulty.accepted),
            FormatUtils::format_fixed(telemetry.difficulty.rejected),
            FormatUtils::format_fixed(telemetry.difficulty.stale)
        )?;

        for dev in &telemetry.devices {
            write!(
                f,
                "\n  [{}] {:<4} {} {} MH/s HW {} ({}%)",
                dev.id,
                if dev.connected { "up" } else { "down" },
                dev.description,
                dev.avg_hashrate,
                dev.hardware_errors,
                dev.hardware_error_rate
            )?;
        }
        Ok(())
    }
}


// Changelog:
// - v1.0.0 (2026-10-16): Initial display model.
//   - Purpose: Formats hashrates to two decimals and error rates as percentages
//     for renderers, with a minimal view for disconnected miners.
