// BFGMiner Monitor - Free and Open Source Software Statement
//
// This project, bfgminer-monitor, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/utils/format.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file provides formatting helpers for telemetry values, located in the
// utils subdirectory. Non-finite inputs never panic; they render as a sentinel.
//
// Tree Location:
// - src/utils/format.rs (formatting utilities)
// - Depends on: std

/// Shown in place of NaN or infinite values
pub const NON_FINITE: &str = "--";

/// Utility functions for formatting miner telemetry
pub struct FormatUtils;

impl FormatUtils {
    /// Two decimal places, or the sentinel
    pub fn format_fixed(value: f64) -> String {
        if value.is_finite() {
            format!("{:.2}", value)
        } else {
            NON_FINITE.to_string()
        }
    }

    /// A ratio as a percentage with two decimal places (0.002 -> "0.20")
    pub fn format_percent(rate: f64) -> String {
        Self::format_fixed(rate * 100.0)
    }

    /// Hashrate given in MH/s, scaled to GH/s or TH/s when large
    pub fn format_hashrate(mhs: f64) -> String {
        if !mhs.is_finite() {
            return format!("{} MH/s", NON_FINITE);
        }
        if mhs >= 1_000_000.0 {
            format!("{:.2} TH/s", mhs / 1_000_000.0)
        } else if mhs >= 1_000.0 {
            format!("{:.2} GH/s", mhs / 1_000.0)
        } else {
            format!("{:.2} MH/s", mhs)
        }
    }

    /// Format large numbers with suffixes (K, M, B)
    pub fn format_number(num: u64) -> String {
        if num >= 1_000_000_000 {
            format!("{:.1}B", num as f64 / 1_000_000_000.0)
        } else if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }
}


// Changelog:
// - v1.0.0 (2026-10-16): Reworked for daemon telemetry.
//   - Purpose: Fixed-point, percentage and hashrate formatting for views.
//   - Note: NaN and infinity render as "--" instead of "NaN"/"inf".
