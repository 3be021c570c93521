// BFGMiner Monitor - Free and Open Source Software Statement
//
// This project, bfgminer-monitor, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/api/messages.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file defines the typed shape of BFGMiner API replies, located in the api
// subdirectory. Field names follow the daemon verbatim; anything missing or of
// the wrong type fails at decode time.
//
// Tree Location:
// - src/api/messages.rs (daemon reply structures)
// - Depends on: serde, serde_json

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Entry of the `STATUS` array present in every reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEntry {
    #[serde(rename = "Description")]
    pub description: String,

    /// Status code letter (S, I, W, E, F); not all daemons send it
    #[serde(rename = "STATUS", default)]
    pub status: Option<String>,

    #[serde(rename = "Msg", default)]
    pub msg: Option<String>,
}

/// Aggregate counters from the `summary` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryEntry {
    #[serde(rename = "MHS av")]
    pub mhs_av: f64,

    #[serde(rename = "Hardware Errors")]
    pub hardware_errors: u64,

    #[serde(rename = "Accepted")]
    pub accepted: u64,

    #[serde(rename = "Rejected")]
    pub rejected: u64,

    #[serde(rename = "Best Share")]
    pub best_share: u64,

    #[serde(rename = "Stale")]
    pub stale: u64,

    #[serde(rename = "Discarded")]
    pub discarded: u64,

    #[serde(rename = "Difficulty Accepted")]
    pub difficulty_accepted: f64,

    #[serde(rename = "Difficulty Rejected")]
    pub difficulty_rejected: f64,

    #[serde(rename = "Difficulty Stale")]
    pub difficulty_stale: f64,
}

/// Reply to `summary`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    #[serde(rename = "STATUS")]
    pub status: Vec<StatusEntry>,

    #[serde(rename = "SUMMARY")]
    pub summary: Vec<SummaryEntry>,
}

/// One device from the `devs` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceEntry {
    #[serde(rename = "ID", deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(rename = "Status")]
    pub status: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "MHS 300s")]
    pub mhs_300s: f64,

    #[serde(rename = "Hardware Errors")]
    pub hardware_errors: u64,

    #[serde(rename = "Accepted")]
    pub accepted: u64,
}

/// Reply to `devs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevsResponse {
    #[serde(rename = "STATUS", default)]
    pub status: Vec<StatusEntry>,

    #[serde(rename = "DEVS")]
    pub devs: Vec<DeviceEntry>,
}

/// Device IDs are strings on some builds and bare indices on others
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number for device ID, got {}",
            other
        ))),
    }
}


// Changelog:
// - v1.0.0 (2026-10-16): Initial reply structures.
//   - Purpose: Decodes `summary` and `devs` replies into typed structures so
//     malformed payloads fail with a serde error instead of a field fault.
//   - Features: Accepts string or numeric device IDs.
