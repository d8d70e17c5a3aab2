// Console and JSON rendering

use ethers::types::H256;
use serde::Serialize;
use std::time::Duration;

use crate::engine::DeploymentDiff;

/// Exit status of the command line tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Identical,
    Different,
    FetchFailed,
    InvalidInput,
    Interrupted,
}

impl Outcome {
    pub fn code(self) -> u8 {
        match self {
            Outcome::Identical => 0,
            Outcome::Different => 1,
            Outcome::FetchFailed => 3,
            Outcome::InvalidInput => 4,
            Outcome::Interrupted => 130,
        }
    }
}

impl From<&DeploymentDiff> for Outcome {
    fn from(diff: &DeploymentDiff) -> Self {
        if diff.result.identical() {
            Outcome::Identical
        } else {
            Outcome::Different
        }
    }
}

fn hash_line(hash: H256, length: usize) -> String {
    if length == 0 {
        format!("{:#x} (no code)", hash)
    } else {
        format!("{:#x}", hash)
    }
}

pub fn header(
    rpc_url: &str,
    chain_id: Option<u64>,
    address_a: &str,
    address_b: &str,
    block: &str,
) -> String {
    let chain_line = chain_id
        .map(|id| format!("🧭 Chain ID: {}\n", id))
        .unwrap_or_default();
    format!(
        "🔧 bytecode-diff\n🔗 RPC: {}\n{}🏷️ Comparing:\n   A: {}\n   B: {}\n🧱 Block: {}",
        rpc_url, chain_line, address_a, address_b, block
    )
}

pub fn verdict(diff: &DeploymentDiff) -> String {
    let summary = if diff.result.identical() {
        "✅ Bytecodes are identical.".to_string()
    } else {
        format!(
            "⚠️ Bytecodes differ! Length delta: {} bytes",
            diff.result.length_delta()
        )
    };
    format!(
        "🔹 Hash (A): {}\n🔸 Hash (B): {}\n{}",
        hash_line(diff.result.hash_a(), diff.length_a),
        hash_line(diff.result.hash_b(), diff.length_b),
        summary
    )
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub rpc: &'a str,
    pub chain_id: Option<u64>,
    #[serde(flatten)]
    pub diff: &'a DeploymentDiff,
    pub elapsed_seconds: f64,
    pub timestamp: String,
}

impl<'a> JsonReport<'a> {
    pub fn new(
        rpc: &'a str,
        chain_id: Option<u64>,
        diff: &'a DeploymentDiff,
        elapsed: Duration,
    ) -> Self {
        Self {
            rpc,
            chain_id,
            diff,
            elapsed_seconds: (elapsed.as_secs_f64() * 100.0).round() / 100.0,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn to_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
