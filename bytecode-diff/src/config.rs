// CLI argument parsing

use clap::Parser;
use std::time::Duration;

use crate::block::BlockReference;

pub const DEFAULT_RPC_URL: &str = "https://mainnet.infura.io/v3/YOUR_INFURA_KEY";

#[derive(Parser, Debug, Clone)]
#[clap(
    author,
    version,
    about = "Compare on-chain bytecode between two contracts to check deployment soundness \
             across chains or versions",
    long_about = None
)]
pub struct Args {
    /// EVM RPC URL
    #[clap(short = 'u', long = "rpc", env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// First contract address
    #[clap(short = 'a', long)]
    pub address_a: String,

    /// Second contract address to compare
    #[clap(short = 'b', long)]
    pub address_b: String,

    /// Block number or tag for comparison
    #[clap(long, default_value = "latest")]
    pub block: BlockReference,

    /// RPC timeout in seconds
    #[clap(short = 't', long, default_value_t = 30)]
    pub timeout: u64,

    /// Emit results in JSON format
    #[clap(long)]
    pub json: bool,
}

/// Settings resolved once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct DiffConfig {
    pub rpc_url: String,
    pub address_a: String,
    pub address_b: String,
    pub block: BlockReference,
    pub timeout: Duration,
    pub json: bool,
}

impl From<Args> for DiffConfig {
    fn from(args: Args) -> Self {
        Self {
            rpc_url: args.rpc_url,
            address_a: args.address_a,
            address_b: args.address_b,
            block: args.block,
            timeout: Duration::from_secs(args.timeout),
            json: args.json,
        }
    }
}
