use ethers::types::Bytes;
use futures::future::try_join;
use log::info;
use serde::Serialize;
use std::time::Duration;

use crate::{
    address::ContractAddress,
    block::BlockReference,
    diff::{compare, Comparison},
    error::{DiffError, Result, Side},
    fetcher::{fetch_code, CodeProvider},
};

/// Both deployments and their comparison. Only built when both fetches succeeded.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentDiff {
    pub address_a: ContractAddress,
    pub address_b: ContractAddress,
    pub block: BlockReference,
    pub length_a: usize,
    pub length_b: usize,
    pub result: Comparison,
}

fn parse_side(side: Side, input: &str) -> Result<ContractAddress> {
    input
        .parse()
        .map_err(|source| DiffError::InvalidAddress { side, source })
}

async fn fetch_side<P: CodeProvider + ?Sized>(
    provider: &P,
    side: Side,
    address: &ContractAddress,
    block: BlockReference,
    timeout: Duration,
) -> Result<Bytes> {
    fetch_code(provider, address, block, timeout)
        .await
        .map_err(|source| DiffError::Fetch { side, source })
}

/// Fetch the code at two addresses and compare it.
///
/// Both addresses are validated before anything is sent to the node. The two
/// fetches run concurrently; the first failure aborts the other and no
/// comparison is produced.
pub async fn compare_deployments<P: CodeProvider + ?Sized>(
    provider: &P,
    address_a: &str,
    address_b: &str,
    block: BlockReference,
    timeout: Duration,
) -> Result<DeploymentDiff> {
    let address_a = parse_side(Side::A, address_a)?;
    let address_b = parse_side(Side::B, address_b)?;

    let (code_a, code_b) = try_join(
        fetch_side(provider, Side::A, &address_a, block, timeout),
        fetch_side(provider, Side::B, &address_b, block, timeout),
    )
    .await?;

    let result = compare(&code_a, &code_b);
    info!(
        "{} vs {} at {}: identical={} delta={}",
        address_a,
        address_b,
        block,
        result.identical(),
        result.length_delta()
    );

    Ok(DeploymentDiff {
        address_a,
        address_b,
        block,
        length_a: code_a.len(),
        length_b: code_b.len(),
        result,
    })
}
