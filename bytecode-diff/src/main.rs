// src/main.rs for bytecode-diff

use bytecode_diff::{
    address::ContractAddress,
    chain_id, compare_deployments,
    config::{Args, DiffConfig},
    fetcher::EndpointError,
    report::{self, JsonReport, Outcome},
    DiffError, RpcCodeProvider,
};
use clap::Parser;
use dotenv::dotenv;
use log::{error, warn};
use std::{process::ExitCode, time::Instant};

// Echo the checksummed form when the input parses; validation errors are
// reported by the comparison itself.
fn display_address(input: &str) -> String {
    input
        .parse::<ContractAddress>()
        .map(|address| address.to_string())
        .unwrap_or_else(|_| input.to_string())
}

async fn run(config: DiffConfig, start: Instant) -> eyre::Result<Outcome> {
    let provider = RpcCodeProvider::connect(&config.rpc_url)?;

    let chain_id = match chain_id(&provider, config.timeout).await {
        Ok(id) => Some(id),
        Err(e) => {
            warn!("Could not read chain ID: {}", e);
            None
        }
    };

    println!(
        "{}",
        report::header(
            &config.rpc_url,
            chain_id,
            &display_address(&config.address_a),
            &display_address(&config.address_b),
            &config.block.to_string(),
        )
    );

    let diff = compare_deployments(
        &provider,
        &config.address_a,
        &config.address_b,
        config.block,
        config.timeout,
    )
    .await?;

    println!("{}", report::verdict(&diff));

    let elapsed = start.elapsed();
    println!("⏱️ Completed in {:.2}s", elapsed.as_secs_f64());

    if config.json {
        let report = JsonReport::new(&config.rpc_url, chain_id, &diff, elapsed);
        println!("{}", report.to_pretty()?);
    }

    Ok(Outcome::from(&diff))
}

fn outcome_for(err: &eyre::Report) -> Outcome {
    match err.downcast_ref::<DiffError>() {
        Some(DiffError::Fetch { .. }) => Outcome::FetchFailed,
        Some(DiffError::InvalidAddress { .. }) => Outcome::InvalidInput,
        None if err.downcast_ref::<EndpointError>().is_some() => Outcome::InvalidInput,
        None => Outcome::FetchFailed,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let start = Instant::now();
    dotenv().ok();
    env_logger::init();

    let config = DiffConfig::from(Args::parse());

    let outcome = tokio::select! {
        result = run(config, start) => match result {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("{:?}", e);
                eprintln!("❌ {}", e);
                outcome_for(&e)
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("❌ Interrupted, no comparison made");
            Outcome::Interrupted
        }
    };

    ExitCode::from(outcome.code())
}
