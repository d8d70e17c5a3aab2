//! Compare the deployed bytecode of two contract accounts.
//!
//! [`compare_deployments`] validates both addresses, reads their code from an
//! EVM node through a [`CodeProvider`] and hands the two blobs to [`compare`].

pub mod address;
pub mod block;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod fetcher;
pub mod report;

pub use address::ContractAddress;
pub use block::BlockReference;
pub use diff::{code_hash, compare, Comparison, EMPTY_CODE_HASH};
pub use engine::{compare_deployments, DeploymentDiff};
pub use error::{DiffError, FetchCause, FetchError, InvalidAddressError, Side};
pub use fetcher::{chain_id, fetch_code, CodeProvider, RpcCodeProvider};
