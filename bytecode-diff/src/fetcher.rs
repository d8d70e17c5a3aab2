// Code retrieval over JSON-RPC

use async_trait::async_trait;
use ethers::{
    providers::{Http as EthersHttp, Middleware, Provider as EthersProvider},
    types::{Bytes, U256},
};
use log::debug;
use std::{future::Future, sync::Arc, time::Duration};
use thiserror::Error;
use url::Url;

use crate::{
    address::ContractAddress,
    block::BlockReference,
    error::{FetchCause, FetchError},
};

/// Anything that can answer `eth_getCode`.
#[async_trait]
pub trait CodeProvider: Send + Sync {
    async fn get_code(&self, address: ContractAddress, block: BlockReference)
        -> Result<Bytes, FetchCause>;

    /// Chain id of the node, if it can tell. Only used for display.
    async fn chain_id(&self) -> Result<u64, FetchCause> {
        Err(FetchCause::Provider("chain id not supported".to_string()))
    }
}

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("Invalid RPC URL {0:?}: {1}")]
    Parse(String, #[source] url::ParseError),

    #[error("Invalid RPC URL {0:?}: scheme must be http or https")]
    Scheme(String),
}

/// `CodeProvider` backed by an ethers middleware stack.
#[derive(Debug, Clone)]
pub struct RpcCodeProvider<M> {
    client: Arc<M>,
}

impl<M: Middleware> RpcCodeProvider<M> {
    pub fn new(client: M) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

impl RpcCodeProvider<EthersProvider<EthersHttp>> {
    /// Build an HTTP provider for `rpc_url`. No request is sent.
    pub fn connect(rpc_url: &str) -> Result<Self, EndpointError> {
        let url =
            Url::parse(rpc_url).map_err(|e| EndpointError::Parse(rpc_url.to_string(), e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(EndpointError::Scheme(rpc_url.to_string()));
        }
        Ok(Self::new(EthersProvider::new(EthersHttp::new(url))))
    }
}

#[async_trait]
impl<M: Middleware> CodeProvider for RpcCodeProvider<M> {
    async fn get_code(
        &self,
        address: ContractAddress,
        block: BlockReference,
    ) -> Result<Bytes, FetchCause> {
        self.client
            .get_code(address.as_address(), Some(block.into()))
            .await
            .map_err(|e| FetchCause::Provider(e.to_string()))
    }

    async fn chain_id(&self) -> Result<u64, FetchCause> {
        let id = self
            .client
            .get_chainid()
            .await
            .map_err(|e| FetchCause::Provider(e.to_string()))?;
        if id > U256::from(u64::MAX) {
            return Err(FetchCause::Provider(format!("chain id {} out of range", id)));
        }
        Ok(id.as_u64())
    }
}

async fn with_timeout<T>(
    timeout: Duration,
    call: impl Future<Output = Result<T, FetchCause>>,
) -> Result<T, FetchCause> {
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(FetchCause::Timeout(timeout)),
    }
}

/// Read the deployed code of `address` at `block`.
///
/// Issues exactly one provider call, bounded by `timeout`. An account without
/// code yields empty bytes. Failures are returned as-is and never retried.
pub async fn fetch_code<P: CodeProvider + ?Sized>(
    provider: &P,
    address: &ContractAddress,
    block: BlockReference,
    timeout: Duration,
) -> Result<Bytes, FetchError> {
    debug!("eth_getCode {} at {}", address, block);
    let code = with_timeout(timeout, provider.get_code(*address, block))
        .await
        .map_err(|cause| FetchError {
            address: *address,
            cause,
        })?;
    debug!("{} has {} bytes of code", address, code.len());
    Ok(code)
}

pub async fn chain_id<P: CodeProvider + ?Sized>(
    provider: &P,
    timeout: Duration,
) -> Result<u64, FetchCause> {
    with_timeout(timeout, provider.chain_id()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::providers::Provider;

    const TIMEOUT: Duration = Duration::from_secs(5);
    const ADDRESS: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    fn address() -> ContractAddress {
        ADDRESS.parse().unwrap()
    }

    #[tokio::test]
    async fn returns_code_from_node() {
        let (provider, mock) = Provider::mocked();
        mock.push::<Bytes, _>(Bytes::from(vec![0x60, 0x80, 0x60, 0x40, 0x52]))
            .unwrap();

        let provider = RpcCodeProvider::new(provider);
        let code = fetch_code(&provider, &address(), BlockReference::Latest, TIMEOUT)
            .await
            .unwrap();
        assert_eq!(code.to_vec(), vec![0x60, 0x80, 0x60, 0x40, 0x52]);
    }

    #[tokio::test]
    async fn account_without_code_is_empty_not_error() {
        let (provider, mock) = Provider::mocked();
        mock.push::<Bytes, _>(Bytes::new()).unwrap();

        let provider = RpcCodeProvider::new(provider);
        let code = fetch_code(&provider, &address(), BlockReference::Number(1), TIMEOUT)
            .await
            .unwrap();
        assert!(code.is_empty());
    }

    #[tokio::test]
    async fn provider_failure_names_the_address() {
        // An empty mock queue fails the request.
        let (provider, _mock) = Provider::mocked();

        let provider = RpcCodeProvider::new(provider);
        let err = fetch_code(&provider, &address(), BlockReference::Latest, TIMEOUT)
            .await
            .unwrap_err();
        assert_eq!(err.address, address());
        assert!(matches!(err.cause, FetchCause::Provider(_)));
        assert!(err.to_string().contains(ADDRESS));
    }

    #[tokio::test]
    async fn reads_chain_id() {
        let (provider, mock) = Provider::mocked();
        mock.push::<U256, _>(U256::from(1337u64)).unwrap();

        let provider = RpcCodeProvider::new(provider);
        assert_eq!(chain_id(&provider, TIMEOUT).await, Ok(1337));
    }

    #[tokio::test]
    async fn oversized_chain_id_is_an_error() {
        let (provider, mock) = Provider::mocked();
        mock.push::<U256, _>(U256::MAX).unwrap();

        let provider = RpcCodeProvider::new(provider);
        let result = chain_id(&provider, TIMEOUT).await;
        assert!(matches!(result, Err(FetchCause::Provider(_))), "{:?}", result);
    }

    #[test]
    fn connect_rejects_non_http_endpoints() {
        assert!(matches!(
            RpcCodeProvider::connect("ws://localhost:8546"),
            Err(EndpointError::Scheme(_))
        ));
        assert!(matches!(
            RpcCodeProvider::connect("localhost:8545/not a url"),
            Err(EndpointError::Parse(..)) | Err(EndpointError::Scheme(_))
        ));
        assert!(RpcCodeProvider::connect("http://localhost:8545").is_ok());
    }
}
