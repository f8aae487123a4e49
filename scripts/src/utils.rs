//! Utilities for the deploy scripts.

use std::{fs, path::Path, str::FromStr};

use alloy::{
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use tracing::info;

use crate::{
    artifacts::split_qualified_name,
    constants::MOCK_CONTRACTS,
    errors::{ProviderError, ScriptError},
    types::DeploymentRequest,
};

/// Sets up the signing client used to deploy contracts, from the deployer's
/// private key and the network RPC url.
///
/// Fetches the chain ID so that an unreachable endpoint fails here rather
/// than on the first deployment.
pub async fn setup_client(priv_key: &str, rpc_url: &str) -> Result<DynProvider, ProviderError> {
    let url =
        Url::parse(rpc_url).map_err(|e| ProviderError::ClientInitialization(e.to_string()))?;
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ProviderError::ClientInitialization(e.to_string()))?;
    let deployer = signer.address();

    let provider = ProviderBuilder::new().wallet(signer).connect_http(url);
    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ProviderError::ClientInitialization(e.to_string()))?;

    info!("connected to chain {chain_id} as deployer {deployer:#x}");
    Ok(DynProvider::new(provider))
}

/// Read an ordered list of deployment requests from a JSON file
pub fn read_requests_file(file_path: &Path) -> Result<Vec<DeploymentRequest>, ScriptError> {
    let contents = fs::read_to_string(file_path)
        .map_err(|e| ScriptError::ReadRequests(format!("{}: {e}", file_path.display())))?;

    parse_requests(&contents)
        .map_err(|e| ScriptError::ReadRequests(format!("{}: {e}", file_path.display())))
}

/// Parse an ordered list of deployment requests from JSON
pub fn parse_requests(json: &str) -> Result<Vec<DeploymentRequest>, String> {
    let requests: Vec<DeploymentRequest> = serde_json::from_str(json).map_err(|e| e.to_string())?;
    if requests.is_empty() {
        return Err("no deployment requests given".to_string());
    }

    Ok(requests)
}

/// Whether the given contract is a mock that should only be deployed for testing
pub fn is_mock_contract(contract_name: &str) -> bool {
    let (_, name) = split_qualified_name(contract_name);
    MOCK_CONTRACTS.contains(&name)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_read_requests_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{ "contract": "MockWETH" }}, {{ "contract": "Profitmaxpresale", "args": ["0x01"] }}]"#
        )
        .unwrap();

        let requests = read_requests_file(file.path()).unwrap();
        assert_eq!(
            requests,
            vec![
                DeploymentRequest::new("MockWETH", Vec::<&str>::new()),
                DeploymentRequest::new("Profitmaxpresale", ["0x01"]),
            ]
        );
    }

    #[test]
    fn test_missing_requests_file() {
        let res = read_requests_file(Path::new("/nonexistent/requests.json"));
        assert!(matches!(res, Err(ScriptError::ReadRequests(_))));
    }

    #[test]
    fn test_empty_requests() {
        assert!(parse_requests("[]").is_err());
        assert!(parse_requests("{}").is_err());
    }

    #[test]
    fn test_mock_contracts() {
        assert!(is_mock_contract("ERC20Token"));
        assert!(is_mock_contract("MockWETH"));
        assert!(!is_mock_contract("PointAMM"));
        assert!(is_mock_contract("contracts/Token.sol:ERC20Token"));
        assert!(!is_mock_contract("contracts/Amm.sol:PointAMM"));
    }
}
