//! The deployment provider: the external collaborator that resolves contract
//! artifacts and submits creation transactions to the chain

use alloy::providers::DynProvider;
use alloy_contract::RawCallBuilder;
use alloy_primitives::Address;
use async_trait::async_trait;
use tracing::{debug, info};

use crate::{
    artifacts::ArtifactRegistry, errors::ProviderError, types::DeploymentRequest,
    utils::setup_client,
};

/// A provider capable of deploying a contract and waiting for its confirmation
#[async_trait]
pub trait DeploymentProvider {
    /// Deploy the requested contract, returning its address once the creation
    /// transaction is confirmed
    async fn deploy(&self, request: &DeploymentRequest) -> Result<Address, ProviderError>;
}

#[async_trait]
impl<P: DeploymentProvider + Sync + ?Sized> DeploymentProvider for &P {
    async fn deploy(&self, request: &DeploymentRequest) -> Result<Address, ProviderError> {
        (**self).deploy(request).await
    }
}

/// Deploys contracts from a local build directory over JSON-RPC,
/// signing with a local private key
pub struct RpcDeploymentProvider {
    /// The signing RPC client
    client: DynProvider,
    /// The registry from which contract artifacts are resolved
    registry: ArtifactRegistry,
    /// The number of confirmations to wait for on each deployment
    confirmations: u64,
}

impl RpcDeploymentProvider {
    /// Connect to the given RPC endpoint with the given deployer key
    pub async fn connect(
        rpc_url: &str,
        priv_key: &str,
        registry: ArtifactRegistry,
        confirmations: u64,
    ) -> Result<Self, ProviderError> {
        let client = setup_client(priv_key, rpc_url).await?;
        Ok(Self::new(client, registry, confirmations))
    }

    /// Create a provider around an existing client
    pub fn new(client: DynProvider, registry: ArtifactRegistry, confirmations: u64) -> Self {
        Self {
            client,
            registry,
            confirmations,
        }
    }
}

#[async_trait]
impl DeploymentProvider for RpcDeploymentProvider {
    async fn deploy(&self, request: &DeploymentRequest) -> Result<Address, ProviderError> {
        let factory = self.registry.contract_factory(&request.contract_name)?;
        let creation_code = factory.creation_code(&request.constructor_args)?;

        let pending_tx = RawCallBuilder::new_raw_deploy(self.client.clone(), creation_code)
            .send()
            .await
            .map_err(|e| ProviderError::ContractDeployment(e.to_string()))?;

        let tx_hash = *pending_tx.tx_hash();
        info!("sent `{}` creation transaction {tx_hash:#x}", request.contract_name);

        let receipt = pending_tx
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await
            .map_err(|e| ProviderError::ContractDeployment(e.to_string()))?;
        debug!(
            block = ?receipt.block_number,
            gas_used = receipt.gas_used,
            "creation transaction {tx_hash:#x} confirmed"
        );

        if !receipt.status() {
            return Err(ProviderError::Reverted(format!("{tx_hash:#x}")));
        }

        receipt.contract_address.ok_or_else(|| {
            ProviderError::ContractDeployment(format!(
                "no contract address in receipt for {tx_hash:#x}"
            ))
        })
    }
}
