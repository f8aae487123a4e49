//! The deployment runner, which drives a [`DeploymentProvider`] through an
//! ordered list of deployment requests

use std::io::Write;

use alloy_primitives::Address;
use tracing::{info, warn};

use crate::{
    errors::{ProviderError, ScriptError},
    provider::DeploymentProvider,
    types::{Deployment, DeploymentRequest},
    utils::is_mock_contract,
};

/// Deploys contracts one at a time through a deployment provider
pub struct DeploymentRunner<P> {
    /// The provider through which contracts are deployed
    provider: P,
}

impl<P: DeploymentProvider> DeploymentRunner<P> {
    /// Create a runner over the given provider
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Deploy a single contract, returning its address once confirmed.
    ///
    /// Each call submits a new creation transaction, so deploying the same
    /// request twice yields two contracts.
    pub async fn deploy(&self, request: &DeploymentRequest) -> Result<Address, ProviderError> {
        if is_mock_contract(&request.contract_name) {
            warn!(
                "Deploying `{}` - THIS SHOULD ONLY BE DONE FOR TESTING",
                request.contract_name
            );
        }

        info!("deploying {request}");
        let address = self.provider.deploy(request).await?;
        info!("{} deployed to {address:#x}", request.contract_name);

        Ok(address)
    }

    /// Deploy each request in order, writing one line per deployed contract
    /// to `out`.
    ///
    /// Each deployment is confirmed before the next is submitted. The first
    /// failure aborts the run.
    pub async fn run(
        &self,
        requests: &[DeploymentRequest],
        out: &mut impl Write,
    ) -> Result<Vec<Deployment>, ScriptError> {
        let mut deployments = Vec::with_capacity(requests.len());

        for request in requests {
            let address = self.deploy(request).await?;
            let deployment = Deployment {
                contract_name: request.contract_name.clone(),
                address,
            };

            writeln!(out, "{deployment}").map_err(|e| ScriptError::WriteOutput(e.to_string()))?;
            deployments.push(deployment);
        }

        Ok(deployments)
    }
}
