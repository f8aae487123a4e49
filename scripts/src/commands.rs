//! Implementations of the deploy commands

use std::io::Write;

use tracing::error;

use crate::{
    cli::{PointAmmArgs, Preset},
    constants::{
        ERC20_TOKEN_CONTRACT, FAILURE_EXIT_CODE, MOCK_WETH_CONTRACT, POINT_AMM_CONTRACT,
        PROFITMAX_PRESALE_CONTRACT, PROFITMAX_PRESALE_TOKEN, SUCCESS_EXIT_CODE,
    },
    errors::ScriptError,
    provider::DeploymentProvider,
    runner::DeploymentRunner,
    types::{Deployment, DeploymentRequest},
};

impl Preset {
    /// The deployment request this preset stands for
    pub fn request(&self) -> DeploymentRequest {
        match self {
            Preset::ProfitmaxPresale => {
                DeploymentRequest::new(PROFITMAX_PRESALE_CONTRACT, [PROFITMAX_PRESALE_TOKEN])
            }
            Preset::PointAmm(args) => point_amm_request(args),
            Preset::Erc20Token => DeploymentRequest::new(ERC20_TOKEN_CONTRACT, Vec::<&str>::new()),
            Preset::MockWeth => DeploymentRequest::new(MOCK_WETH_CONTRACT, Vec::<&str>::new()),
        }
    }
}

/// Build the `PointAMM` request. The constructor takes the USDC, WETH and
/// router addresses followed by two opaque configuration strings.
fn point_amm_request(args: &PointAmmArgs) -> DeploymentRequest {
    DeploymentRequest::new(
        POINT_AMM_CONTRACT,
        [
            args.usdc.clone(),
            args.weth.clone(),
            args.router.clone(),
            args.config_a.clone(),
            args.config_b.clone(),
        ],
    )
}

/// Deploy the given requests in order through the provider, printing each
/// deployed address to `out`
pub async fn deploy_all<P: DeploymentProvider>(
    provider: P,
    requests: &[DeploymentRequest],
    out: &mut impl Write,
) -> Result<Vec<Deployment>, ScriptError> {
    DeploymentRunner::new(provider).run(requests, out).await
}

/// Translate the outcome of a run into a process exit code, logging the
/// error of a failed run
pub fn exit_code<T>(result: &Result<T, ScriptError>) -> u8 {
    match result {
        Ok(_) => SUCCESS_EXIT_CODE,
        Err(e) => {
            error!("{e}");
            FAILURE_EXIT_CODE
        }
    }
}
