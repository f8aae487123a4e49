//! Definitions of CLI arguments and commands for deploy scripts

use std::{io::Write, path::PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::{
    artifacts::ArtifactRegistry,
    commands::deploy_all,
    constants::{
        DEFAULT_AMM_ROUTER, DEFAULT_ARTIFACTS_DIR, DEFAULT_NUM_CONFIRMATIONS, DEFAULT_RPC_URL,
    },
    errors::ScriptError,
    provider::RpcDeploymentProvider,
    types::{Deployment, DeploymentRequest},
    utils::read_requests_file,
};

/// Deploy compiled contracts to an EVM chain
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PKEY")]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Directory containing the compiled contract artifacts
    #[arg(short, long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,

    /// Number of confirmations to wait for on each deployment
    #[arg(short, long, default_value_t = DEFAULT_NUM_CONFIRMATIONS)]
    pub confirmations: u64,

    /// The deployments to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Resolve the requests named by the command, connect to the chain and
    /// deploy them, printing each deployed address to `out`
    pub async fn run(self, out: &mut impl Write) -> Result<Vec<Deployment>, ScriptError> {
        let requests = self.command.requests()?;

        let registry = ArtifactRegistry::new(self.artifacts);
        let provider = RpcDeploymentProvider::connect(
            &self.rpc_url,
            &self.priv_key,
            registry,
            self.confirmations,
        )
        .await?;

        deploy_all(provider, &requests, out).await
    }
}

/// The sources of deployment requests
#[derive(Subcommand)]
pub enum Command {
    /// Deploy one of the built-in contract configurations
    #[command(subcommand)]
    Preset(Preset),
    /// Deploy the contracts listed in a JSON request file, in order
    Requests(RequestsArgs),
}

impl Command {
    /// The ordered deployment requests this command stands for
    pub fn requests(&self) -> Result<Vec<DeploymentRequest>, ScriptError> {
        match self {
            Command::Preset(preset) => Ok(vec![preset.request()]),
            Command::Requests(args) => read_requests_file(&args.file),
        }
    }
}

/// The built-in contract configurations
#[derive(Subcommand)]
pub enum Preset {
    /// Deploy the `Profitmaxpresale` presale contract
    ProfitmaxPresale,
    /// Deploy the `PointAMM` contract
    PointAmm(PointAmmArgs),
    /// Deploy the `ERC20Token` mock token, for testing
    Erc20Token,
    /// Deploy the `MockWETH` mock token, for testing
    MockWeth,
}

/// Constructor arguments of the `PointAMM` contract
#[derive(Args)]
pub struct PointAmmArgs {
    /// USDC token address in hex
    #[arg(long)]
    pub usdc: String,

    /// WETH token address in hex
    #[arg(long)]
    pub weth: String,

    /// DEX router address in hex
    #[arg(long, default_value = DEFAULT_AMM_ROUTER)]
    pub router: String,

    /// Fourth constructor argument, an opaque configuration string
    #[arg(long, default_value = "")]
    pub config_a: String,

    /// Fifth constructor argument, an opaque configuration string
    #[arg(long, default_value = "")]
    pub config_b: String,
}

/// Deploy contracts from a request file
#[derive(Args)]
pub struct RequestsArgs {
    /// Path to a JSON array of `{ "contract": <name>, "args": [..] }` objects
    #[arg(short, long)]
    pub file: PathBuf,
}
