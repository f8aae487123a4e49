//! Tests for the deployment runner against stub deployment providers

use std::{
    io,
    sync::{Arc, Mutex},
};

use alloy_primitives::Address;
use async_trait::async_trait;
use eyre::Result;
use scripts::{
    commands::{deploy_all, exit_code},
    errors::{ProviderError, ScriptError},
    provider::DeploymentProvider,
    runner::DeploymentRunner,
    types::{ConstructorArg, DeploymentRequest},
};

/// The address the fixed-address stub reports for every deployment
const STUB_ADDRESS: Address = Address::new([0xaa; 20]);

/// A stub that deploys every contract to the same address, recording the
/// requests it receives
#[derive(Default)]
struct FixedAddressProvider {
    /// The requests received, in order
    received: Mutex<Vec<DeploymentRequest>>,
}

#[async_trait]
impl DeploymentProvider for FixedAddressProvider {
    async fn deploy(&self, request: &DeploymentRequest) -> Result<Address, ProviderError> {
        self.received.lock().unwrap().push(request.clone());
        Ok(STUB_ADDRESS)
    }
}

/// A stub that mimics a chain: each deployment lands at a fresh address
#[derive(Default)]
struct SequentialProvider {
    /// The number of contracts deployed so far
    nonce: Mutex<u8>,
}

#[async_trait]
impl DeploymentProvider for SequentialProvider {
    async fn deploy(&self, _request: &DeploymentRequest) -> Result<Address, ProviderError> {
        let mut nonce = self.nonce.lock().unwrap();
        *nonce += 1;
        Ok(Address::repeat_byte(*nonce))
    }
}

/// A stub that fails every deployment of the named contract
struct FailingProvider {
    /// The contract whose deployment fails
    failing_contract: &'static str,
}

#[async_trait]
impl DeploymentProvider for FailingProvider {
    async fn deploy(&self, request: &DeploymentRequest) -> Result<Address, ProviderError> {
        if request.contract_name == self.failing_contract {
            return Err(ProviderError::ContractDeployment(
                "insufficient funds for gas * price + value".to_string(),
            ));
        }

        Ok(STUB_ADDRESS)
    }
}

/// A log sink shared between a test and the subscriber writing to it
#[derive(Clone, Default)]
struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// The text logged so far
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// The `PointAMM` request with placeholder token addresses
fn point_amm_request() -> DeploymentRequest {
    DeploymentRequest::new(
        "PointAMM",
        [
            ConstructorArg::from(Address::repeat_byte(0x01)),
            ConstructorArg::from(Address::repeat_byte(0x02)),
            ConstructorArg::from(Address::repeat_byte(0x03)),
            ConstructorArg::from(""),
            ConstructorArg::from(""),
        ],
    )
}

/// A request taking no constructor arguments
fn no_arg_request(contract_name: &str) -> DeploymentRequest {
    DeploymentRequest::new(contract_name, Vec::<&str>::new())
}

#[tokio::test]
async fn test_deploy_passes_through_address() -> Result<()> {
    let provider = FixedAddressProvider::default();
    let runner = DeploymentRunner::new(&provider);

    let request = point_amm_request();
    let address = runner.deploy(&request).await?;

    assert_eq!(address, STUB_ADDRESS);
    assert_eq!(*provider.received.lock().unwrap(), vec![request]);
    Ok(())
}

#[tokio::test]
async fn test_erc20_deployment_succeeds() -> Result<()> {
    let mut out = Vec::new();
    let result = deploy_all(
        FixedAddressProvider::default(),
        &[no_arg_request("ERC20Token")],
        &mut out,
    )
    .await;

    assert_eq!(exit_code(&result), 0);

    let stdout = String::from_utf8(out)?;
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains(&format!("{STUB_ADDRESS:#x}")));
    Ok(())
}

#[tokio::test]
async fn test_insufficient_funds_fails_run() -> Result<()> {
    let provider = FailingProvider {
        failing_contract: "PointAMM",
    };

    let mut out = Vec::new();
    let result = deploy_all(provider, &[point_amm_request()], &mut out).await;

    assert!(matches!(
        result,
        Err(ScriptError::Provider(ProviderError::ContractDeployment(_)))
    ));
    // The failure is logged, and nothing reaches the address output
    let logs = LogCapture::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let code = tracing::subscriber::with_default(subscriber, || exit_code(&result));

    assert_eq!(code, 1);
    assert!(out.is_empty());
    let logged = logs.contents();
    assert!(logged.contains("ERROR"));
    assert!(logged.contains("insufficient funds for gas * price + value"));
    Ok(())
}

#[tokio::test]
async fn test_failure_aborts_remaining_requests() -> Result<()> {
    let provider = FailingProvider {
        failing_contract: "PointAMM",
    };
    let requests = [
        no_arg_request("MockWETH"),
        point_amm_request(),
        no_arg_request("ERC20Token"),
    ];

    let mut out = Vec::new();
    let result = deploy_all(provider, &requests, &mut out).await;
    assert_eq!(exit_code(&result), 1);

    // Only the deployment preceding the failure is reported
    let stdout = String::from_utf8(out)?;
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec![format!(
        "MockWETH deployed to: {STUB_ADDRESS:#x}"
    )]);
    Ok(())
}

#[tokio::test]
async fn test_requests_deployed_in_order() -> Result<()> {
    let provider = FixedAddressProvider::default();
    let requests = [
        no_arg_request("MockWETH"),
        no_arg_request("ERC20Token"),
        point_amm_request(),
    ];

    let mut out = Vec::new();
    let deployments = DeploymentRunner::new(&provider)
        .run(&requests, &mut out)
        .await?;

    assert_eq!(*provider.received.lock().unwrap(), requests.to_vec());
    let names: Vec<&str> = deployments
        .iter()
        .map(|d| d.contract_name.as_str())
        .collect();
    assert_eq!(names, ["MockWETH", "ERC20Token", "PointAMM"]);
    assert_eq!(String::from_utf8(out)?.lines().count(), 3);
    Ok(())
}

#[tokio::test]
async fn test_repeated_request_deploys_twice() -> Result<()> {
    let runner = DeploymentRunner::new(SequentialProvider::default());
    let request = no_arg_request("ERC20Token");

    let first = runner.deploy(&request).await?;
    let second = runner.deploy(&request).await?;

    assert_ne!(first, second);
    Ok(())
}
