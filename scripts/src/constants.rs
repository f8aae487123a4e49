//! Constants used in the deploy scripts

/// The RPC URL used when none is configured, a local Hardhat or Anvil node
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// The artifacts directory used when none is configured, Hardhat's default
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The number of confirmations to wait for the contract deployment transaction
pub const DEFAULT_NUM_CONFIRMATIONS: u64 = 1;

/// The log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// The process exit code for a successful run
pub const SUCCESS_EXIT_CODE: u8 = 0;

/// The process exit code for a failed run
pub const FAILURE_EXIT_CODE: u8 = 1;

/// The extension of a compilation artifact file
pub const ARTIFACT_EXTENSION: &str = "json";

/// The suffix of Hardhat's debug artifact files, which carry no ABI
pub const DEBUG_ARTIFACT_SUFFIX: &str = ".dbg.json";

/// The name of the directory holding raw compiler input & output,
/// present in both Hardhat and Foundry build directories
pub const BUILD_INFO_DIR: &str = "build-info";

/// Separates the source path from the contract name in a fully qualified
/// contract name, e.g. `contracts/Token.sol:ERC20Token`
pub const QUALIFIED_NAME_SEPARATOR: char = ':';

// --- Contract Names --- //

/// The name of the presale contract
pub const PROFITMAX_PRESALE_CONTRACT: &str = "Profitmaxpresale";

/// The name of the points AMM contract
pub const POINT_AMM_CONTRACT: &str = "PointAMM";

/// The name of the mock ERC20 token contract
pub const ERC20_TOKEN_CONTRACT: &str = "ERC20Token";

/// The name of the mock WETH contract
pub const MOCK_WETH_CONTRACT: &str = "MockWETH";

/// Contracts that should only ever be deployed for testing
pub const MOCK_CONTRACTS: [&str; 2] = [ERC20_TOKEN_CONTRACT, MOCK_WETH_CONTRACT];

// --- Preset Arguments --- //

/// The token address the presale contract is initialized with
pub const PROFITMAX_PRESALE_TOKEN: &str = "0x5C2Db6D26D5A86392777368bFED9A8f1afC87A4F";

/// The DEX router the points AMM routes through by default
pub const DEFAULT_AMM_ROUTER: &str = "0xE7C6301109bBc3C75127c6EDaFE78CcF822D81AE";
