//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy_primitives::Address;
use serde::Deserialize;

/// A single constructor argument, held as its literal text.
///
/// The literal is coerced into the ABI type the contract's constructor
/// declares at the argument's position when the creation code is encoded.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawArg")]
pub struct ConstructorArg(String);

impl ConstructorArg {
    /// The literal text of the argument
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConstructorArg {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ConstructorArg {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<Address> for ConstructorArg {
    fn from(address: Address) -> Self {
        Self(format!("{address:#x}"))
    }
}

impl Display for ConstructorArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// The JSON shapes a constructor argument may take in a request file
#[derive(Deserialize)]
#[serde(untagged)]
enum RawArg {
    /// A string literal
    Str(String),
    /// A JSON number
    Num(serde_json::Number),
    /// A JSON boolean
    Bool(bool),
}

impl From<RawArg> for ConstructorArg {
    fn from(raw: RawArg) -> Self {
        match raw {
            RawArg::Str(s) => Self(s),
            RawArg::Num(n) => Self(n.to_string()),
            RawArg::Bool(b) => Self(b.to_string()),
        }
    }
}

/// A request to deploy one contract with a fixed list of constructor arguments
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DeploymentRequest {
    /// The name of the contract, as it appears in the compilation artifacts
    #[serde(rename = "contract")]
    pub contract_name: String,
    /// The constructor arguments, in declaration order
    #[serde(rename = "args", default)]
    pub constructor_args: Vec<ConstructorArg>,
}

impl DeploymentRequest {
    /// Create a new deployment request
    pub fn new(
        contract_name: impl Into<String>,
        constructor_args: impl IntoIterator<Item = impl Into<ConstructorArg>>,
    ) -> Self {
        Self {
            contract_name: contract_name.into(),
            constructor_args: constructor_args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Display for DeploymentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.contract_name)?;
        for (i, arg) in self.constructor_args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

/// A contract deployed by the runner
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deployment {
    /// The name of the deployed contract
    pub contract_name: String,
    /// The on-chain address of the deployed contract
    pub address: Address,
}

impl Display for Deployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} deployed to: {:#x}", self.contract_name, self.address)
    }
}
