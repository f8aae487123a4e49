//! Definitions of errors that can occur during the execution of the deploy scripts

use thiserror::Error;

/// Errors surfaced by the deployment provider.
///
/// Every variant is terminal for the run; nothing is retried.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Error initializing the RPC client or the deployer wallet
    #[error("error initializing client: {0}")]
    ClientInitialization(String),
    /// No compiled artifact exists for the requested contract
    #[error("no artifact found for contract `{0}`")]
    ArtifactNotFound(String),
    /// More than one compiled artifact carries the requested contract name
    #[error("multiple artifacts found for contract `{name}`: {paths}")]
    AmbiguousArtifact {
        /// The requested contract name
        name: String,
        /// The conflicting artifact paths, comma-separated
        paths: String,
    },
    /// Error parsing a compilation artifact
    #[error("error parsing artifact: {0}")]
    ArtifactParsing(String),
    /// The constructor arguments do not fit the contract's constructor
    #[error("invalid constructor arguments: {0}")]
    InvalidArguments(String),
    /// Error submitting or confirming the creation transaction
    #[error("error deploying contract: {0}")]
    ContractDeployment(String),
    /// The creation transaction was mined but reverted
    #[error("deployment transaction {0} reverted")]
    Reverted(String),
}

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Error reading a deployment request file
    #[error("error reading deployment requests: {0}")]
    ReadRequests(String),
    /// Error writing a deployed address to the output stream
    #[error("error writing output: {0}")]
    WriteOutput(String),
    /// Error raised by the deployment provider
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
