//! Resolution of compiled contract artifacts, and encoding of creation code
//! from them.
//!
//! Both Hardhat (`artifacts/contracts/<File>.sol/<Name>.json`) and Foundry
//! (`out/<File>.sol/<Name>.json`) build layouts are supported.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    dyn_abi::{DynSolType, DynSolValue, JsonAbiExt, Specifier},
    json_abi::JsonAbi,
};
use alloy_primitives::{hex, Address, Bytes};
use serde::Deserialize;
use tracing::debug;

use crate::{
    constants::{
        ARTIFACT_EXTENSION, BUILD_INFO_DIR, DEBUG_ARTIFACT_SUFFIX, QUALIFIED_NAME_SEPARATOR,
    },
    errors::ProviderError,
    types::ConstructorArg,
};

/// The subset of a compilation artifact the scripts need
#[derive(Deserialize)]
struct RawArtifact {
    /// The contract ABI
    abi: JsonAbi,
    /// The creation bytecode
    bytecode: RawBytecode,
}

/// Hardhat stores the creation bytecode as a bare hex string,
/// Foundry nests it under an `object` key
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    /// Hardhat layout
    Hex(String),
    /// Foundry layout
    Object {
        /// The hex-encoded creation bytecode
        object: String,
    },
}

impl RawBytecode {
    /// The hex-encoded creation bytecode
    fn hex(&self) -> &str {
        match self {
            RawBytecode::Hex(s) | RawBytecode::Object { object: s } => s,
        }
    }
}

/// A compiled contract: its ABI and creation bytecode
#[derive(Clone, Debug)]
pub struct ContractArtifact {
    /// The name of the contract
    pub contract_name: String,
    /// The contract ABI
    pub abi: JsonAbi,
    /// The creation bytecode, without constructor arguments
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Parse an artifact from its JSON representation
    pub fn from_json(contract_name: &str, json: &str) -> Result<Self, ProviderError> {
        let raw: RawArtifact = serde_json::from_str(json)
            .map_err(|e| ProviderError::ArtifactParsing(format!("{contract_name}: {e}")))?;

        let bytecode = hex::decode(raw.bytecode.hex())
            .map_err(|e| ProviderError::ArtifactParsing(format!("{contract_name}: {e}")))?;

        // Interfaces and abstract contracts compile to empty bytecode
        if bytecode.is_empty() {
            return Err(ProviderError::ArtifactParsing(format!(
                "{contract_name} has no creation bytecode"
            )));
        }

        Ok(Self {
            contract_name: contract_name.to_string(),
            abi: raw.abi,
            bytecode: bytecode.into(),
        })
    }
}

/// Resolves contract names to their compiled artifacts within a build directory
#[derive(Clone, Debug)]
pub struct ArtifactRegistry {
    /// The root of the build directory
    root: PathBuf,
}

impl ArtifactRegistry {
    /// Create a registry over the given build directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the named contract's artifact into a factory for it.
    ///
    /// The name is either a bare contract name or a fully qualified
    /// `<source path>:<contract name>`, e.g. `contracts/Token.sol:ERC20Token`.
    pub fn contract_factory(&self, contract_name: &str) -> Result<ContractFactory, ProviderError> {
        let (source, name) = split_qualified_name(contract_name);
        let path = self.find_artifact(contract_name, source, name)?;
        debug!("resolved `{contract_name}` to {}", path.display());

        let json = fs::read_to_string(&path)
            .map_err(|e| ProviderError::ArtifactParsing(format!("{}: {e}", path.display())))?;
        let artifact = ContractArtifact::from_json(name, &json)?;

        Ok(ContractFactory::new(artifact))
    }

    /// Find the single artifact file for the named contract, restricted to
    /// the given source file if one is named
    fn find_artifact(
        &self,
        contract_name: &str,
        source: Option<&Path>,
        name: &str,
    ) -> Result<PathBuf, ProviderError> {
        let file_name = format!("{name}.{ARTIFACT_EXTENSION}");

        let mut matches = Vec::new();
        collect_artifacts(&self.root, &file_name, &mut matches)?;
        if let Some(source) = source {
            matches = filter_by_source(matches, source);
        }

        match matches.len() {
            0 => Err(ProviderError::ArtifactNotFound(contract_name.to_string())),
            1 => Ok(matches.remove(0)),
            _ => {
                matches.sort();
                let paths = matches
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");

                Err(ProviderError::AmbiguousArtifact {
                    name: contract_name.to_string(),
                    paths,
                })
            }
        }
    }
}

/// Split a contract name into its optional source path and bare name
pub fn split_qualified_name(contract_name: &str) -> (Option<&Path>, &str) {
    match contract_name.rsplit_once(QUALIFIED_NAME_SEPARATOR) {
        Some((source, name)) => (Some(Path::new(source)), name),
        None => (None, contract_name),
    }
}

/// Keep the artifacts emitted for the given source file.
///
/// Hardhat mirrors the full source path (`contracts/X.sol/Name.json`), Foundry
/// keeps only the file name (`X.sol/Name.json`), so a full-path match is
/// preferred and the file name is the fallback.
fn filter_by_source(matches: Vec<PathBuf>, source: &Path) -> Vec<PathBuf> {
    let (by_path, rest): (Vec<_>, Vec<_>) = matches
        .into_iter()
        .partition(|p| p.parent().is_some_and(|dir| dir.ends_with(source)));
    if !by_path.is_empty() {
        return by_path;
    }

    rest.into_iter()
        .filter(|p| {
            p.parent()
                .and_then(Path::file_name)
                .is_some_and(|dir| Some(dir) == source.file_name())
        })
        .collect()
}

/// Recursively collect the files under `dir` named `file_name`.
///
/// Symlinks are not followed.
fn collect_artifacts(
    dir: &Path,
    file_name: &str,
    matches: &mut Vec<PathBuf>,
) -> Result<(), ProviderError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| ProviderError::ArtifactParsing(format!("{}: {e}", dir.display())))?;

    for entry in entries {
        let entry = entry.map_err(|e| ProviderError::ArtifactParsing(e.to_string()))?;
        let file_type = entry
            .file_type()
            .map_err(|e| ProviderError::ArtifactParsing(e.to_string()))?;
        let path = entry.path();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();

        if file_type.is_dir() {
            if name != BUILD_INFO_DIR {
                collect_artifacts(&path, file_name, matches)?;
            }
        } else if file_type.is_file() && name == file_name && !name.ends_with(DEBUG_ARTIFACT_SUFFIX)
        {
            matches.push(path);
        }
    }

    Ok(())
}

/// A handle for deploying one compiled contract
#[derive(Clone, Debug)]
pub struct ContractFactory {
    /// The artifact being deployed
    artifact: ContractArtifact,
}

impl ContractFactory {
    /// Create a factory for the given artifact
    pub fn new(artifact: ContractArtifact) -> Self {
        Self { artifact }
    }

    /// The artifact this factory deploys
    pub fn artifact(&self) -> &ContractArtifact {
        &self.artifact
    }

    /// Build the creation code for a deployment: the contract bytecode followed
    /// by the ABI-encoded constructor arguments.
    ///
    /// Each argument is coerced into the type the constructor declares at its
    /// position.
    pub fn creation_code(&self, args: &[ConstructorArg]) -> Result<Bytes, ProviderError> {
        let name = &self.artifact.contract_name;

        let Some(constructor) = self.artifact.abi.constructor() else {
            if !args.is_empty() {
                return Err(ProviderError::InvalidArguments(format!(
                    "{name} has no constructor, but {} arguments were given",
                    args.len()
                )));
            }
            return Ok(self.artifact.bytecode.clone());
        };

        if constructor.inputs.len() != args.len() {
            return Err(ProviderError::InvalidArguments(format!(
                "{name} constructor takes {} arguments, but {} were given",
                constructor.inputs.len(),
                args.len()
            )));
        }

        let values = constructor
            .inputs
            .iter()
            .zip(args)
            .map(|(param, arg)| {
                let ty: DynSolType = param
                    .resolve()
                    .map_err(|e| ProviderError::ArtifactParsing(format!("{name}: {e}")))?;
                coerce_arg(&ty, arg).map_err(|e| {
                    ProviderError::InvalidArguments(format!(
                        "{name} argument `{}` ({}): {e}",
                        param.name, param.ty
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let encoded_args = constructor
            .abi_encode_input(&values)
            .map_err(|e| ProviderError::InvalidArguments(format!("{name}: {e}")))?;

        let mut code = self.artifact.bytecode.to_vec();
        code.extend(encoded_args);
        Ok(code.into())
    }
}

/// Coerce a literal argument into a value of the given ABI type
fn coerce_arg(ty: &DynSolType, arg: &ConstructorArg) -> Result<DynSolValue, String> {
    // Strings are taken verbatim, the coercion parser would strip quotes
    // and reject the empty string
    match ty {
        DynSolType::String => Ok(DynSolValue::String(arg.as_str().to_string())),
        // Mixed-case addresses carry an EIP-55 checksum, which must hold
        DynSolType::Address if is_mixed_case(arg.as_str()) => {
            Address::parse_checksummed(arg.as_str(), None /* chain_id */)
                .map(DynSolValue::Address)
                .map_err(|e| e.to_string())
        }
        _ => ty.coerce_str(arg.as_str()).map_err(|e| e.to_string()),
    }
}

/// Whether the hex digits of an address literal mix upper and lower case
fn is_mixed_case(address: &str) -> bool {
    let digits = address.strip_prefix("0x").unwrap_or(address);
    digits.chars().any(|c| c.is_ascii_lowercase()) && digits.chars().any(|c| c.is_ascii_uppercase())
}
