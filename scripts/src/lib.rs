//! Scripts for deploying compiled contracts with fixed constructor arguments.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod errors;
pub mod provider;
pub mod runner;
pub mod types;
pub mod utils;
