//! Error types for the tapelink compiler.

use crate::types::{StateName, SymbolPair};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a machine description
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("Failed to read machine file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed TOML machine description: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Malformed JSON machine description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rule {index} ({state}): {reason}")]
    InvalidRule {
        index: usize,
        state: StateName,
        reason: String,
    },

    #[error("Duplicate rule for state {state} reading {pair}")]
    DuplicateRule { state: StateName, pair: SymbolPair },

    #[error("Machine has no initial state")]
    MissingInitialState,
}

/// Errors raised while compiling or materializing the artifact tree
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Output root already exists: {0:?}")]
    OutputRootExists(PathBuf),

    #[error(
        "Conflicting edge from state {state} reading {pair}: key {key} already points at {existing}, refusing to redirect it to {target}"
    )]
    ConflictingEdge {
        state: StateName,
        pair: SymbolPair,
        key: String,
        existing: String,
        target: String,
    },

    #[error("No canonical id for the action of state {state} reading {pair}")]
    MissingCanonicalId { state: StateName, pair: SymbolPair },

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CompileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CompileError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Top-level errors surfaced to the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Machine error: {0}")]
    Machine(#[from] MachineError),

    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
