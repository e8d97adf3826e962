//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, CompileError};

/// Map domain errors to a one-line message for stderr.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Compile(CompileError::OutputRootExists(path)) => format!(
            "Output root {} already exists; remove it before rebuilding",
            path.display()
        ),
        _ => e.to_string(),
    }
}
