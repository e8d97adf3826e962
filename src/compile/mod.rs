//! Compilation pipeline
//!
//! machine -> [`complete`] -> [`Canonicalizer`] -> [`ArtifactGraph`] -> [`materialize`].
//! Single pass, no feedback; identical inputs produce identical trees.

pub mod canon;
pub mod complete;
pub mod graph;
pub mod materialize;

pub use canon::{Canonicalizer, MonoId};
pub use complete::{complete, CompletedTable};
pub use graph::{ArtifactGraph, Node, Program};
pub use materialize::{materialize, BuildSummary};

use crate::error::CompileError;
use crate::machine::Machine;
use crate::terminal::Terminal;
use std::path::Path;
use tracing::{info, instrument};

/// Everything known about a machine after compilation, before any I/O
#[derive(Debug, Clone)]
pub struct Plan {
    pub table: CompletedTable,
    pub canon: Canonicalizer,
    pub graph: ArtifactGraph,
}

/// Compiler facade bound to a display geometry
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    terminal: Terminal,
}

impl Compiler {
    pub fn new(terminal: Terminal) -> Self {
        Self { terminal }
    }

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    /// Compile without touching the filesystem
    #[instrument(skip_all, fields(initial = %machine.initial))]
    pub fn plan(&self, machine: &Machine) -> Result<Plan, CompileError> {
        let table = complete(machine);
        let canon = Canonicalizer::from_table(&table);
        let graph = ArtifactGraph::build(&table, &canon)?;
        info!(
            states = table.states().len(),
            mono_states = canon.len(),
            "Compiled machine"
        );
        Ok(Plan {
            table,
            canon,
            graph,
        })
    }

    /// Compile and write the artifact tree at `root`
    pub fn build(&self, machine: &Machine, root: &Path) -> Result<BuildSummary, CompileError> {
        if std::fs::symlink_metadata(root).is_ok() {
            return Err(CompileError::OutputRootExists(root.to_path_buf()));
        }
        let plan = self.plan(machine)?;
        materialize(&plan.graph, root, &self.terminal)
    }
}
