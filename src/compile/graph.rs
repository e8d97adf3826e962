//! In-memory artifact graph
//!
//! Nodes are mono-states. Each node carries the program run when the node is
//! entered and the dispatch edges of the state the node leads into. The root
//! carries the dispatch edges of the initial state. Nothing here touches the
//! filesystem; see [`crate::compile::materialize`] for the projection.

use crate::compile::canon::{Canonicalizer, MonoId};
use crate::compile::complete::CompletedTable;
use crate::error::CompileError;
use crate::machine::Row;
use crate::terminal::{dispatch_keys, Terminal};
use crate::types::{StateName, SymbolPair, TrackOp};
use blake3::Hasher;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::{debug, instrument, trace};

/// Checksum-reply dispatch key -> target node
pub type Edges = BTreeMap<String, MonoId>;

/// Program stored in a node's execute artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Program {
    /// The node leads into a terminal state
    Halt { message: String },
    /// Write and move both tracks, then ask for the next two symbols
    Step { tracks: [TrackOp; 2] },
}

impl Program {
    pub fn render(&self, terminal: &Terminal) -> String {
        match self {
            Program::Halt { message } => terminal.halt_program(message),
            Program::Step { tracks } => terminal.step_program(*tracks),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Program::Halt { .. } => "halt",
            Program::Step { .. } => "step",
        }
    }
}

/// One mono-state of the output graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: MonoId,
    /// State the machine is in once this node has run
    pub state: StateName,
    pub program: Program,
    pub edges: Edges,
}

/// Where an edge comes from, kept for error reporting
#[derive(Debug, Clone, Copy)]
pub struct EdgeSource<'a> {
    pub state: &'a str,
    pub pair: SymbolPair,
}

/// Result of inserting an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsert {
    Added,
    /// Same key, same target: already satisfied
    Duplicate,
}

/// Insert a dispatch edge, refusing to redirect an existing key
pub fn insert_edge(
    edges: &mut Edges,
    key: String,
    target: MonoId,
    source: EdgeSource<'_>,
) -> Result<EdgeInsert, CompileError> {
    match edges.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(target);
            Ok(EdgeInsert::Added)
        }
        Entry::Occupied(slot) if *slot.get() == target => {
            debug!(state = source.state, pair = %source.pair, %target, "Duplicate edge accepted");
            Ok(EdgeInsert::Duplicate)
        }
        Entry::Occupied(slot) => Err(CompileError::ConflictingEdge {
            state: source.state.to_string(),
            pair: source.pair,
            key: slot.key().escape_debug().to_string(),
            existing: slot.get().tag(),
            target: target.tag(),
        }),
    }
}

/// Complete compiled form of a machine, ready to materialize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactGraph {
    pub prompt: String,
    pub initial: StateName,
    pub nodes: Vec<Node>,
    pub root_edges: Edges,
}

impl ArtifactGraph {
    /// Build the graph of a completed table from its canonical ids
    #[instrument(skip_all, fields(initial = table.initial()))]
    pub fn build(table: &CompletedTable, canon: &Canonicalizer) -> Result<Self, CompileError> {
        let mut nodes = Vec::with_capacity(canon.len());
        for (id, action) in canon.iter() {
            let program = match table.halt_message(&action.next) {
                Some(message) => Program::Halt {
                    message: message.to_string(),
                },
                None => Program::Step {
                    tracks: action.tracks,
                },
            };
            let edges = match table.row(&action.next) {
                Some(row) => row_edges(&action.next, row, canon)?,
                None => Edges::new(),
            };
            trace!(%id, state = %action.next, kind = program.kind(), out = edges.len(), "Built node");
            nodes.push(Node {
                id,
                state: action.next.clone(),
                program,
                edges,
            });
        }

        let root_edges = match table.row(table.initial()) {
            Some(row) => row_edges(table.initial(), row, canon)?,
            None => Edges::new(),
        };

        let graph = Self {
            prompt: table.prompt().to_string(),
            initial: table.initial().to_string(),
            nodes,
            root_edges,
        };
        debug!(
            nodes = graph.nodes.len(),
            edges = graph.edge_count(),
            root_edges = graph.root_edges.len(),
            "Built artifact graph"
        );
        Ok(graph)
    }

    pub fn node(&self, id: MonoId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Follow a dispatch key from a node, or from the root when `from` is None
    pub fn follow(&self, from: Option<MonoId>, key: &str) -> Option<MonoId> {
        let edges = match from {
            Some(id) => &self.node(id)?.edges,
            None => &self.root_edges,
        };
        edges.get(key).copied()
    }

    /// Number of node-level edges, root edges excluded
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.edges.len()).sum()
    }

    /// BLAKE3 digest of every rendered artifact and edge
    ///
    /// Two graphs with the same fingerprint materialize to byte-identical trees.
    pub fn fingerprint(&self, terminal: &Terminal) -> String {
        let mut hasher = Hasher::new();

        hasher.update(b"init:");
        hash_text(&mut hasher, &terminal.init_program(&self.prompt));
        hasher.update(b"postinit:");
        hash_text(&mut hasher, &terminal.post_init_program());

        hasher.update(b"root:");
        hash_edges(&mut hasher, &self.root_edges);

        hasher.update(&(self.nodes.len() as u64).to_be_bytes());
        for node in &self.nodes {
            hasher.update(b"node:");
            hash_text(&mut hasher, &node.id.tag());
            hash_text(&mut hasher, &node.program.render(terminal));
            hash_edges(&mut hasher, &node.edges);
        }

        hex::encode(hasher.finalize().as_bytes())
    }
}

/// Both dispatch keys of every pair in a row
fn row_edges(state: &str, row: &Row, canon: &Canonicalizer) -> Result<Edges, CompileError> {
    let mut edges = Edges::new();
    for (&pair, action) in row {
        let target = canon
            .get(action)
            .ok_or_else(|| CompileError::MissingCanonicalId {
                state: state.to_string(),
                pair,
            })?;
        let source = EdgeSource { state, pair };
        for key in dispatch_keys(pair.0, pair.1) {
            insert_edge(&mut edges, key, target, source)?;
        }
    }
    Ok(edges)
}

fn hash_text(hasher: &mut Hasher, text: &str) {
    hasher.update(&(text.len() as u64).to_be_bytes());
    hasher.update(text.as_bytes());
}

fn hash_edges(hasher: &mut Hasher, edges: &Edges) {
    hasher.update(&(edges.len() as u64).to_be_bytes());
    for (key, target) in edges {
        hash_text(hasher, key);
        hash_text(hasher, &target.tag());
    }
}
