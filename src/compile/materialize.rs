//! Filesystem projection of an artifact graph
//!
//! Layout under the output root:
//!
//! ```text
//! init                 display setup
//! postinit             first-read alignment
//! <key>  -> <tag>      root edges of the initial state
//! <tag>/w              execute artifact
//! <tag>/<key> -> ../<tag>
//! ```

use crate::compile::canon::MonoId;
use crate::compile::graph::{ArtifactGraph, EdgeSource, Edges};
use crate::error::CompileError;
use crate::terminal::{dispatch_keys, Terminal};
use crate::types::SymbolPair;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, trace};

/// Name of the display setup artifact at the root
pub const INIT_FILE: &str = "init";
/// Name of the first-read alignment artifact at the root
pub const POST_INIT_FILE: &str = "postinit";
/// Name of the execute artifact inside every node directory
pub const EXECUTE_FILE: &str = "w";

/// What a materialization produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    pub root: PathBuf,
    pub nodes: usize,
    pub edges: usize,
    pub root_edges: usize,
    pub duplicate_edges: usize,
    pub fingerprint: String,
}

/// Outcome of writing one symlink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Created,
    /// The link already existed with the same target
    AlreadySatisfied,
}

/// Write `graph` as a fresh directory tree at `root`
///
/// Fails with [`CompileError::OutputRootExists`] before writing anything if
/// `root` is already present, including as a dangling symlink.
#[instrument(skip(graph, terminal), fields(root = %root.display()))]
pub fn materialize(
    graph: &ArtifactGraph,
    root: &Path,
    terminal: &Terminal,
) -> Result<BuildSummary, CompileError> {
    let start = Instant::now();

    if fs::symlink_metadata(root).is_ok() {
        return Err(CompileError::OutputRootExists(root.to_path_buf()));
    }
    if let Some(parent) = root.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CompileError::io(parent, e))?;
    }
    fs::create_dir(root).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => CompileError::OutputRootExists(root.to_path_buf()),
        _ => CompileError::io(root, e),
    })?;

    write_file(&root.join(INIT_FILE), &terminal.init_program(&graph.prompt))?;
    write_file(&root.join(POST_INIT_FILE), &terminal.post_init_program())?;

    for node in &graph.nodes {
        let dir = root.join(node.id.tag());
        fs::create_dir(&dir).map_err(|e| CompileError::io(&dir, e))?;
        write_file(&dir.join(EXECUTE_FILE), &node.program.render(terminal))?;
        trace!(id = %node.id, kind = node.program.kind(), "Wrote node");
    }

    let mut duplicate_edges = 0;
    for node in &graph.nodes {
        let dir = root.join(node.id.tag());
        duplicate_edges += link_edges(&dir, &node.edges, &node.state, true)?;
    }
    duplicate_edges += link_edges(root, &graph.root_edges, &graph.initial, false)?;

    let summary = BuildSummary {
        root: root.to_path_buf(),
        nodes: graph.nodes.len(),
        edges: graph.edge_count(),
        root_edges: graph.root_edges.len(),
        duplicate_edges,
        fingerprint: graph.fingerprint(terminal),
    };
    info!(
        nodes = summary.nodes,
        edges = summary.edges,
        root_edges = summary.root_edges,
        fingerprint = %summary.fingerprint,
        duration_ms = start.elapsed().as_millis(),
        "Artifact tree written"
    );
    Ok(summary)
}

/// Link every edge of one directory, returning how many were already present
fn link_edges(
    dir: &Path,
    edges: &Edges,
    state: &str,
    nested: bool,
) -> Result<usize, CompileError> {
    let mut duplicates = 0;
    for pair in SymbolPair::all() {
        for key in dispatch_keys(pair.0, pair.1) {
            let Some(&target) = edges.get(&key) else {
                continue;
            };
            let link = dir.join(&key);
            let source = EdgeSource { state, pair };
            if link_edge(&link_target(target, nested), &link, source)?
                == LinkOutcome::AlreadySatisfied
            {
                duplicates += 1;
            }
        }
    }
    debug!(dir = %dir.display(), edges = edges.len(), duplicates, "Linked edges");
    Ok(duplicates)
}

/// Relative symlink target of a node, as seen from the root or from a sibling node
pub fn link_target(target: MonoId, nested: bool) -> PathBuf {
    if nested {
        Path::new("..").join(target.tag())
    } else {
        PathBuf::from(target.tag())
    }
}

/// Create one symlink, accepting an identical existing link
pub fn link_edge(
    target: &Path,
    link: &Path,
    source: EdgeSource<'_>,
) -> Result<LinkOutcome, CompileError> {
    match symlink(target, link) {
        Ok(()) => Ok(LinkOutcome::Created),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            let existing = fs::read_link(link).map_err(|e| CompileError::io(link, e))?;
            if existing == target {
                debug!(link = %link.display(), "Edge already present");
                Ok(LinkOutcome::AlreadySatisfied)
            } else {
                Err(CompileError::ConflictingEdge {
                    state: source.state.to_string(),
                    pair: source.pair,
                    key: link
                        .file_name()
                        .map(|name| name.to_string_lossy().escape_debug().to_string())
                        .unwrap_or_default(),
                    existing: existing.display().to_string(),
                    target: target.display().to_string(),
                })
            }
        }
        Err(e) => Err(CompileError::io(link, e)),
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), CompileError> {
    fs::write(path, contents).map_err(|e| CompileError::io(path, e))
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}
