//! Shared helpers for integration tests

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tapelink::machine::Machine;
use tapelink::types::{Action, Move, Symbol, SymbolPair, TrackOp};
use walkdir::WalkDir;

/// One entry of a materialized tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEntry {
    Dir,
    File(String),
    Link(PathBuf),
}

/// Every entry under `root`, keyed by path relative to it, symlinks not followed
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, TreeEntry> {
    let mut entries = BTreeMap::new();
    for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
        let entry = entry.unwrap();
        let rel = entry.path().strip_prefix(root).unwrap().to_path_buf();
        let file_type = entry.file_type();
        let value = if file_type.is_symlink() {
            TreeEntry::Link(fs::read_link(entry.path()).unwrap())
        } else if file_type.is_dir() {
            TreeEntry::Dir
        } else {
            TreeEntry::File(fs::read_to_string(entry.path()).unwrap())
        };
        entries.insert(rel, value);
    }
    entries
}

/// Names of the directories directly under `root`
pub fn node_dirs(root: &Path) -> Vec<String> {
    let mut dirs: Vec<String> = fs::read_dir(root)
        .unwrap()
        .map(|entry| entry.unwrap())
        .filter(|entry| entry.file_type().unwrap().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    dirs.sort();
    dirs
}

/// Two-state machine with a single rule: A reading (1,1) writes zeros and halts in B
pub fn one_rule_machine() -> Machine {
    Machine::new("A").halt("B", "done").rule(
        "A",
        SymbolPair(Symbol::One, Symbol::One),
        Action::new(
            "B",
            TrackOp::new(Symbol::Zero, Move::Stay),
            TrackOp::new(Symbol::Zero, Move::Stay),
        ),
    )
}
