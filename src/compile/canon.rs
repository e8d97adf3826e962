//! Action canonicalization
//!
//! Every distinct [`Action`] in a completed table becomes one mono-state: a
//! node of the output graph with a short hexadecimal tag. Identical actions
//! reached from unrelated states share the node.

use crate::compile::complete::CompletedTable;
use crate::types::Action;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, instrument, trace};

/// Identifier of a mono-state, assigned in first-sighting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonoId(u32);

impl MonoId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Directory name of this mono-state in the artifact tree
    pub fn tag(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MonoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

impl Serialize for MonoId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Interning table from actions to mono-state ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Canonicalizer {
    ids: HashMap<Action, MonoId>,
    actions: Vec<Action>,
}

impl Canonicalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a completed table row by row, pair by pair, interning every action
    #[instrument(skip_all)]
    pub fn from_table(table: &CompletedTable) -> Self {
        let mut canon = Self::new();
        for (state, row) in table.rows() {
            for (pair, action) in row {
                let id = canon.intern(action);
                trace!(state, %pair, %id, "Interned action");
            }
        }
        debug!(mono_states = canon.len(), "Canonicalized actions");
        canon
    }

    /// Id of `action`, assigning the next one on first sighting
    pub fn intern(&mut self, action: &Action) -> MonoId {
        if let Some(id) = self.ids.get(action) {
            return *id;
        }
        let id = MonoId(self.actions.len() as u32);
        self.ids.insert(action.clone(), id);
        self.actions.push(action.clone());
        id
    }

    pub fn get(&self, action: &Action) -> Option<MonoId> {
        self.ids.get(action).copied()
    }

    pub fn action(&self, id: MonoId) -> Option<&Action> {
        self.actions.get(id.index())
    }

    /// Mono-states in id order
    pub fn iter(&self) -> impl Iterator<Item = (MonoId, &Action)> {
        self.actions
            .iter()
            .enumerate()
            .map(|(index, action)| (MonoId(index as u32), action))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
