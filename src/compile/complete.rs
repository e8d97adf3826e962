//! Totality completion of a partial transition table

use crate::machine::{Machine, Row};
use crate::types::{Action, StateName, SymbolPair, INVALID_MESSAGE, INVALID_STATE};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument, warn};

/// Transition table defined for every non-terminal state and all nine symbol pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedTable {
    initial: StateName,
    prompt: String,
    halts: BTreeMap<StateName, String>,
    rows: BTreeMap<StateName, Row>,
}

impl CompletedTable {
    pub fn initial(&self) -> &str {
        &self.initial
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn is_terminal(&self, state: &str) -> bool {
        self.halts.contains_key(state)
    }

    pub fn halt_message(&self, state: &str) -> Option<&str> {
        self.halts.get(state).map(String::as_str)
    }

    /// Completed row of a non-terminal state
    pub fn row(&self, state: &str) -> Option<&Row> {
        self.rows.get(state)
    }

    pub fn lookup(&self, state: &str, pair: SymbolPair) -> Option<&Action> {
        self.rows.get(state).and_then(|row| row.get(&pair))
    }

    /// Non-terminal rows in scan order
    pub fn rows(&self) -> impl Iterator<Item = (&str, &Row)> {
        self.rows.iter().map(|(state, row)| (state.as_str(), row))
    }

    /// Every known state, terminal or not, in scan order
    pub fn states(&self) -> BTreeSet<&str> {
        self.rows
            .keys()
            .chain(self.halts.keys())
            .map(String::as_str)
            .collect()
    }
}

/// Complete a machine's transition function
///
/// The state set is computed up front as every state the machine mentions:
/// table keys, terminal keys, the initial state, every referenced next state,
/// and the `invalid` sink. Non-terminal states get all nine pairs, with missing
/// entries sent to the sink.
#[instrument(skip(machine), fields(initial = %machine.initial))]
pub fn complete(machine: &Machine) -> CompletedTable {
    let mut halts = machine.halts.clone();
    halts
        .entry(INVALID_STATE.to_string())
        .or_insert_with(|| INVALID_MESSAGE.to_string());

    let mut states: BTreeSet<&str> = BTreeSet::new();
    states.insert(&machine.initial);
    states.insert(INVALID_STATE);
    for (state, row) in &machine.transitions {
        states.insert(state);
        states.extend(row.values().map(|action| action.next.as_str()));
    }
    states.extend(machine.halts.keys().map(String::as_str));

    let mut rows = BTreeMap::new();
    let mut defaulted = 0usize;
    for state in states {
        if halts.contains_key(state) {
            if machine.transitions.contains_key(state) {
                warn!(state, "Terminal state has transitions; they are ignored");
            }
            continue;
        }

        let given = machine.transitions.get(state);
        let row: Row = SymbolPair::all()
            .map(|pair| {
                let action = given
                    .and_then(|row| row.get(&pair))
                    .cloned()
                    .unwrap_or_else(|| {
                        defaulted += 1;
                        Action::invalid()
                    });
                (pair, action)
            })
            .collect();
        rows.insert(state.to_string(), row);
    }

    if halts.contains_key(&machine.initial) {
        warn!("Initial state is terminal; the machine halts on its first read");
    }

    debug!(
        rows = rows.len(),
        terminals = halts.len(),
        defaulted,
        "Completed transition table"
    );

    CompletedTable {
        initial: machine.initial.clone(),
        prompt: machine.prompt.clone(),
        halts,
        rows,
    }
}
