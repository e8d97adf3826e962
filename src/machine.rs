//! Machine descriptions
//!
//! A [`Machine`] is the caller-facing, possibly partial, description of a
//! two-track deterministic Turing machine. It can be assembled in code or
//! loaded from a TOML or JSON file.

use crate::error::MachineError;
use crate::types::{Action, Move, StateName, Symbol, SymbolPair, TrackOp};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, instrument};

/// Partial transition row of one state
pub type Row = BTreeMap<SymbolPair, Action>;

/// Partial machine description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    pub initial: StateName,
    pub prompt: String,
    /// Terminal states and the message shown when the machine halts in them
    pub halts: BTreeMap<StateName, String>,
    pub transitions: BTreeMap<StateName, Row>,
}

impl Machine {
    pub fn new(initial: impl Into<StateName>) -> Self {
        Self {
            initial: initial.into(),
            prompt: String::new(),
            halts: BTreeMap::new(),
            transitions: BTreeMap::new(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Mark a state as terminal
    pub fn halt(mut self, state: impl Into<StateName>, message: impl Into<String>) -> Self {
        self.halts.insert(state.into(), message.into());
        self
    }

    /// Add a transition, replacing any previous one for the same state and pair
    pub fn rule(mut self, state: impl Into<StateName>, read: SymbolPair, action: Action) -> Self {
        self.insert_rule(state, read, action);
        self
    }

    /// Insert a transition, returning the one it replaced
    pub fn insert_rule(
        &mut self,
        state: impl Into<StateName>,
        read: SymbolPair,
        action: Action,
    ) -> Option<Action> {
        self.transitions
            .entry(state.into())
            .or_default()
            .insert(read, action)
    }

    /// Number of explicitly specified transitions
    pub fn rule_count(&self) -> usize {
        self.transitions.values().map(BTreeMap::len).sum()
    }

    /// Load a description, choosing the format from the file extension
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, MachineError> {
        let text = std::fs::read_to_string(path).map_err(|source| MachineError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let machine = if is_json {
            Self::from_json_str(&text)?
        } else {
            Self::from_toml_str(&text)?
        };
        debug!(
            initial = %machine.initial,
            rules = machine.rule_count(),
            halts = machine.halts.len(),
            "Loaded machine description"
        );
        Ok(machine)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, MachineError> {
        let file: MachineFile = toml::from_str(text)?;
        file.into_machine()
    }

    pub fn from_json_str(text: &str) -> Result<Self, MachineError> {
        let file: MachineFile = serde_json::from_str(text)?;
        file.into_machine()
    }
}

/// On-disk shape of a machine description
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MachineFile {
    initial: String,
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    halt: BTreeMap<String, String>,
    #[serde(default, rename = "rule")]
    rules: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleEntry {
    state: String,
    read: String,
    next: String,
    write: String,
    moves: String,
}

impl MachineFile {
    fn into_machine(self) -> Result<Machine, MachineError> {
        if self.initial.trim().is_empty() {
            return Err(MachineError::MissingInitialState);
        }

        let mut machine = Machine::new(self.initial).with_prompt(self.prompt);
        machine.halts = self.halt;

        for (index, entry) in self.rules.into_iter().enumerate() {
            let invalid = |reason: String| MachineError::InvalidRule {
                index,
                state: entry.state.clone(),
                reason,
            };
            let [r1, r2] = parse_pair(&entry.read, Symbol::from_char)
                .map_err(|e| invalid(format!("read: {e}")))?;
            let [w1, w2] = parse_pair(&entry.write, Symbol::from_char)
                .map_err(|e| invalid(format!("write: {e}")))?;
            let [m1, m2] = parse_pair(&entry.moves, Move::from_char)
                .map_err(|e| invalid(format!("moves: {e}")))?;
            if entry.next.is_empty() {
                return Err(invalid("empty next state".to_string()));
            }

            let read = SymbolPair(r1, r2);
            let action = Action::new(entry.next, TrackOp::new(w1, m1), TrackOp::new(w2, m2));
            if machine.insert_rule(entry.state.clone(), read, action).is_some() {
                return Err(MachineError::DuplicateRule {
                    state: entry.state,
                    pair: read,
                });
            }
        }

        Ok(machine)
    }
}

/// Parse exactly two characters, one per track
fn parse_pair<T>(text: &str, parse: impl Fn(char) -> Option<T>) -> Result<[T; 2], String> {
    let chars: Vec<char> = text.chars().collect();
    match chars.as_slice() {
        [a, b] => {
            let first = parse(*a).ok_or_else(|| format!("unexpected character {a:?}"))?;
            let second = parse(*b).ok_or_else(|| format!("unexpected character {b:?}"))?;
            Ok([first, second])
        }
        _ => Err(format!("expected two characters, got {text:?}")),
    }
}
