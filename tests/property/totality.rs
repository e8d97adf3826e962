//! Completion and canonicalization invariants

use super::strategies::machine;
use proptest::prelude::*;
use std::collections::HashSet;
use tapelink::compile::{complete, Canonicalizer};
use tapelink::types::{Action, SymbolPair};

/// Every non-terminal state answers every pair, and every target is a known state
#[test]
fn test_completion_is_total_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&machine(), |machine| {
            let table = complete(&machine);
            let states = table.states();

            for state in &states {
                if table.is_terminal(state) {
                    prop_assert!(table.row(state).is_none());
                    continue;
                }
                for pair in SymbolPair::all() {
                    let action = table.lookup(state, pair);
                    prop_assert!(action.is_some(), "{} {}", state, pair);
                    if let Some(action) = action {
                        prop_assert!(states.contains(action.next.as_str()));
                    }
                }
            }

            // explicitly given transitions of non-terminal states survive completion
            for (state, row) in &machine.transitions {
                if table.is_terminal(state) {
                    continue;
                }
                for (pair, action) in row {
                    prop_assert_eq!(table.lookup(state, *pair), Some(action));
                }
            }

            Ok(())
        })
        .unwrap();
}

/// Actions and mono-state ids are in one-to-one correspondence
#[test]
fn test_canonicalization_bijection_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&machine(), |machine| {
            let table = complete(&machine);
            let canon = Canonicalizer::from_table(&table);

            let actions: Vec<&Action> = table.rows().flat_map(|(_, row)| row.values()).collect();
            let distinct: HashSet<&Action> = actions.iter().copied().collect();
            prop_assert_eq!(distinct.len(), canon.len());

            for (id, action) in canon.iter() {
                prop_assert_eq!(canon.get(action), Some(id));
                prop_assert_eq!(canon.action(id), Some(action));
            }

            for a in &distinct {
                for b in &distinct {
                    prop_assert_eq!(a == b, canon.get(a) == canon.get(b));
                }
            }

            // bounded by the number of table entries, strictly when actions repeat
            let rows = table.rows().count();
            prop_assert!(canon.len() <= rows * 9);
            if actions.len() > distinct.len() {
                prop_assert!(canon.len() < rows * 9);
            }

            Ok(())
        })
        .unwrap();
}
