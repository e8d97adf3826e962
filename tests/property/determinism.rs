//! Property-based tests for determinism and dispatch-order independence

use super::strategies::machine;
use proptest::prelude::*;
use tapelink::compile::{complete, Canonicalizer, Compiler};
use tapelink::terminal::{dispatch_keys, Terminal};
use tapelink::types::SymbolPair;

/// Re-running the pipeline on the same machine reproduces ids, graph and fingerprint
#[test]
fn test_pipeline_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let terminal = Terminal::new(32);
    let compiler = Compiler::new(terminal);

    runner
        .run(&machine(), |machine| {
            let table = complete(&machine);
            prop_assert_eq!(
                Canonicalizer::from_table(&table),
                Canonicalizer::from_table(&table)
            );

            let first = compiler.plan(&machine).unwrap();
            let second = compiler.plan(&machine).unwrap();
            prop_assert_eq!(&first.graph, &second.graph);
            prop_assert_eq!(
                first.graph.fingerprint(&terminal),
                second.graph.fingerprint(&terminal)
            );

            Ok(())
        })
        .unwrap();
}

/// Both reply orderings of every pair dispatch to the same node
#[test]
fn test_dispatch_order_agnostic_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&machine(), |machine| {
            let plan = Compiler::default().plan(&machine).unwrap();
            let graph = &plan.graph;

            let mut sources = vec![None];
            sources.extend(graph.nodes.iter().map(|node| Some(node.id)));

            for from in sources {
                let state = match from {
                    Some(id) => graph.node(id).map(|node| node.state.as_str()),
                    None => Some(graph.initial.as_str()),
                };
                let Some(state) = state else { continue };
                let live = !plan.table.is_terminal(state);

                for pair in SymbolPair::all() {
                    let [forward, reverse] = dispatch_keys(pair.0, pair.1);
                    let a = graph.follow(from, &forward);
                    let b = graph.follow(from, &reverse);
                    prop_assert_eq!(a, b);
                    prop_assert_eq!(a.is_some(), live);

                    if let (Some(target), Some(action)) = (a, plan.table.lookup(state, pair)) {
                        prop_assert_eq!(plan.canon.get(action), Some(target));
                    }
                }
            }

            Ok(())
        })
        .unwrap();
}
