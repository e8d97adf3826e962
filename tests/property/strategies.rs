//! Generators for random partial machines

use proptest::prelude::*;
use tapelink::machine::Machine;
use tapelink::types::{Action, Move, Symbol, SymbolPair, TrackOp, INVALID_STATE};

/// A small pool so generated tables reuse states and collide on actions
const STATES: [&str; 5] = ["a", "b", "c", "d", INVALID_STATE];

pub fn symbol() -> impl Strategy<Value = Symbol> {
    prop_oneof![Just(Symbol::Zero), Just(Symbol::One), Just(Symbol::Blank)]
}

pub fn shift() -> impl Strategy<Value = Move> {
    prop_oneof![Just(Move::Left), Just(Move::Right), Just(Move::Stay)]
}

pub fn state() -> impl Strategy<Value = String> {
    prop::sample::select(STATES.to_vec()).prop_map(String::from)
}

pub fn action() -> impl Strategy<Value = Action> {
    (state(), symbol(), shift(), symbol(), shift()).prop_map(|(next, w1, m1, w2, m2)| {
        Action::new(next, TrackOp::new(w1, m1), TrackOp::new(w2, m2))
    })
}

pub fn machine() -> impl Strategy<Value = Machine> {
    (
        state(),
        prop::collection::vec((state(), symbol(), symbol(), action()), 0..40),
        prop::collection::btree_map(state(), "[a-z ]{0,12}", 0..3),
    )
        .prop_map(|(initial, rules, halts)| {
            let mut machine = Machine::new(initial);
            machine.halts = halts;
            for (state, a, b, action) in rules {
                machine.insert_rule(state, SymbolPair(a, b), action);
            }
            machine
        })
}
