//! End-to-end compilation of small machines

use super::test_utils::{node_dirs, one_rule_machine, snapshot, TreeEntry};
use std::fs;
use std::path::PathBuf;
use tapelink::compile::Compiler;
use tapelink::machine::Machine;
use tapelink::terminal::{dispatch_keys, Terminal};
use tapelink::types::{Action, Move, Symbol, SymbolPair, TrackOp, INVALID_MESSAGE};
use tempfile::TempDir;

#[test]
fn test_one_rule_machine_tree() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    let terminal = Terminal::default();

    let summary = Compiler::new(terminal)
        .build(&one_rule_machine(), &root)
        .unwrap();

    // the custom action and the shared sink action
    assert_eq!(summary.nodes, 2);
    assert_eq!(node_dirs(&root), vec!["0".to_string(), "1".to_string()]);

    // (1,1) in both orderings leads to the custom action's directory
    let [forward, reverse] = dispatch_keys(Symbol::One, Symbol::One);
    let custom = fs::read_link(root.join(&forward)).unwrap();
    assert_eq!(fs::read_link(root.join(&reverse)).unwrap(), custom);
    assert_eq!(custom, PathBuf::from("1"));

    // B is terminal, so the custom action halts with B's message
    assert_eq!(
        fs::read_to_string(root.join(&custom).join("w")).unwrap(),
        terminal.halt_program("done")
    );
    assert_eq!(
        fs::read_to_string(root.join("0").join("w")).unwrap(),
        terminal.halt_program(INVALID_MESSAGE)
    );

    // every other pair falls through to the sink
    for pair in SymbolPair::all().filter(|p| *p != SymbolPair(Symbol::One, Symbol::One)) {
        for key in dispatch_keys(pair.0, pair.1) {
            assert_eq!(fs::read_link(root.join(key)).unwrap(), PathBuf::from("0"));
        }
    }

    // init, postinit, two node dirs, 18 root links
    assert_eq!(fs::read_dir(&root).unwrap().count(), 22);
    // halting nodes have no outgoing edges
    assert_eq!(fs::read_dir(root.join("1")).unwrap().count(), 1);
}

#[test]
fn test_init_artifacts_written() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    let terminal = Terminal::new(16);
    let machine = one_rule_machine().with_prompt("number?");

    Compiler::new(terminal).build(&machine, &root).unwrap();

    let tree = snapshot(&root);
    assert_eq!(
        tree.get(&PathBuf::from("init")),
        Some(&TreeEntry::File(terminal.init_program("number?")))
    );
    assert_eq!(
        tree.get(&PathBuf::from("postinit")),
        Some(&TreeEntry::File(terminal.post_init_program()))
    );
}

#[test]
fn test_step_nodes_link_into_siblings() {
    // A loops on (0,0) writing 1 and moving track 1 right, halts on (#,#)
    let looping = Action::new(
        "A",
        TrackOp::new(Symbol::One, Move::Right),
        TrackOp::new(Symbol::Blank, Move::Left),
    );
    let machine = Machine::new("A")
        .halt("B", "bye")
        .rule("A", SymbolPair(Symbol::Zero, Symbol::Zero), looping.clone())
        .rule(
            "A",
            SymbolPair(Symbol::Blank, Symbol::Blank),
            Action::new("B", TrackOp::idle(), TrackOp::idle()),
        );

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    let terminal = Terminal::default();
    let compiler = Compiler::new(terminal);
    let plan = compiler.plan(&machine).unwrap();
    compiler.build(&machine, &root).unwrap();

    let step_id = plan.canon.get(&looping).unwrap();
    let step_dir = root.join(step_id.tag());
    assert_eq!(
        fs::read_to_string(step_dir.join("w")).unwrap(),
        terminal.step_program(looping.tracks)
    );

    // the step node leads back into A, so it carries A's full row
    let links: Vec<_> = fs::read_dir(&step_dir)
        .unwrap()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().unwrap().is_symlink())
        .collect();
    assert_eq!(links.len(), 18);

    let [key, _] = dispatch_keys(Symbol::Zero, Symbol::Zero);
    assert_eq!(
        fs::read_link(step_dir.join(&key)).unwrap(),
        PathBuf::from("..").join(step_id.tag())
    );
    // relative links resolve inside the tree
    assert!(step_dir.join(&key).join("w").is_file());
}
