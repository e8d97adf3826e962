//! Output root protection: a tree is written once and never touched again

use super::test_utils::{one_rule_machine, snapshot};
use std::fs;
use tapelink::compile::Compiler;
use tapelink::error::CompileError;
use tempfile::TempDir;

#[test]
fn test_second_build_fails_and_leaves_tree_alone() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    let compiler = Compiler::default();

    compiler.build(&one_rule_machine(), &root).unwrap();
    let before = snapshot(&root);

    let result = compiler.build(&one_rule_machine(), &root);
    assert!(matches!(result, Err(CompileError::OutputRootExists(_))));
    assert_eq!(snapshot(&root), before);
}

#[test]
fn test_existing_file_as_root_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    fs::write(&root, "not a directory").unwrap();

    let result = Compiler::default().build(&one_rule_machine(), &root);
    assert!(matches!(result, Err(CompileError::OutputRootExists(_))));
    assert_eq!(fs::read_to_string(&root).unwrap(), "not a directory");
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_root_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("src");
    std::os::unix::fs::symlink(temp_dir.path().join("nowhere"), &root).unwrap();

    let result = Compiler::default().build(&one_rule_machine(), &root);
    assert!(matches!(result, Err(CompileError::OutputRootExists(_))));
    assert!(!temp_dir.path().join("nowhere").exists());
}

#[test]
fn test_missing_parents_created() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("a").join("b").join("src");

    Compiler::default().build(&one_rule_machine(), &root).unwrap();
    assert!(root.join("init").is_file());
}
