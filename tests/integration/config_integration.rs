//! Configuration flowing into CLI commands

use std::fs;
use std::path::PathBuf;
use tapelink::cli::{Commands, OutputFormat, RunContext};
use tapelink::compile::Compiler;
use tapelink::config::ConfigLoader;
use tapelink::programs;
use tapelink::terminal::Terminal;
use tempfile::TempDir;

#[test]
fn test_workspace_config_sets_width_and_root() {
    let temp_dir = TempDir::new().unwrap();
    let workspace = temp_dir.path();
    fs::create_dir_all(workspace.join("config")).unwrap();
    fs::write(
        workspace.join("config").join("config.toml"),
        "[render]\nwidth = 40\n\n[output]\nroot = \"out/tree\"\n",
    )
    .unwrap();

    let config = ConfigLoader::load(workspace).unwrap();
    assert_eq!(config.render.width, 40);

    let ctx = RunContext::new(workspace.to_path_buf(), None).unwrap();
    ctx.execute(&Commands::Build {
        machine: None,
        output: None,
    })
    .unwrap();

    let init = fs::read_to_string(workspace.join("out").join("tree").join("init")).unwrap();
    let expected_prompt = programs::is_prime().unwrap().prompt;
    assert_eq!(init, Terminal::new(40).init_program(&expected_prompt));
}

#[test]
fn test_plan_json_reports_fingerprint() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("tapelink.toml");
    fs::write(&config_file, "[render]\nwidth = 80\n").unwrap();

    let ctx = RunContext::new(temp_dir.path().to_path_buf(), Some(config_file)).unwrap();
    let output = ctx
        .execute(&Commands::Plan {
            machine: None,
            format: OutputFormat::Json,
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    let machine = programs::is_prime().unwrap();
    let compiler = Compiler::new(Terminal::new(80));
    let plan = compiler.plan(&machine).unwrap();
    assert_eq!(value["fingerprint"], plan.graph.fingerprint(compiler.terminal()));
    assert_eq!(value["initial"], "clr0");
    assert_eq!(value["mono_states"], plan.canon.len());
    assert!(!temp_dir.path().join("src").exists());
}

#[test]
fn test_invalid_machine_file_reported() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("bad.toml"), "initial = 3\n").unwrap();
    let ctx = RunContext::new(temp_dir.path().to_path_buf(), None).unwrap();
    let result = ctx.execute(&Commands::Plan {
        machine: Some(PathBuf::from("bad.toml")),
        format: OutputFormat::Text,
    });
    assert!(matches!(result, Err(tapelink::error::ApiError::Machine(_))));
}
