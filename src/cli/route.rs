//! CLI route: run context and the single dispatch table over commands.

use crate::cli::command_name;
use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{format_build_summary, format_plan_json, format_plan_text};
use crate::compile::Compiler;
use crate::config::{ConfigLoader, TapelinkConfig};
use crate::error::ApiError;
use crate::machine::Machine;
use crate::programs;
use std::path::{Path, PathBuf};
use tracing::{info, info_span};

/// Runtime context for CLI execution: workspace and loaded configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: TapelinkConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self::with_config(workspace_root, config))
    }

    pub fn with_config(workspace_root: PathBuf, config: TapelinkConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &TapelinkConfig {
        &self.config
    }

    /// Execute a command, returning the text to print on stdout
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let _span = info_span!("command", name = command_name(command)).entered();
        let compiler = Compiler::new(self.config.render.terminal());

        match command {
            Commands::Build { machine, output } => {
                let machine = self.load_machine(machine.as_deref())?;
                let root = match output {
                    Some(path) => self.workspace_root.join(path),
                    None => self.config.output.resolve(&self.workspace_root),
                };
                info!(root = %root.display(), "Building artifact tree");
                let summary = compiler.build(&machine, &root)?;
                Ok(format_build_summary(&summary))
            }
            Commands::Plan { machine, format } => {
                let machine = self.load_machine(machine.as_deref())?;
                let plan = compiler.plan(&machine)?;
                let fingerprint = plan.graph.fingerprint(compiler.terminal());
                Ok(match format {
                    OutputFormat::Text => format_plan_text(&plan, &fingerprint),
                    OutputFormat::Json => format_plan_json(&plan, &fingerprint),
                })
            }
        }
    }

    fn load_machine(&self, path: Option<&Path>) -> Result<Machine, ApiError> {
        let machine = match path {
            Some(path) => Machine::load(&self.workspace_root.join(path))?,
            None => {
                info!("No machine given, using the bundled primality tester");
                programs::is_prime()?
            }
        };
        Ok(machine)
    }
}
