//! Configuration System
//!
//! Layered configuration: built-in defaults, the global config file, the
//! workspace config files, then `TAPELINK__*` environment variables. A single
//! explicit file can replace the file layers.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::terminal::Terminal;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

mod merge;
mod sources;

pub use merge::merge_policy::DEFAULT_OUTPUT_ROOT;

/// Smallest display width that leaves room for a head column and both shifts
pub const MIN_WIDTH: u16 = 4;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TapelinkConfig {
    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Display geometry of generated artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Columns spanned by each track
    #[serde(default = "default_width")]
    pub width: u16,
}

fn default_width() -> u16 {
    crate::terminal::DEFAULT_WIDTH
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
        }
    }
}

impl RenderConfig {
    pub fn terminal(&self) -> Terminal {
        Terminal::new(self.width)
    }
}

/// Where artifact trees are written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output root, relative to the workspace unless absolute
    #[serde(default = "default_output_root")]
    pub root: PathBuf,
}

fn default_output_root() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_ROOT)
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: default_output_root(),
        }
    }
}

impl OutputConfig {
    pub fn resolve(&self, workspace_root: &Path) -> PathBuf {
        if self.root.is_absolute() {
            self.root.clone()
        } else {
            workspace_root.join(&self.root)
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Render(String),
    Output(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Render(msg) => write!(f, "Render: {}", msg),
            ValidationError::Output(msg) => write!(f, "Output: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl TapelinkConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.render.width < MIN_WIDTH {
            errors.push(ValidationError::Render(format!(
                "width {} is below the minimum of {}",
                self.render.width, MIN_WIDTH
            )));
        }
        if self.output.root.as_os_str().is_empty() {
            errors.push(ValidationError::Output(
                "output root cannot be empty".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Loads [`TapelinkConfig`] from its layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, global file, workspace files and environment overrides
    pub fn load(workspace_root: &Path) -> Result<TapelinkConfig, ApiError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        Self::finish(builder.add_source(environment()))
    }

    /// Load defaults plus one explicit file; the file must exist
    pub fn load_from_file(path: &Path) -> Result<TapelinkConfig, ApiError> {
        let builder = merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        Self::finish(builder.add_source(environment()))
    }

    /// Location of the global config file, if HOME or XDG_CONFIG_HOME is set
    pub fn xdg_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<TapelinkConfig, ApiError> {
        let config: TapelinkConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        debug!(width = config.render.width, root = %config.output.root.display(), "Loaded configuration");
        Ok(config)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("TAPELINK")
        .separator("__")
        .try_parsing(true)
}
