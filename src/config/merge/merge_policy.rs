//! Merge rules: defaults every later source overrides.

use crate::terminal::DEFAULT_WIDTH;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Output root used when neither the command line nor a config file names one
pub const DEFAULT_OUTPUT_ROOT: &str = "src";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("render.width", i64::from(DEFAULT_WIDTH))?
        .set_default("output.root", DEFAULT_OUTPUT_ROOT)
}
