//! CLI domain: parse, route, help, output, and presentation only.
//! No compilation logic; a single route table dispatches to the compiler.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{format_build_summary, format_plan_json, format_plan_text};
pub use route::RunContext;
