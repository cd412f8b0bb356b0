//! Command handlers, one module per resource

pub mod group;
pub mod plan;
pub mod profile;
pub mod subscription;
pub mod webapp;

use crate::cli;
use crate::output;

/// Map the CLI-level format to the renderer's. Auto renders as a table;
/// scripting callers ask for json or yaml explicitly.
pub(crate) fn render_format(format: cli::OutputFormat) -> output::OutputFormat {
    match format {
        cli::OutputFormat::Json => output::OutputFormat::Json,
        cli::OutputFormat::Yaml => output::OutputFormat::Yaml,
        cli::OutputFormat::Table | cli::OutputFormat::Auto => output::OutputFormat::Table,
    }
}
