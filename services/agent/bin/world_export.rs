use anyhow::Context;
use clap::Parser;
use parley_agent::cli::ExportCli;
use parley_core::{json_file, world};

/// Writes the built-in adventure world as pretty JSON, ready to be edited
/// and loaded back through `WORLD_PATH`.
fn main() -> anyhow::Result<()> {
    let cli = ExportCli::parse();
    let graph = world::lighthouse().context("Built-in world failed validation")?;
    let bytes = json_file::to_pretty_bytes(&graph)?;
    std::fs::write(&cli.path, bytes)
        .with_context(|| format!("Failed to write {}", cli.path.display()))?;
    Ok(())
}
