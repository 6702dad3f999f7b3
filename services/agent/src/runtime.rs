//! Builds a persona's tool service and serves it over stdio.
//!
//! Stdout carries the MCP transport, so all logging goes to stderr.

use crate::config::Config;
use crate::prompts;
use anyhow::Context;
use parley_core::{
    Command,
    adventure::AdventureService,
    game::GameSession,
    knowledge::{self, FaqIndex},
    lead::LeadProfile,
    persona::{Persona, PromptTemplates},
    scene::SceneGraph,
    sdr::SdrService,
    store::JsonFileLeadStore,
    world,
};
use rmcp::{ServerHandler, ServiceExt, transport::stdio};
use std::{fmt::Debug, path::Path, sync::Arc};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Loads the adventure world from `path`, or the built-in one.
///
/// A file that does not describe a valid graph is a startup error.
pub fn load_world(path: Option<&Path>) -> anyhow::Result<SceneGraph> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read world file {}", path.display()))?;
            let graph = SceneGraph::from_json(&raw)
                .with_context(|| format!("Invalid world file {}", path.display()))?;
            info!(path = %path.display(), entry = %graph.entry(), "Loaded adventure world");
            Ok(graph)
        }
        None => world::lighthouse().context("Built-in world failed validation"),
    }
}

/// Creates the SDR service, seeding the FAQ file if needed.
///
/// Returns the receiving ends of the service's state and command channels.
pub fn build_sdr(
    config: &Config,
    templates: &PromptTemplates,
) -> (SdrService, mpsc::Receiver<LeadProfile>, mpsc::Receiver<Command>) {
    let (entries, faq_text) = knowledge::load_prompt_text(&config.faq_path);
    info!(entries = entries.len(), path = %config.faq_path.display(), "FAQ loaded");

    let instructions = templates.instructions(Persona::Sdr, &faq_text);
    let store = Arc::new(JsonFileLeadStore::new(config.leads_path.clone()));
    let (state_tx, state_rx) = mpsc::channel(16);
    let (command_tx, command_rx) = mpsc::channel(4);
    let service = SdrService::new(store, Arc::new(FaqIndex::new(entries)), instructions)
        .with_state_updates(state_tx)
        .with_commands(command_tx);
    (service, state_rx, command_rx)
}

/// Creates the adventure service over the configured world, along with the
/// receiving end of its session broadcasts.
pub fn build_adventure(
    config: &Config,
    templates: &PromptTemplates,
) -> anyhow::Result<(AdventureService, mpsc::Receiver<GameSession>)> {
    let graph = load_world(config.world_path.as_deref())?;
    let instructions = templates.instructions(Persona::Adventure, "");
    let (state_tx, state_rx) = mpsc::channel(16);
    let service =
        AdventureService::new(Arc::new(graph), instructions).with_state_updates(state_tx);
    Ok((service, state_rx))
}

/// Logs each state broadcast at debug level until the service goes away.
async fn watch_state<T: Debug>(mut rx: mpsc::Receiver<T>) -> usize {
    let mut seen = 0;
    while let Some(state) = rx.recv().await {
        seen += 1;
        debug!(?state, "State updated");
    }
    seen
}

/// Logs commands from the tool service. The host owns the call lifecycle,
/// so a completed session does not stop the server.
async fn watch_commands(mut rx: mpsc::Receiver<Command>) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::SessionComplete(message) => {
                info!(%message, "Session complete");
            }
        }
    }
}

async fn serve<S: ServerHandler>(service: S) -> anyhow::Result<()> {
    let running = service
        .serve(stdio())
        .await
        .context("Failed to start MCP server on stdio")?;
    let reason = running.waiting().await?;
    info!(?reason, "MCP server stopped");
    Ok(())
}

/// Runs one persona until the host disconnects.
pub async fn run(persona: Persona, config: &Config) -> anyhow::Result<()> {
    let templates = prompts::load_templates(config.prompts_path.as_deref())?;
    info!(%persona, "Starting persona");

    match persona {
        Persona::Sdr => {
            let (service, state_rx, command_rx) = build_sdr(config, &templates);
            let state = tokio::spawn(watch_state(state_rx));
            let commands = tokio::spawn(watch_commands(command_rx));
            let result = serve(service).await;
            state.abort();
            commands.abort();
            result
        }
        Persona::Adventure => {
            let (service, state_rx) = build_adventure(config, &templates)?;
            let state = tokio::spawn(watch_state(state_rx));
            let result = serve(service).await;
            state.abort();
            result
        }
    }
}
