//! Adventure Agent Service
//!
//! Tool callbacks for the narrator persona. The session record lives behind
//! an explicit handle owned by the service; each tool locks it, hands it to
//! the pure game operations together with the scene graph, and returns the
//! narration text.

use crate::game::{ActionOutcome, GameSession};
use crate::scene::SceneGraph;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{info, warn};

/// Arguments for acting on the player's words.
#[derive(Deserialize, JsonSchema, Debug)]
pub struct PlayerActionArgs {
    #[schemars(
        description = "What the player says they do, in their own words (e.g. 'open the box')"
    )]
    pub action: String,
}

/// Arguments for recording the player's name.
#[derive(Deserialize, JsonSchema, Debug)]
pub struct PlayerNameArgs {
    #[schemars(description = "The name the player wants to be called")]
    pub name: String,
}

/// The MCP service implementation for the narrator persona.
pub struct AdventureService {
    graph: Arc<SceneGraph>,
    /// The player's progress for this conversation.
    pub session: Arc<Mutex<GameSession>>,
    instructions: Arc<String>,
    /// Optional channel for broadcasting session changes to subscribers.
    pub state_tx: Option<mpsc::Sender<GameSession>>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for AdventureService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(self.instructions.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[tool_router]
impl AdventureService {
    /// Creates a service with a fresh session at the graph's entry scene.
    pub fn new(graph: Arc<SceneGraph>, instructions: String) -> Self {
        let session = GameSession::new(&graph);
        Self {
            graph,
            session: Arc::new(Mutex::new(session)),
            instructions: Arc::new(instructions),
            state_tx: None,
            tool_router: Self::tool_router(),
        }
    }

    pub fn with_state_updates(mut self, tx: mpsc::Sender<GameSession>) -> Self {
        self.state_tx = Some(tx);
        self
    }

    async fn broadcast(&self, session: &GameSession) {
        if let Some(tx) = &self.state_tx {
            if tx.send(session.clone()).await.is_err() {
                warn!("Failed to broadcast session update: receiver dropped.");
            }
        }
    }

    /// Resolves the player's words against the current scene.
    ///
    /// A match applies the choice and narrates the next scene; anything else
    /// asks the player to clarify and leaves the session untouched.
    #[tool(
        description = "Perform the player's action. Pass the player's words; the result is the narration to read back."
    )]
    pub async fn player_action(&self, args: Parameters<PlayerActionArgs>) -> Result<String, String> {
        info!(action = %args.0.action, "Executing tool 'player_action'");
        let mut session = self.session.lock().await;
        let outcome = session.take_action(&self.graph, &args.0.action);

        match &outcome {
            ActionOutcome::Moved {
                transition,
                matched_by,
                ..
            } => {
                info!(
                    from = %transition.from,
                    choice = %transition.action,
                    to = %transition.to,
                    ?matched_by,
                    "Scene transition"
                );
                self.broadcast(&session).await;
            }
            ActionOutcome::Unclear { .. } => {
                info!(scene = %session.current_scene, "Action did not match any choice");
            }
        }

        Ok(outcome.narration().to_string())
    }

    #[tool(description = "Describe the current scene and the choices available.")]
    pub async fn look_around(&self) -> Result<String, String> {
        info!("Executing tool 'look_around'");
        let session = self.session.lock().await;
        Ok(session.look(&self.graph))
    }

    #[tool(
        description = "Show the player's journal: session info, notes, inventory and their most recent moves."
    )]
    pub async fn show_journal(&self) -> Result<String, String> {
        info!("Executing tool 'show_journal'");
        let session = self.session.lock().await;
        Ok(session.journal_report())
    }

    /// Throws away all progress and starts the story from the beginning.
    #[tool(
        description = "Start the adventure over from the beginning, clearing the journal, inventory and history."
    )]
    pub async fn restart_adventure(&self) -> Result<String, String> {
        info!("Executing tool 'restart_adventure'");
        let mut session = self.session.lock().await;
        let opening = session.reset(&self.graph);
        info!(session_id = %session.session_id, "Adventure restarted");
        self.broadcast(&session).await;
        Ok(opening)
    }

    #[tool(description = "Remember the name the player wants to be called.")]
    pub async fn set_player_name(&self, args: Parameters<PlayerNameArgs>) -> Result<String, String> {
        info!(name = %args.0.name, "Executing tool 'set_player_name'");
        let name = args.0.name.trim();
        if name.is_empty() {
            return Err("Player name must not be empty.".to_string());
        }
        let mut session = self.session.lock().await;
        session.player_name = Some(name.to_string());
        self.broadcast(&session).await;
        Ok(format!("OK. The player will be called {name}."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CLARIFY, NARRATOR_ACK, RESTART_LINE};
    use crate::scene::TRAILING_PROMPT;
    use crate::world;

    fn service() -> AdventureService {
        AdventureService::new(
            Arc::new(world::lighthouse().unwrap()),
            "You are the Game Master.".to_string(),
        )
    }

    fn act(action: &str) -> Parameters<PlayerActionArgs> {
        Parameters(PlayerActionArgs {
            action: action.to_string(),
        })
    }

    #[tokio::test]
    async fn test_player_action_moves_between_scenes() {
        let service = service();

        let text = service.player_action(act("inspect_box")).await.unwrap();

        assert!(text.starts_with(NARRATOR_ACK));
        let session = service.session.lock().await;
        assert_eq!(session.current_scene, "box");
        assert_eq!(session.history.len(), 1);
        assert_eq!(session.history[0].from, "intro");
        assert_eq!(session.history[0].to, "box");
    }

    #[tokio::test]
    async fn test_unmatched_action_asks_for_clarification() {
        let service = service();

        let text = service
            .player_action(act("gibberish nonsense"))
            .await
            .unwrap();

        assert!(text.starts_with(CLARIFY));
        assert_eq!(service.session.lock().await.current_scene, "intro");
    }

    #[tokio::test]
    async fn test_free_text_reaches_the_lamp_and_loops_home() {
        let service = service();
        for (words, scene) in [
            ("walk out to lighthouse", "tower"),
            ("unlock it with my key", "lamp_room"),
            ("light_lamp", "ending"),
            ("let's begin again", "intro"),
        ] {
            service.player_action(act(words)).await.unwrap();
            assert_eq!(service.session.lock().await.current_scene, scene, "after '{words}'");
        }
    }

    #[tokio::test]
    async fn test_restart_and_journal() {
        let (tx, mut rx) = mpsc::channel(8);
        let service = service().with_state_updates(tx);
        service
            .set_player_name(Parameters(PlayerNameArgs {
                name: " Mira ".into(),
            }))
            .await
            .unwrap();
        service.player_action(act("inspect_box")).await.unwrap();
        service.player_action(act("take_key")).await.unwrap();

        let journal = service.show_journal().await.unwrap();
        assert!(journal.contains("Player: Mira"));
        assert!(journal.contains("brass_key"));
        assert!(journal.contains("intro --[inspect_box]--> box"));
        assert!(journal.ends_with(TRAILING_PROMPT));

        let opening = service.restart_adventure().await.unwrap();
        assert!(opening.starts_with(RESTART_LINE));
        let journal = service.show_journal().await.unwrap();
        assert!(journal.contains("(no moves yet)"));

        // name, two moves, restart
        let mut updates = 0;
        while rx.try_recv().is_ok() {
            updates += 1;
        }
        assert_eq!(updates, 4);
    }

    #[tokio::test]
    async fn test_blank_player_name_is_rejected() {
        let service = service();
        let err = service
            .set_player_name(Parameters(PlayerNameArgs { name: "  ".into() }))
            .await
            .unwrap_err();
        assert!(err.contains("empty"));
        assert!(service.session.lock().await.player_name.is_none());
    }

    #[tokio::test]
    async fn test_look_around_renders_current_scene() {
        let service = service();
        let text = service.look_around().await.unwrap();
        assert!(text.starts_with("The Keeper's Cottage"));
        assert!(text.ends_with(TRAILING_PROMPT));
    }
}
