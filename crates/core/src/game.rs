//! Adventure Session State
//!
//! A `GameSession` is the per-conversation progress record for the adventure
//! persona. It is always handed to the operations that read or change it
//! together with the `SceneGraph` it refers to; nothing here reaches for
//! ambient context.

use crate::resolver::{MatchKind, resolve_action};
use crate::scene::{Effect, SceneGraph, TRAILING_PROMPT};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix for narration after a successful action.
pub const NARRATOR_ACK: &str = "The Game Master nods. ";

/// Prefix for narration when an action could not be matched to a choice.
pub const CLARIFY: &str = "I didn't quite catch that action. Pick one of the choices below, or describe what you do in a few words.";

/// Prefix for narration when the adventure restarts.
pub const RESTART_LINE: &str = "The mists swirl and the story begins anew.";

/// How many transitions the journal report shows.
const RECENT_TRANSITIONS: usize = 6;

/// One move from a scene to the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: String,
    pub action: String,
    pub to: String,
    pub at: DateTime<Utc>,
}

/// The result of trying to act on a player's words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A choice matched and the session moved on.
    Moved {
        transition: Transition,
        matched_by: MatchKind,
        narration: String,
    },
    /// Nothing matched; the session is unchanged.
    Unclear { narration: String },
}

impl ActionOutcome {
    pub fn narration(&self) -> &str {
        match self {
            ActionOutcome::Moved { narration, .. } | ActionOutcome::Unclear { narration } => {
                narration
            }
        }
    }
}

fn new_session_id() -> String {
    format!("{:08x}", rand::random::<u32>())
}

/// Progress of one player through the adventure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    pub player_name: Option<String>,
    pub current_scene: String,
    pub history: Vec<Transition>,
    pub journal: Vec<String>,
    pub inventory: Vec<String>,
    pub choices_taken: Vec<String>,
}

impl GameSession {
    /// Starts a fresh session at the graph's entry scene.
    pub fn new(graph: &SceneGraph) -> Self {
        Self {
            session_id: new_session_id(),
            started_at: Utc::now(),
            player_name: None,
            current_scene: graph.entry().to_string(),
            history: Vec::new(),
            journal: Vec::new(),
            inventory: Vec::new(),
            choices_taken: Vec::new(),
        }
    }

    /// Throws away all progress and returns the opening narration.
    pub fn reset(&mut self, graph: &SceneGraph) -> String {
        *self = GameSession::new(graph);
        format!("{RESTART_LINE}\n\n{}", graph.render(&self.current_scene))
    }

    /// Renders the scene the player is currently in.
    pub fn look(&self, graph: &SceneGraph) -> String {
        graph.render(&self.current_scene)
    }

    /// Resolves free-form player input against the current scene and, on a
    /// match, applies the choice: effects first, then the history entry, then
    /// the scene change.
    pub fn take_action(&mut self, graph: &SceneGraph, input: &str) -> ActionOutcome {
        let resolved = graph
            .scene(&self.current_scene)
            .and_then(|scene| resolve_action(scene, input));

        let Some((choice, matched_by)) = resolved else {
            return ActionOutcome::Unclear {
                narration: format!("{CLARIFY}\n\n{}", self.look(graph)),
            };
        };

        for effect in &choice.effects {
            match effect {
                Effect::AddJournal(entry) => self.journal.push(entry.clone()),
                Effect::AddInventory(item) => self.inventory.push(item.clone()),
            }
        }

        let transition = Transition {
            from: self.current_scene.clone(),
            action: choice.id.clone(),
            to: choice.next.clone(),
            at: Utc::now(),
        };
        self.history.push(transition.clone());
        self.choices_taken.push(choice.id.clone());
        self.current_scene = choice.next.clone();

        ActionOutcome::Moved {
            transition,
            matched_by,
            narration: format!("{NARRATOR_ACK}{}", graph.render(&self.current_scene)),
        }
    }

    /// Formats the player's progress. Does not change anything.
    pub fn journal_report(&self) -> String {
        let mut lines = vec![
            format!("Session: {}", self.session_id),
            format!("Started: {}", self.started_at.to_rfc3339()),
        ];
        if let Some(name) = &self.player_name {
            lines.push(format!("Player: {name}"));
        }

        lines.push(String::new());
        lines.push("Journal:".to_string());
        if self.journal.is_empty() {
            lines.push("  (empty)".to_string());
        } else {
            lines.extend(self.journal.iter().map(|entry| format!("  - {entry}")));
        }

        lines.push(String::new());
        lines.push("Inventory:".to_string());
        if self.inventory.is_empty() {
            lines.push("  (empty)".to_string());
        } else {
            lines.extend(self.inventory.iter().map(|item| format!("  - {item}")));
        }

        lines.push(String::new());
        lines.push("Recent path:".to_string());
        if self.history.is_empty() {
            lines.push("  (no moves yet)".to_string());
        } else {
            let skip = self.history.len().saturating_sub(RECENT_TRANSITIONS);
            lines.extend(
                self.history[skip..]
                    .iter()
                    .map(|t| format!("  - {} --[{}]--> {}", t.from, t.action, t.to)),
            );
        }

        lines.push(String::new());
        lines.push(TRAILING_PROMPT.to_string());
        lines.join("\n")
    }
}
