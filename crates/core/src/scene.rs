//! Scene Graph
//!
//! The adventure is a small directed graph of scenes. Each scene offers a
//! few choices, and each choice leads to another scene, optionally leaving
//! something in the player's journal or inventory. A graph can only be
//! constructed through validation, so every reachable transition target is
//! known to exist.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Appended to every rendered scene.
pub const TRAILING_PROMPT: &str = "What do you do?";

/// Shown for a scene id the graph does not know.
pub const VOID_DESCRIPTION: &str =
    "You drift through a featureless void. Nothing here has taken shape yet.";

/// A state change applied when a choice is taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    AddJournal(String),
    AddInventory(String),
}

/// A labeled edge from one scene to the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub description: String,
    pub next: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Effect>,
}

impl Choice {
    pub fn new(id: &str, description: &str, next: &str) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            next: next.to_string(),
            effects: Vec::new(),
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// A node in the adventure. Choices keep their declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub title: String,
    pub description: String,
    pub choices: Vec<Choice>,
}

impl Scene {
    pub fn new(title: &str, description: &str, choices: Vec<Choice>) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            choices,
        }
    }

    pub fn choice(&self, id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("Entry scene '{0}' is not defined")]
    MissingEntry(String),
    #[error("Choice '{choice}' in scene '{scene}' leads to undefined scene '{target}'")]
    DanglingReference {
        scene: String,
        choice: String,
        target: String,
    },
    #[error("Scene '{scene}' declares choice '{choice}' more than once")]
    DuplicateChoice { scene: String, choice: String },
    #[error("Scene '{0}' has a choice with an empty id")]
    EmptyChoiceId(String),
}

/// The on-disk shape of a scene graph, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SceneGraphDef {
    entry: String,
    scenes: BTreeMap<String, Scene>,
}

/// A validated, immutable scene graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SceneGraphDef", into = "SceneGraphDef")]
pub struct SceneGraph {
    entry: String,
    scenes: BTreeMap<String, Scene>,
}

impl TryFrom<SceneGraphDef> for SceneGraph {
    type Error = GraphError;

    fn try_from(def: SceneGraphDef) -> Result<Self, Self::Error> {
        SceneGraph::new(def.entry, def.scenes)
    }
}

impl From<SceneGraph> for SceneGraphDef {
    fn from(graph: SceneGraph) -> Self {
        Self {
            entry: graph.entry,
            scenes: graph.scenes,
        }
    }
}

impl SceneGraph {
    /// Builds a graph, rejecting dangling references and malformed choices.
    pub fn new(
        entry: impl Into<String>,
        scenes: impl IntoIterator<Item = (String, Scene)>,
    ) -> Result<Self, GraphError> {
        let entry = entry.into();
        let scenes: BTreeMap<String, Scene> = scenes.into_iter().collect();

        if !scenes.contains_key(&entry) {
            return Err(GraphError::MissingEntry(entry));
        }
        for (scene_id, scene) in &scenes {
            let mut seen = HashSet::new();
            for choice in &scene.choices {
                if choice.id.trim().is_empty() {
                    return Err(GraphError::EmptyChoiceId(scene_id.clone()));
                }
                if !seen.insert(choice.id.as_str()) {
                    return Err(GraphError::DuplicateChoice {
                        scene: scene_id.clone(),
                        choice: choice.id.clone(),
                    });
                }
                if !scenes.contains_key(&choice.next) {
                    return Err(GraphError::DanglingReference {
                        scene: scene_id.clone(),
                        choice: choice.id.clone(),
                        target: choice.next.clone(),
                    });
                }
            }
        }

        Ok(Self { entry, scenes })
    }

    /// Parses and validates a graph from JSON.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.get(id)
    }

    pub fn scene_ids(&self) -> impl Iterator<Item = &str> {
        self.scenes.keys().map(String::as_str)
    }

    /// Renders a scene for narration: title, description, the numbered
    /// choices, then the trailing prompt. Unknown ids render the void text.
    pub fn render(&self, scene_id: &str) -> String {
        let Some(scene) = self.scene(scene_id) else {
            return format!("{VOID_DESCRIPTION}\n\n{TRAILING_PROMPT}");
        };

        let mut out = format!("{}\n\n{}\n", scene.title, scene.description);
        if !scene.choices.is_empty() {
            out.push_str("\nChoices:\n");
            for (i, choice) in scene.choices.iter().enumerate() {
                out.push_str(&format!(
                    "{}. {} (say: {})\n",
                    i + 1,
                    choice.description,
                    choice.id
                ));
            }
        }
        out.push('\n');
        out.push_str(TRAILING_PROMPT);
        out
    }
}
