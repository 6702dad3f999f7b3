//! The built-in adventure: a stormy night at an abandoned lighthouse.

use crate::scene::{Choice, Effect, GraphError, Scene, SceneGraph};

/// Id of the scene every new adventure starts in.
pub const ENTRY_SCENE: &str = "intro";

fn journal(text: &str) -> Effect {
    Effect::AddJournal(text.to_string())
}

fn item(id: &str) -> Effect {
    Effect::AddInventory(id.to_string())
}

fn scenes() -> Vec<(&'static str, Scene)> {
    vec![
        (
            ENTRY_SCENE,
            Scene::new(
                "The Keeper's Cottage",
                "Rain drums on the roof of an abandoned lighthouse keeper's cottage. On the table sits a small wooden box bound with brass. Through the window, the dark lighthouse looms over the cliffs.",
                vec![
                    Choice::new("inspect_box", "Inspect the wooden box", "box")
                        .with_effect(journal("Found a brass-bound box in the keeper's cottage.")),
                    Choice::new("approach_tower", "Walk out toward the lighthouse", "tower"),
                    Choice::new("walk_beach", "Head down to the beach", "beach"),
                ],
            ),
        ),
        (
            "box",
            Scene::new(
                "The Brass-Bound Box",
                "The lid creaks open. Inside lie a tarnished brass key and a water-stained map of the coastline.",
                vec![
                    Choice::new("take_key", "Pocket the brass key", ENTRY_SCENE)
                        .with_effect(item("brass_key"))
                        .with_effect(journal("Took a tarnished brass key from the box.")),
                    Choice::new("study_map", "Study the coastline map", ENTRY_SCENE)
                        .with_effect(item("coastline_map"))
                        .with_effect(journal("The map marks a sea cave below the lighthouse.")),
                    Choice::new("close_box", "Close the lid and step back", ENTRY_SCENE),
                ],
            ),
        ),
        (
            "tower",
            Scene::new(
                "The Lighthouse Door",
                "Wind howls around the tower. The iron door is held shut by a heavy brass padlock.",
                vec![
                    Choice::new("unlock_door", "Unlock the padlock with a key", "lamp_room")
                        .with_effect(journal("Unlocked the lighthouse door.")),
                    Choice::new("back_to_cottage", "Return to the cottage", ENTRY_SCENE),
                ],
            ),
        ),
        (
            "lamp_room",
            Scene::new(
                "The Lamp Room",
                "At the top of the spiral stairs the great lamp sits cold. A logbook lies open beside it.",
                vec![
                    Choice::new("read_log", "Read the keeper's logbook", "lamp_room").with_effect(
                        journal("The keeper's last entry: the light must burn until the ship returns."),
                    ),
                    Choice::new("light_lamp", "Light the great lamp", "ending")
                        .with_effect(journal("Lit the great lamp.")),
                    Choice::new("go_down", "Descend the spiral stairs", "tower"),
                ],
            ),
        ),
        (
            "beach",
            Scene::new(
                "The Shingle Beach",
                "Waves crash against the shingle. At the foot of the cliff a sea cave gapes, half flooded.",
                vec![
                    Choice::new("enter_cave", "Wade into the sea cave", "cave"),
                    Choice::new("climb_back", "Climb back up to the cottage", ENTRY_SCENE),
                ],
            ),
        ),
        (
            "cave",
            Scene::new(
                "The Sea Cave",
                "Dripping walls glitter with shells. Wedged in the rocks is a sealed bottle with a note inside.",
                vec![
                    Choice::new("take_bottle", "Take the sealed bottle", "beach")
                        .with_effect(item("sealed_bottle"))
                        .with_effect(journal("Found a message in a bottle in the sea cave.")),
                    Choice::new("leave_cave", "Wade back out to the beach", "beach"),
                ],
            ),
        ),
        (
            "ending",
            Scene::new(
                "The Light Returns",
                "The beam sweeps across the black water. Far out, a ship's horn answers. Your part in this story is done, for now.",
                vec![Choice::new("play_again", "Begin the story again", ENTRY_SCENE)],
            ),
        ),
    ]
}

/// Builds and validates the built-in lighthouse adventure.
pub fn lighthouse() -> Result<SceneGraph, GraphError> {
    SceneGraph::new(
        ENTRY_SCENE,
        scenes()
            .into_iter()
            .map(|(id, scene)| (id.to_string(), scene)),
    )
}
