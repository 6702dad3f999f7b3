//! Free-text action resolution.
//!
//! Players describe what they want to do in their own words. Resolution is a
//! best-effort, deterministic heuristic over the current scene's choices,
//! tried in stages with the first hit winning:
//!
//! 1. **Exact**: the whole input equals a choice id (case-insensitive).
//! 2. **Containment**: a choice id appears inside the input, or one of the
//!    first four words of the choice description does.
//! 3. **Keyword**: any word of a choice description appears in the input.
//!
//! Within a stage choices are scanned in their declared order.

use crate::scene::{Choice, Scene};

/// Number of leading description words considered during containment matching.
const LEADING_WORDS: usize = 4;

/// Which stage produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Containment,
    Keyword,
}

/// Lowercased description words with surrounding punctuation stripped.
fn description_words(description: &str) -> Vec<String> {
    description
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| c.is_ascii_punctuation()).to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Resolves `input` against the choices of `scene`.
pub fn resolve_action<'a>(scene: &'a Scene, input: &str) -> Option<(&'a Choice, MatchKind)> {
    let text = input.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    if let Some(choice) = scene.choices.iter().find(|c| c.id.to_lowercase() == text) {
        return Some((choice, MatchKind::Exact));
    }

    if let Some(choice) = scene.choices.iter().find(|c| {
        text.contains(&c.id.to_lowercase())
            || description_words(&c.description)
                .iter()
                .take(LEADING_WORDS)
                .any(|w| text.contains(w.as_str()))
    }) {
        return Some((choice, MatchKind::Containment));
    }

    scene
        .choices
        .iter()
        .find(|c| {
            description_words(&c.description)
                .iter()
                .any(|w| text.contains(w.as_str()))
        })
        .map(|choice| (choice, MatchKind::Keyword))
}
