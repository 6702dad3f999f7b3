//! Persona Prompts
//!
//! Each persona is an instruction string plus the tools its service exposes.
//! Instruction templates ship with the crate and can be overridden by
//! `*.md` files in a prompts directory, keyed by file stem.

use std::collections::HashMap;
use std::fmt;

pub const SDR_PROMPT_KEY: &str = "sdr_system_prompt";
pub const NARRATOR_PROMPT_KEY: &str = "narrator_system_prompt";

const SDR_PROMPT: &str = include_str!("../prompts/sdr_system_prompt.md");
const NARRATOR_PROMPT: &str = include_str!("../prompts/narrator_system_prompt.md");

/// The voice agents this workspace can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    Sdr,
    Adventure,
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Persona::Sdr => write!(f, "sdr"),
            Persona::Adventure => write!(f, "adventure"),
        }
    }
}

/// Prompt templates by key, with the built-in ones as a fallback.
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    templates: HashMap<String, String>,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PromptTemplates {
    pub fn builtin() -> Self {
        let templates = HashMap::from([
            (SDR_PROMPT_KEY.to_string(), SDR_PROMPT.to_string()),
            (NARRATOR_PROMPT_KEY.to_string(), NARRATOR_PROMPT.to_string()),
        ]);
        Self { templates }
    }

    /// Layers `overrides` on top of the built-in templates.
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        let mut prompts = Self::builtin();
        prompts.templates.extend(overrides);
        prompts
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    /// Renders the full instructions for a persona.
    ///
    /// `faq_text` fills the `{faq}` placeholder of the SDR prompt and is
    /// ignored by the narrator.
    pub fn instructions(&self, persona: Persona, faq_text: &str) -> String {
        match persona {
            Persona::Sdr => self
                .get(SDR_PROMPT_KEY)
                .unwrap_or(SDR_PROMPT)
                .replace("{faq}", faq_text),
            Persona::Adventure => self
                .get(NARRATOR_PROMPT_KEY)
                .unwrap_or(NARRATOR_PROMPT)
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdr_instructions_embed_faq() {
        let prompts = PromptTemplates::builtin();
        let text = prompts.instructions(Persona::Sdr, r#"[{"question":"Q?","answer":"A."}]"#);

        assert!(text.contains(r#"{"question":"Q?","answer":"A."}"#));
        assert!(!text.contains("{faq}"));
        assert!(text.contains("update_lead_profile"));
        assert!(text.contains("submit_lead_and_end"));
    }

    #[test]
    fn test_sdr_instructions_survive_empty_faq() {
        let text = PromptTemplates::builtin().instructions(Persona::Sdr, "");
        assert!(!text.contains("{faq}"));
    }

    #[test]
    fn test_narrator_instructions_name_the_tools() {
        let text = PromptTemplates::builtin().instructions(Persona::Adventure, "ignored");
        for tool in ["player_action", "show_journal", "restart_adventure"] {
            assert!(text.contains(tool), "missing {tool}");
        }
        assert!(!text.contains("ignored"));
    }

    #[test]
    fn test_overrides_replace_only_their_key() {
        let prompts = PromptTemplates::with_overrides(HashMap::from([(
            SDR_PROMPT_KEY.to_string(),
            "Custom SDR. FAQ: {faq}".to_string(),
        )]));

        assert_eq!(prompts.instructions(Persona::Sdr, "[]"), "Custom SDR. FAQ: []");
        assert_eq!(prompts.get(NARRATOR_PROMPT_KEY), Some(NARRATOR_PROMPT));
    }

    #[test]
    fn test_persona_display() {
        assert_eq!(Persona::Sdr.to_string(), "sdr");
        assert_eq!(Persona::Adventure.to_string(), "adventure");
    }
}
