//! Prompt loading.
//!
//! Persona prompts ship with `parley-core`; a prompts directory can override
//! any of them with a `<key>.md` file.

use anyhow::Context;
use parley_core::persona::PromptTemplates;
use std::collections::HashMap;
use std::{fs, path::Path};
use tracing::info;

/// A helper function to load prompts from a directory.
pub fn load_prompts(prompts_path: &Path) -> anyhow::Result<HashMap<String, String>> {
    let mut prompts = HashMap::new();
    for entry in fs::read_dir(prompts_path)
        .with_context(|| format!("Failed to read prompts directory {}", prompts_path.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            let prompt_key = path
                .file_stem()
                .and_then(|s| s.to_str())
                .context("Could not get file stem")?
                .to_string();
            let content = fs::read_to_string(&path)?;
            prompts.insert(prompt_key, content);
        }
    }
    Ok(prompts)
}

/// Built-in templates, overridden by the prompts directory when one is configured.
pub fn load_templates(prompts_path: Option<&Path>) -> anyhow::Result<PromptTemplates> {
    match prompts_path {
        Some(dir) => {
            let overrides = load_prompts(dir)?;
            info!(dir = %dir.display(), count = overrides.len(), "Loaded prompt overrides");
            Ok(PromptTemplates::with_overrides(overrides))
        }
        None => Ok(PromptTemplates::builtin()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::persona::{NARRATOR_PROMPT_KEY, Persona, SDR_PROMPT_KEY};

    #[test]
    fn test_only_markdown_files_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("sdr_system_prompt.md"), "Custom {faq}").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let prompts = load_prompts(dir.path()).unwrap();

        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[SDR_PROMPT_KEY], "Custom {faq}");
    }

    #[test]
    fn test_overrides_layer_on_builtin() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("sdr_system_prompt.md"), "Custom {faq}").unwrap();

        let templates = load_templates(Some(dir.path())).unwrap();

        assert_eq!(templates.instructions(Persona::Sdr, "[]"), "Custom []");
        assert!(templates.get(NARRATOR_PROMPT_KEY).is_some());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_templates(Some(&dir.path().join("absent"))).is_err());
        assert!(load_templates(None).is_ok());
    }
}
