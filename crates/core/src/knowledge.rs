//! FAQ Knowledge Base
//!
//! The SDR persona answers product questions from a small FAQ file. The file
//! is seeded with a built-in list the first time the agent starts, then read
//! once and embedded into the persona instructions. A fuzzy index over the
//! same entries backs the `lookup_faq` tool.

use crate::json_file;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One question/answer pair from the knowledge file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("Failed to seed FAQ file {path}: {source}")]
    Seed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read FAQ file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("FAQ file {path} is not a list of question/answer pairs: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The entries written to a fresh FAQ file.
pub fn default_faq() -> Vec<FaqEntry> {
    vec![
        FaqEntry::new(
            "What products do you offer?",
            "Lumen Bank provides savings accounts, current accounts, credit cards, personal loans, home loans, business loans, insurance, and investment solutions.",
        ),
        FaqEntry::new(
            "What is the interest rate for a personal loan?",
            "Interest rates vary depending on your profile and eligibility. I can check with our senior banking advisor and email you the exact rate for your case.",
        ),
        FaqEntry::new(
            "Do you offer any free services?",
            "Yes! We offer free net banking, mobile banking, instant payments, account statements, and financial literacy resources on our website. Some products also have zero-fee options depending on eligibility.",
        ),
        FaqEntry::new(
            "Do you provide financial or business consulting?",
            "Absolutely. Lumen Bank offers advisory services for individuals and businesses, including investment planning, business banking solutions, and merchant services. Pricing and eligibility depend on your requirements.",
        ),
    ]
}

/// Loads the FAQ file, writing the default entries first if it does not exist.
pub fn load_or_seed(path: &Path) -> Result<Vec<FaqEntry>, KnowledgeError> {
    if !path.exists() {
        let bytes = json_file::to_pretty_bytes(&default_faq()).map_err(|e| {
            KnowledgeError::Seed {
                path: path.to_path_buf(),
                source: std::io::Error::other(e),
            }
        })?;
        std::fs::write(path, bytes).map_err(|source| KnowledgeError::Seed {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Seeded FAQ file with default entries");
    }

    let raw = std::fs::read_to_string(path).map_err(|source| KnowledgeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| KnowledgeError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Renders the FAQ as a single compact JSON string for the persona prompt.
pub fn faq_prompt_text(entries: &[FaqEntry]) -> String {
    serde_json::to_string(entries).unwrap_or_default()
}

/// Loads (seeding if needed) and renders the FAQ in one step.
///
/// Any failure is logged and yields no entries and an empty string, so the
/// agent runs without FAQ content instead of refusing to start.
pub fn load_prompt_text(path: &Path) -> (Vec<FaqEntry>, String) {
    match load_or_seed(path) {
        Ok(entries) => {
            let text = faq_prompt_text(&entries);
            (entries, text)
        }
        Err(e) => {
            warn!(error = %e, "Error loading FAQ, continuing without it");
            (Vec::new(), String::new())
        }
    }
}

/// Reply used when nothing in the FAQ matches a lookup.
pub const NO_FAQ_MATCH: &str = "That isn't covered in the FAQ. Tell the customer you'll check with a senior advisor and email them the details.";

/// Filler words that say nothing about which entry a question is after.
const STOP_WORDS: &[&str] = &[
    "about", "and", "any", "are", "can", "could", "does", "for", "from", "get", "has", "have",
    "how", "know", "need", "our", "please", "tell", "that", "the", "there", "this", "was",
    "what", "what's", "when", "where", "which", "who", "why", "will", "with", "would", "you",
    "your",
];

/// Lowercased words of three or more characters, minus stop words.
fn terms(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| w.chars().count() >= 3 && !STOP_WORDS.contains(&w.as_str()))
        .collect()
}

/// Fuzzy lookup over FAQ entries.
pub struct FaqIndex {
    entries: Vec<FaqEntry>,
    questions: Vec<Vec<String>>,
    matcher: SkimMatcherV2,
}

impl FaqIndex {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        let questions = entries.iter().map(|e| terms(&e.question)).collect();
        Self {
            entries,
            questions,
            matcher: SkimMatcherV2::default(),
        }
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    /// Scores `pattern` against `choice` when the two words are close: the
    /// match may skip at most one character and must cover three quarters of
    /// `choice`. Catches plurals and small typos, rejects scattered hits.
    fn word_score(&self, choice: &str, pattern: &str) -> Option<i64> {
        let (choice_len, pattern_len) = (choice.chars().count(), pattern.chars().count());
        if pattern_len * 4 < choice_len * 3 {
            return None;
        }
        let (score, indices) = self.matcher.fuzzy_indices(choice, pattern)?;
        let span = indices.last()? - indices.first()? + 1;
        (span <= pattern_len + 1).then_some(score)
    }

    /// Best score for one query word against an entry's question terms,
    /// trying both directions so "loans" finds "loan" and "intrest" finds
    /// "interest".
    fn term_score(&self, question: &[String], word: &str) -> Option<i64> {
        question
            .iter()
            .filter_map(|term| {
                self.word_score(term, word)
                    .into_iter()
                    .chain(self.word_score(word, term))
                    .max()
            })
            .max()
    }

    /// Ranks entries against a free-form question.
    ///
    /// Query words are matched against each entry's question only; stop
    /// words and words shorter than three characters are ignored. An entry's
    /// score is the sum over the query words it matches, entries matching
    /// none are dropped, and ties keep file order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&FaqEntry> {
        let words = terms(query);
        if words.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(i64, usize)> = self
            .questions
            .iter()
            .enumerate()
            .filter_map(|(idx, question)| {
                let hits: Vec<i64> = words
                    .iter()
                    .filter_map(|w| self.term_score(question, w))
                    .collect();
                (!hits.is_empty()).then(|| (hits.iter().sum::<i64>(), idx))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        scored
            .into_iter()
            .take(limit)
            .map(|(_, idx)| &self.entries[idx])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_seeded_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store_faq.json");

        let entries = load_or_seed(&path).expect("seeding should succeed");

        assert!(path.exists());
        assert_eq!(entries, default_faq());
        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert!(on_disk.starts_with("[\n    {"));
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store_faq.json");
        std::fs::write(&path, r#"[{"question": "Q?", "answer": "A."}]"#).unwrap();

        let entries = load_or_seed(&path).unwrap();

        assert_eq!(entries, vec![FaqEntry::new("Q?", "A.")]);
    }

    #[test]
    fn test_corrupt_file_yields_empty_prompt_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store_faq.json");
        std::fs::write(&path, "not json at all").unwrap();

        assert!(matches!(
            load_or_seed(&path),
            Err(KnowledgeError::Parse { .. })
        ));
        let (entries, text) = load_prompt_text(&path);
        assert!(entries.is_empty());
        assert_eq!(text, "");
    }

    #[test]
    fn test_prompt_text_is_compact_json() {
        let text = faq_prompt_text(&[FaqEntry::new("Q?", "A.")]);
        assert_eq!(text, r#"[{"question":"Q?","answer":"A."}]"#);
    }

    #[test]
    fn test_search_ranks_relevant_entry_first() {
        let index = FaqIndex::new(default_faq());

        let hits = index.search("what's the interest rate on a personal loan", 2);

        assert!(!hits.is_empty());
        assert_eq!(
            hits[0].question,
            "What is the interest rate for a personal loan?"
        );
    }

    #[test]
    fn test_search_with_only_short_words_returns_nothing() {
        let index = FaqIndex::new(default_faq());
        assert!(index.search("a an of", 3).is_empty());
        assert!(index.search("   ", 3).is_empty());
    }

    #[test]
    fn test_off_topic_questions_find_nothing() {
        let index = FaqIndex::new(default_faq());
        assert!(index.search("Can you deliver a pizza tonight?", 2).is_empty());
        assert!(index.search("What is the weather in Paris?", 2).is_empty());
        assert!(index.search("how are you doing", 2).is_empty());
    }

    #[test]
    fn test_search_tolerates_plurals_and_typos() {
        let index = FaqIndex::new(default_faq());

        let hits = index.search("intrest rate", 1);
        assert_eq!(
            hits[0].question,
            "What is the interest rate for a personal loan?"
        );

        let hits = index.search("any loans?", 2);
        assert_eq!(
            hits[0].question,
            "What is the interest rate for a personal loan?"
        );
    }

    #[test]
    fn test_search_respects_limit() {
        let index = FaqIndex::new(default_faq());
        assert!(index.search("bank loans services", 1).len() <= 1);
    }
}
