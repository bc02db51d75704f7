//! Question catalogue loading
//!
//! The catalogue is a JSON document listing the yes/no questions in both
//! display languages plus the localized option labels. It is loaded once at
//! startup and treated as immutable for the life of the process.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

/// Default catalogue shipped in the binary, used when the root folder has
/// no `questions.json`
const DEFAULT_CATALOG_JSON: &str = include_str!("../data/questions.json");

static DEFAULT_CATALOG: Lazy<QuestionCatalog> = Lazy::new(|| {
    QuestionCatalog::from_json(DEFAULT_CATALOG_JSON).expect("embedded catalogue is valid")
});

/// One survey question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Positive, unique, stable across the dataset's lifetime
    pub id: u32,
    #[serde(rename = "textRu")]
    pub text_ru: String,
    #[serde(rename = "textEn")]
    pub text_en: String,
    /// UI-only hint; the server accepts partial answer sets
    #[serde(default)]
    pub required: bool,
}

impl Question {
    /// Answer-map key for this question
    pub fn key(&self) -> String {
        format!("question_{}", self.id)
    }
}

/// Localized yes/no option labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOptions {
    #[serde(rename = "yesRu")]
    pub yes_ru: String,
    #[serde(rename = "yesEn")]
    pub yes_en: String,
    #[serde(rename = "noRu")]
    pub no_ru: String,
    #[serde(rename = "noEn")]
    pub no_en: String,
}

/// Full question catalogue document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCatalog {
    pub questions: Vec<Question>,
    pub options: AnswerOptions,
}

impl QuestionCatalog {
    /// Parse and validate a catalogue document
    pub fn from_json(text: &str) -> Result<Self> {
        let catalog: QuestionCatalog = serde_json::from_str(text)?;
        catalog.check()?;
        Ok(catalog)
    }

    /// Load the catalogue from `<root>/questions.json`, falling back to the
    /// embedded default when the file does not exist
    pub fn load(root_folder: &Path) -> Result<Self> {
        let path = root_folder.join("questions.json");
        if path.exists() {
            let text = std::fs::read_to_string(&path)?;
            Self::from_json(&text)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
        } else {
            warn!(
                "No catalogue at {}, using embedded default ({} questions)",
                path.display(),
                DEFAULT_CATALOG.questions.len()
            );
            Ok(Self::embedded_default().clone())
        }
    }

    /// The catalogue compiled into the binary
    pub fn embedded_default() -> &'static QuestionCatalog {
        &DEFAULT_CATALOG
    }

    /// Whether `key` names a catalogued question (`question_<id>`)
    pub fn contains_key(&self, key: &str) -> bool {
        self.questions.iter().any(|q| q.key() == key)
    }

    fn check(&self) -> Result<()> {
        if self.questions.is_empty() {
            return Err(Error::InvalidInput("catalogue has no questions".into()));
        }
        let mut seen = HashSet::new();
        for question in &self.questions {
            if question.id == 0 {
                return Err(Error::InvalidInput(
                    "question ids must be positive".into(),
                ));
            }
            if !seen.insert(question.id) {
                return Err(Error::InvalidInput(format!(
                    "duplicate question id {}",
                    question.id
                )));
            }
        }
        Ok(())
    }
}
