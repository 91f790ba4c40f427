use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub grammar: String,
    pub vocabulary: Vec<String>,
    pub reading_passage: String,
    pub code_snippet: CodeSnippet,
    pub quiz: Vec<QuizQuestion>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnippet {
    #[serde(default)]
    pub language: String,
    pub code: String,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
}

/// The response text could not be turned into a lesson.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("lesson payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("lesson payload is incomplete: {0}")]
    Invalid(String),
}

impl GeneratedContent {
    /// Parse and validate a raw service response.
    pub fn parse(raw: &str) -> Result<Self, ContentError> {
        let content: GeneratedContent = serde_json::from_str(strip_code_fence(raw))?;
        content.validate()?;
        Ok(content)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.grammar.trim().is_empty() {
            return Err(ContentError::Invalid("grammar is empty".to_string()));
        }
        if self.vocabulary.iter().all(|w| w.trim().is_empty()) {
            return Err(ContentError::Invalid("vocabulary is empty".to_string()));
        }
        if self.code_snippet.code.trim().is_empty() {
            return Err(ContentError::Invalid("code snippet is empty".to_string()));
        }
        for (i, q) in self.quiz.iter().enumerate() {
            if q.options.is_empty() {
                return Err(ContentError::Invalid(format!(
                    "quiz question {} has no options",
                    i + 1
                )));
            }
            if q.correct_answer >= q.options.len() {
                return Err(ContentError::Invalid(format!(
                    "quiz question {} points at option {} of {}",
                    i + 1,
                    q.correct_answer,
                    q.options.len()
                )));
            }
        }
        Ok(())
    }

    /// The first `n` vocabulary words, used to seed the summary prompt.
    pub fn leading_vocabulary(&self, n: usize) -> Vec<&str> {
        self.vocabulary.iter().take(n).map(String::as_str).collect()
    }
}

/// Models sometimes wrap JSON in a markdown fence even when asked not to.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.strip_prefix("json").unwrap_or(rest);
    body.strip_suffix("```").unwrap_or(body).trim()
}
