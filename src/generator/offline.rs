use async_trait::async_trait;

use crate::generator::schema::{CodeSnippet, GeneratedContent, QuizQuestion};
use crate::generator::{ContentService, GenerationError, Prompt, ResponseFormat};

/// Canned responses for running without an API key.
pub struct OfflineService;

impl OfflineService {
    pub fn new() -> Self {
        Self
    }

    /// The lesson every JSON prompt receives.
    pub fn sample_lesson() -> GeneratedContent {
        GeneratedContent {
            grammar: "Use the present simple for facts about your setup: \
                      \"The project uses Python 3.12.\" Use \"is/are\" to describe state: \
                      \"The virtual environment is active.\""
                .to_string(),
            vocabulary: vec![
                "environment".to_string(),
                "dependency".to_string(),
                "install".to_string(),
                "configure".to_string(),
                "path".to_string(),
                "version".to_string(),
            ],
            reading_passage: "Every morning, Ana opens her terminal. Her project depends on \
                              three packages, and the README explains how to install them. \
                              When a new teammate joins, Ana shares the same steps."
                .to_string(),
            code_snippet: CodeSnippet {
                language: "python".to_string(),
                code: "# The config file is in the project root.\n\
                       import json\n\n\
                       with open(\"config.json\") as f:\n    \
                       settings = json.load(f)  # settings is a dict\n\
                       print(settings[\"version\"])"
                    .to_string(),
                explanation: "The comments describe facts with the present simple."
                    .to_string(),
            },
            quiz: vec![
                QuizQuestion {
                    question: "Which sentence describes the setup correctly?".to_string(),
                    options: vec![
                        "The server are running.".to_string(),
                        "The server is running.".to_string(),
                        "The server be running.".to_string(),
                    ],
                    correct_answer: 1,
                    explanation: "\"Server\" is singular, so it takes \"is\".".to_string(),
                },
                QuizQuestion {
                    question: "Choose the present simple form.".to_string(),
                    options: vec![
                        "The script install the packages.".to_string(),
                        "The script installing the packages.".to_string(),
                        "The script installs the packages.".to_string(),
                    ],
                    correct_answer: 2,
                    explanation: "Third person singular adds -s.".to_string(),
                },
                QuizQuestion {
                    question: "What is a \"dependency\"?".to_string(),
                    options: vec![
                        "A package your code needs".to_string(),
                        "A syntax error".to_string(),
                        "A type of loop".to_string(),
                    ],
                    correct_answer: 0,
                    explanation: "Your project depends on it to run.".to_string(),
                },
            ],
        }
    }
}

impl Default for OfflineService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentService for OfflineService {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, GenerationError> {
        match prompt.format {
            ResponseFormat::Json => serde_json::to_string(&Self::sample_lesson())
                .map_err(|e| GenerationError::Transport(e.to_string())),
            ResponseFormat::Text => Ok("Good work! You described your setup with clear \
                                        present simple sentences. Next time, try to add one \
                                        more detail about each dependency."
                .to_string()),
        }
    }
}
