use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::Config;
use crate::generator::{ContentService, GenerationError, Prompt, ResponseFormat};

const SYSTEM_INSTRUCTION: &str = "You are a professional ESL coach for developers. Help them \
transition from A2 to B1 English by focusing on technical communication and clear sentence \
structures.";

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiService {
    client: Client,
    api_base: String,
    model: String,
    api_key: String,
}

impl GeminiService {
    pub fn from_config(config: &Config) -> Result<Self, GenerationError> {
        let api_key = config.api_key().ok_or_else(|| {
            GenerationError::NotConfigured(format!("no API key in ${}", config.api_key_env))
        })?;
        let client = Client::builder().build().map_err(|e| {
            GenerationError::NotConfigured(format!("could not build HTTP client: {e}"))
        })?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }

    fn build_request(prompt: &Prompt) -> Value {
        let mut body = json!({
            "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
            "contents": [{ "role": "user", "parts": [{ "text": prompt.text }] }],
        });
        if prompt.format == ResponseFormat::Json {
            body["generationConfig"] = json!({
                "responseMimeType": "application/json",
                "responseSchema": lesson_schema(),
            });
        }
        body
    }
}

#[async_trait]
impl ContentService for GeminiService {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String, GenerationError> {
        let url = self.endpoint();
        tracing::debug!(url = %url, model = %self.model, format = ?prompt.format, "Sending generation request");

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::build_request(prompt))
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            tracing::error!(status = %status, error = %message, "Generation API error");
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;
        tracing::debug!(
            latency_ms = start.elapsed().as_millis() as u64,
            "Generation request finished"
        );

        body.text().ok_or(GenerationError::EmptyResponse)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if it has any.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

fn lesson_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "grammar": { "type": "STRING" },
            "vocabulary": { "type": "ARRAY", "items": { "type": "STRING" } },
            "readingPassage": { "type": "STRING" },
            "codeSnippet": {
                "type": "OBJECT",
                "properties": {
                    "language": { "type": "STRING" },
                    "code": { "type": "STRING" },
                    "explanation": { "type": "STRING" }
                },
                "required": ["language", "code", "explanation"]
            },
            "quiz": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING" },
                        "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "correctAnswer": { "type": "INTEGER" },
                        "explanation": { "type": "STRING" }
                    },
                    "required": ["question", "options", "correctAnswer", "explanation"]
                }
            }
        },
        "required": ["grammar", "vocabulary", "readingPassage", "codeSnippet", "quiz"]
    })
}
