#[cfg(feature = "network")]
pub mod gemini;
pub mod offline;
pub mod prompt;
pub mod schema;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::Config;

pub use prompt::{Prompt, ResponseFormat};
pub use schema::{CodeSnippet, ContentError, GeneratedContent, QuizQuestion};

/// Failures at the boundary with the text-generation backend.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("could not reach the generation service: {0}")]
    Transport(String),

    #[error("generation timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("generation service returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("generation service returned no text")]
    EmptyResponse,

    #[error("generation service is not configured: {0}")]
    NotConfigured(String),
}

/// External text generator: takes a natural-language prompt, returns raw text.
///
/// Lesson prompts expect a JSON document back, summary prompts plain text.
/// Implementations never parse the response; that happens in [`schema`].
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn generate(&self, prompt: &Prompt) -> Result<String, GenerationError>;
}

/// Pick the live service when it is enabled and has a key, otherwise the
/// offline one.
pub fn service_from_config(config: &Config) -> Arc<dyn ContentService> {
    if config.offline {
        tracing::info!("offline mode requested; using canned lessons");
        return Arc::new(offline::OfflineService::new());
    }
    #[cfg(feature = "network")]
    {
        match gemini::GeminiService::from_config(config) {
            Ok(service) => {
                tracing::info!(model = %config.model, "using live lesson generation");
                return Arc::new(service);
            }
            Err(err) => tracing::warn!("{err}; falling back to canned lessons"),
        }
    }
    #[cfg(not(feature = "network"))]
    tracing::warn!("built without network support; using canned lessons");
    Arc::new(offline::OfflineService::new())
}
