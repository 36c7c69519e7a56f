/// Generative-AI provider abstraction
///
/// The recommendation endpoint only needs "prompt in, text out"; everything
/// model-specific (endpoint shape, response envelope, API key plumbing)
/// lives behind this trait so the route layer can be tested with a stub.
use crate::error::AppResult;

pub mod gemini;

pub use gemini::GeminiProvider;

/// Trait for text-completion providers
///
/// Implementations return the model's raw text output; parsing it as JSON is
/// the caller's concern, since a parse failure must surface as an
/// application error rather than a transport error.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Sends a prompt and returns the model's text output
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}
