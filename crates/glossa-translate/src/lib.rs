pub mod gemini;
pub mod parse;

pub use gemini::GeminiTranslator;
pub use parse::{TranslateRequest, TranslationRecord, parse_model_output};

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate one word, with its context sentence when available, into
    /// the configured target language
    async fn translate(
        &self,
        request: &TranslateRequest,
    ) -> Result<TranslationRecord, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream told us to slow down. Surfaced to the user as its own
    /// condition, never folded into the generic failure.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The provider quota is spent, distinct from being rate limited.
    #[error("Quota exhausted")]
    QuotaExhausted,

    #[error("Authentication error")]
    Auth,

    #[error("Empty response from model")]
    EmptyResponse,
}
