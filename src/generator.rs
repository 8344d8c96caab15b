//! Generation invoker: wires the prompt builder, the key pool, and a text
//! provider into one call per request. Every generation-time failure is
//! absorbed into a textual fallback, so callers always get a result back;
//! only pre-call validation rejects a request outright.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::keys::KeyPool;
use crate::post::normalize_markup;
use crate::prompts;
use crate::providers::{GenerationConfig, TextProvider};
use crate::request::GenerationRequest;

/// The text produced for one request. On success `normalized_text` is the
/// display form of `raw_text`; on a fallback both carry the same message.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub raw_text: String,
    pub normalized_text: String,
}

/// Failure categories recognized from provider error messages. Quota and
/// credential failures force an extra rotation so the next request starts
/// past the failing key; the others leave the rotation alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Quota,
    ContentFiltered,
    Timeout,
    BadCredential,
    Unknown,
}

impl FailureKind {
    /// Ordered, case-insensitive substring match over the provider message.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("quota") {
            FailureKind::Quota
        } else if lower.contains("content filtered") {
            FailureKind::ContentFiltered
        } else if lower.contains("timeout") {
            FailureKind::Timeout
        } else if lower.contains("invalid") || lower.contains("unauthorized") {
            FailureKind::BadCredential
        } else {
            FailureKind::Unknown
        }
    }

    fn forces_rotation(self) -> bool {
        matches!(self, FailureKind::Quota | FailureKind::BadCredential)
    }
}

pub struct Generator {
    provider: Arc<dyn TextProvider>,
    keys: Arc<KeyPool>,
}

impl Generator {
    pub fn new(provider: Arc<dyn TextProvider>, keys: Arc<KeyPool>) -> Self {
        Self { provider, keys }
    }

    /// One attempt per request: compose the prompt, rotate to a credential,
    /// call the provider, normalize the output. No retries, no cancellation;
    /// timeouts belong to the provider's own HTTP client.
    pub async fn generate(&self, req: &GenerationRequest) -> GenerationResult {
        let prompt = prompts::compose(req);
        let cfg = GenerationConfig::for_request(req.content_type, req.length);
        let selected = self.keys.select_next();

        let Some(api_key) = selected.value.as_deref() else {
            warn!(key = %selected.name, "no credential available for generation");
            self.keys.record_error(selected.index);
            self.keys.advance();
            return self.fallback(FailureKind::BadCredential, req);
        };

        match self.provider.generate(&prompt, api_key, &cfg).await {
            Ok(raw_text) => {
                info!(
                    provider = self.provider.name(),
                    key = %selected.name,
                    chars = raw_text.len(),
                    "generation complete"
                );
                let normalized_text = normalize_markup(&raw_text);
                GenerationResult {
                    raw_text,
                    normalized_text,
                }
            }
            Err(err) => {
                let kind = FailureKind::classify(&err.0);
                error!(
                    provider = self.provider.name(),
                    key = %selected.name,
                    kind = ?kind,
                    "generation failed: {err}"
                );
                self.keys.record_error(selected.index);
                if kind.forces_rotation() {
                    self.keys.advance();
                }
                self.fallback(kind, req)
            }
        }
    }

    /// Fallback messages skip normalization, matching how the original
    /// returned its apology text untouched.
    fn fallback(&self, kind: FailureKind, req: &GenerationRequest) -> GenerationResult {
        let body = match kind {
            FailureKind::Quota => {
                "API quota exceeded. The system will automatically try a different \
                 API key on your next request. Please try again."
                    .to_string()
            }
            FailureKind::ContentFiltered => {
                "The requested content couldn't be generated due to content safety \
                 filters. Please try a different prompt or adjust your parameters."
                    .to_string()
            }
            FailureKind::Timeout => {
                "The request timed out. This might happen for very long content. \
                 Please try with a shorter length or simplify your prompt."
                    .to_string()
            }
            FailureKind::BadCredential => {
                "There was an issue with the API key. The system will automatically \
                 try a different API key on your next request. Please try again."
                    .to_string()
            }
            FailureKind::Unknown => format!(
                "I apologize, but I couldn't generate the {} you requested.",
                req.content_type
            ),
        };
        let text = format!(
            "{body} (Type: {}, Genre: {}, Mood: {}, Length: {})",
            req.content_type, req.genre, req.mood, req.length
        );
        GenerationResult {
            raw_text: text.clone(),
            normalized_text: text,
        }
    }
}
