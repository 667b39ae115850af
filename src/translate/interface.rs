use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Longest language tag accepted at the API boundary
pub const MAX_LANG_TAG_LEN: usize = 8;

/// Inbound translation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

fn default_source_lang() -> String {
    "en".to_string()
}

fn default_target_lang() -> String {
    "vi".to_string()
}

impl TranslationRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.text.is_empty() {
            return Err(AppError::Validation("text must not be empty".to_string()));
        }
        for (field, tag) in [("source_lang", &self.source_lang), ("target_lang", &self.target_lang)] {
            if tag.chars().count() > MAX_LANG_TAG_LEN {
                return Err(AppError::Validation(format!(
                    "{} must be at most {} characters",
                    field, MAX_LANG_TAG_LEN
                )));
            }
        }
        Ok(())
    }
}

/// Response returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub translated_text: String,
    pub model_id: String,
}

/// A translation backend the HTTP layer forwards requests to
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Identifier of the model requests are sent to
    fn model_id(&self) -> &str;

    /// Translate a validated request, making a single attempt
    async fn translate(&self, request: &TranslationRequest) -> AppResult<String>;
}
