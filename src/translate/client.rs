use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

use crate::config::TranslationConfig;
use crate::error::{AppError, AppResult};
use super::extractor::extract_translation;
use super::interface::{TranslationBackend, TranslationRequest};
use super::normalizer::{normalize, ModelPayload};

const FALLBACK_ERROR_DETAIL: &str = "HuggingFace returned an error";

/// Body sent to the HuggingFace inference endpoint
#[derive(Debug, Serialize)]
pub struct InferenceRequest {
    pub inputs: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, String>,
}

impl From<ModelPayload> for InferenceRequest {
    fn from(payload: ModelPayload) -> Self {
        Self {
            inputs: payload.input_text,
            parameters: payload.parameters,
        }
    }
}

/// Client for the HuggingFace hosted inference router
#[derive(Debug, Clone)]
pub struct HuggingFaceClient {
    client: Client,
    api_url: String,
    model_id: String,
    api_token: Option<String>,
}

impl HuggingFaceClient {
    pub fn new(config: &TranslationConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout()?)
            .connect_timeout(config.connect_timeout()?)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url(),
            model_id: config.model_id.clone(),
            api_token: config
                .api_token
                .clone()
                .filter(|token| !token.trim().is_empty()),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn build_request(&self, request: &TranslationRequest) -> InferenceRequest {
        let payload = normalize(
            &self.model_id,
            &request.text,
            &request.source_lang,
            &request.target_lang,
        );
        debug!(
            "Normalized payload for {}: {} parameter(s)",
            self.model_id,
            payload.parameters.len()
        );
        payload.into()
    }
}

#[async_trait]
impl TranslationBackend for HuggingFaceClient {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn translate(&self, request: &TranslationRequest) -> AppResult<String> {
        let token = self.api_token.as_deref().ok_or(AppError::MissingToken)?;
        let body = self.build_request(request);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(token)
            .header(header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach {}: {}", self.api_url, e);
                AppError::Unreachable(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = extract_error_detail(&text);
            warn!("HuggingFace returned {}: {}", status, detail);
            return Err(AppError::Upstream {
                status: status.as_u16(),
                detail,
            });
        }

        let data: serde_json::Value = response.json().await.map_err(|e| {
            warn!("Failed to decode HuggingFace response: {}", e);
            AppError::InvalidResponse
        })?;

        extract_translation(&data).ok_or_else(|| {
            warn!("No translation text in HuggingFace response: {}", data);
            AppError::MissingTranslation
        })
    }
}

/// Pull a readable message out of an error response body
pub fn extract_error_detail(body: &str) -> String {
    let payload: serde_json::Value = match serde_json::from_str(body) {
        Ok(payload) => payload,
        Err(_) if body.is_empty() => return FALLBACK_ERROR_DETAIL.to_string(),
        Err(_) => return body.to_string(),
    };

    match payload.as_object() {
        Some(map) => ["error", "message"]
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(|value| match value {
                serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
                serde_json::Value::String(_) | serde_json::Value::Null => None,
                other => Some(other.to_string()),
            })
            .unwrap_or_else(|| payload.to_string()),
        None => payload.to_string(),
    }
}
