use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::error::AppResult;
use crate::state::AppState;
use crate::translate::{TranslationRequest, TranslationResponse};

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.translator.model_id()
    }))
}

pub async fn translate(
    State(state): State<AppState>,
    Json(payload): Json<TranslationRequest>,
) -> AppResult<Json<TranslationResponse>> {
    payload.validate()?;

    let span = info_span!("translate", request_id = %Uuid::new_v4());
    async move {
        info!(
            "Translating {} chars {} -> {}",
            payload.text.chars().count(),
            payload.source_lang,
            payload.target_lang
        );
        let translated_text = state.translator.translate(&payload).await?;
        Ok(Json(TranslationResponse {
            translated_text,
            model_id: state.translator.model_id().to_string(),
        }))
    }
    .instrument(span)
    .await
}
