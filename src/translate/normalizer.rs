use std::collections::BTreeMap;

use super::language_codes::{
    lookup, resolve, MBART_LANGUAGE_CODES, NLLB_LANGUAGE_CODES, OPUS_TARGET_TAGS,
};

/// Model families with their own input conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    Nllb,
    Mbart,
    OpusMt,
    Default,
}

/// Model id markers, checked in order. The first match wins.
const FAMILY_MARKERS: &[(&str, ModelFamily)] = &[
    ("nllb", ModelFamily::Nllb),
    ("mbart", ModelFamily::Mbart),
    ("opus-mt", ModelFamily::OpusMt),
];

impl ModelFamily {
    /// Classify a model id by case-insensitive substring match
    pub fn classify(model_id: &str) -> Self {
        let model_id = model_id.to_lowercase();
        FAMILY_MARKERS
            .iter()
            .find(|(marker, _)| model_id.contains(marker))
            .map(|(_, family)| *family)
            .unwrap_or(ModelFamily::Default)
    }
}

/// Outbound input text plus model-specific parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelPayload {
    pub input_text: String,
    pub parameters: BTreeMap<String, String>,
}

/// Shape the outbound payload for `model_id`.
///
/// Never fails: unmapped language tags are passed through as-is and
/// parameters that resolve to an empty string are dropped.
pub fn normalize(model_id: &str, text: &str, source_lang: &str, target_lang: &str) -> ModelPayload {
    let mut payload = match ModelFamily::classify(model_id) {
        ModelFamily::Nllb => with_lang_params(NLLB_LANGUAGE_CODES, text, source_lang, target_lang),
        ModelFamily::Mbart => with_lang_params(MBART_LANGUAGE_CODES, text, source_lang, target_lang),
        ModelFamily::OpusMt => ModelPayload {
            input_text: match lookup(OPUS_TARGET_TAGS, target_lang) {
                Some(tag) => format!("{tag} {text}").trim().to_string(),
                None => text.to_string(),
            },
            parameters: BTreeMap::new(),
        },
        ModelFamily::Default => ModelPayload {
            input_text: text.to_string(),
            parameters: BTreeMap::new(),
        },
    };

    // The inference API rejects empty-string parameters
    payload.parameters.retain(|_, value| !value.is_empty());
    payload
}

fn with_lang_params(
    table: &'static [(&'static str, &'static str)],
    text: &str,
    source_lang: &str,
    target_lang: &str,
) -> ModelPayload {
    let parameters = BTreeMap::from([
        ("src_lang".to_string(), resolve(table, source_lang).to_string()),
        ("tgt_lang".to_string(), resolve(table, target_lang).to_string()),
    ]);
    ModelPayload {
        input_text: text.to_string(),
        parameters,
    }
}
