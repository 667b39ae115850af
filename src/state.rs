use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::translate::{HuggingFaceClient, TranslationBackend};

#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<dyn TranslationBackend>,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = HuggingFaceClient::new(&config.translation)?;
        info!("Forwarding translations to {}", client.api_url());
        Ok(Self::with_translator(Arc::new(client)))
    }

    pub fn with_translator(translator: Arc<dyn TranslationBackend>) -> Self {
        Self { translator }
    }
}
