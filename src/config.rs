use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, info};

const DEFAULT_CONFIG_PATH: &str = "conf.yaml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    #[serde(default = "default_model_id")]
    pub model_id: String,
    #[serde(default = "default_router_base_url")]
    pub router_base_url: String,
    #[serde(default, skip_serializing)]
    pub api_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: f64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: f64,
}

fn default_model_id() -> String {
    "Helsinki-NLP/opus-mt-en-vi".to_string()
}

fn default_router_base_url() -> String {
    "https://router.huggingface.co/hf-inference/models".to_string()
}

fn default_timeout_secs() -> f64 {
    20.0
}

fn default_connect_timeout_secs() -> f64 {
    10.0
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            router_base_url: default_router_base_url(),
            api_token: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl TranslationConfig {
    /// Full inference endpoint for the configured model
    pub fn api_url(&self) -> String {
        format!("{}/{}", self.router_base_url.trim_end_matches('/'), self.model_id)
    }

    pub fn timeout(&self) -> Result<Duration> {
        secs_to_duration("timeout_secs", self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Result<Duration> {
        secs_to_duration("connect_timeout_secs", self.connect_timeout_secs)
    }
}

fn secs_to_duration(name: &str, secs: f64) -> Result<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        anyhow::bail!("translation.{} must be a positive number, got {}", name, secs);
    }
    Duration::try_from_secs_f64(secs)
        .with_context(|| format!("translation.{} is out of range, got {}", name, secs))
}

impl Config {
    /// Load configuration: defaults, then an optional YAML file, then the environment.
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            info!("Loaded environment from {}", path.display());
        }

        let explicit_path = std::env::var("CONFIG_PATH").ok();
        let path = explicit_path.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let mut config = if explicit_path.is_some() || Path::new(path).exists() {
            let config = Self::from_file(path)?;
            info!("Loaded configuration from: {}", path);
            config
        } else {
            debug!("No config file at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        Self::from_yaml_str(&content, |key| std::env::var(key).ok())
            .with_context(|| format!("Failed to parse config file {}", path))
    }

    /// Parse YAML, replacing `${VAR}` placeholders through `lookup`
    pub fn from_yaml_str(content: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let content = substitute_env_vars(content, lookup)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Override file values with non-empty values from `lookup`
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(model_id) = get("HF_TRANSLATION_MODEL") {
            self.translation.model_id = model_id;
        }
        if let Some(base_url) = get("HF_ROUTER_BASE_URL") {
            self.translation.router_base_url = base_url;
        }
        if let Some(token) = get("HF_API_TOKEN") {
            self.translation.api_token = Some(token);
        }
        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid number, got {:?}", port))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.translation.model_id.trim().is_empty() {
            anyhow::bail!("translation.model_id must not be empty");
        }
        self.translation.timeout()?;
        self.translation.connect_timeout()?;
        Ok(())
    }
}

/// Replace `${VAR_NAME}` with the looked-up value; unknown variables are left as-is
fn substitute_env_vars(content: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    let pattern = Regex::new(r"\$\{(\w+)\}")?;
    let substituted = pattern.replace_all(content, |caps: &regex::Captures| {
        lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });
    Ok(substituted.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_hosted_inference() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.translation.model_id, "Helsinki-NLP/opus-mt-en-vi");
        assert_eq!(
            config.translation.api_url(),
            "https://router.huggingface.co/hf-inference/models/Helsinki-NLP/opus-mt-en-vi"
        );
        assert_eq!(config.translation.timeout().unwrap(), Duration::from_secs(20));
        assert_eq!(config.translation.connect_timeout().unwrap(), Duration::from_secs(10));
        assert!(config.translation.api_token.is_none());
    }

    #[test]
    fn api_url_strips_trailing_slashes() {
        let translation = TranslationConfig {
            router_base_url: "http://localhost:9000/models//".to_string(),
            model_id: "facebook/nllb-200".to_string(),
            ..TranslationConfig::default()
        };
        assert_eq!(translation.api_url(), "http://localhost:9000/models/facebook/nllb-200");
    }

    #[test]
    fn yaml_keys_are_optional() {
        let config = Config::from_yaml_str("translation:\n  model_id: facebook/mbart-large-50\n", env(&[])).unwrap();
        assert_eq!(config.translation.model_id, "facebook/mbart-large-50");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.translation.timeout_secs, 20.0);
    }

    #[test]
    fn yaml_placeholders_are_substituted() {
        let yaml = "translation:\n  api_token: ${HF_TOKEN}\n  model_id: ${MISSING_VAR}\n";
        let config = Config::from_yaml_str(yaml, env(&[("HF_TOKEN", "hf_secret")])).unwrap();
        assert_eq!(config.translation.api_token.as_deref(), Some("hf_secret"));
        assert_eq!(config.translation.model_id, "${MISSING_VAR}");
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = Config::default();
        config
            .apply_env_overrides(env(&[
                ("HF_TRANSLATION_MODEL", "facebook/nllb-200-distilled-600M"),
                ("HF_API_TOKEN", "hf_abc"),
                ("PORT", "9100"),
                ("HOST", ""),
            ]))
            .unwrap();
        assert_eq!(config.translation.model_id, "facebook/nllb-200-distilled-600M");
        assert_eq!(config.translation.api_token.as_deref(), Some("hf_abc"));
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn invalid_port_is_an_error() {
        let mut config = Config::default();
        assert!(config.apply_env_overrides(env(&[("PORT", "eighty")])).is_err());
    }

    #[test]
    fn non_positive_timeouts_fail_validation() {
        let mut config = Config::default();
        config.translation.timeout_secs = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn huge_timeouts_are_a_startup_error() {
        let mut config = Config::default();
        config.translation.connect_timeout_secs = 1e300;
        assert!(config.validate().is_err());
        assert!(config.translation.connect_timeout().is_err());

        let config = Config::from_yaml_str("translation:\n  timeout_secs: 1e300\n", env(&[])).unwrap();
        assert!(config.validate().is_err());
        assert!(crate::translate::HuggingFaceClient::new(&config.translation).is_err());
    }

    #[test]
    fn api_token_is_never_serialized() {
        let mut config = Config::default();
        config.translation.api_token = Some("hf_secret".to_string());
        let dumped = serde_yaml::to_string(&config).unwrap();
        assert!(!dumped.contains("hf_secret"));
    }
}
