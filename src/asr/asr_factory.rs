use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::interface::ASRInterface;
use super::whisper_api::WhisperApiASR;
use crate::config::ASRConfig;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub struct ASRFactory;

impl ASRFactory {
    pub fn get_asr_system(config: &ASRConfig) -> Result<Arc<dyn ASRInterface>> {
        info!("Initializing ASR: {}", config.asr_model);

        let default_url = match config.asr_model.as_str() {
            "openai_whisper" => OPENAI_BASE_URL,
            "groq_whisper" | "groq_whisper_asr" => GROQ_BASE_URL,
            other => anyhow::bail!("Unsupported ASR model: {}", other),
        };

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Arc::new(WhisperApiASR::new(
            builder.build()?,
            config
                .base_url
                .clone()
                .unwrap_or_else(|| default_url.to_string()),
            config.api_key.clone(),
            config.model.clone(),
            config.language.clone(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_model() {
        let config = ASRConfig {
            asr_model: "sherpa_onnx_asr".to_string(),
            ..ASRConfig::default()
        };
        assert!(ASRFactory::get_asr_system(&config).is_err());
    }

    #[test]
    fn builds_groq_whisper() {
        let config = ASRConfig {
            asr_model: "groq_whisper".to_string(),
            model: "whisper-large-v3-turbo".to_string(),
            ..ASRConfig::default()
        };
        assert!(ASRFactory::get_asr_system(&config).is_ok());
    }
}
