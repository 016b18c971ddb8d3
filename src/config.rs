use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub llm_config: LLMConfig,
    #[serde(default)]
    pub asr_config: ASRConfig,
    #[serde(default)]
    pub voice_config: VoiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Completion service used by the debug relay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    #[serde(default = "default_llm_provider")]
    pub llm_provider: String,

    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub llm_api_key: String,

    #[serde(default = "default_llm_model")]
    pub model: String,

    pub organization_id: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// No timeout unless set
    pub request_timeout_secs: Option<u64>,
}

fn default_llm_provider() -> String {
    "openai_llm".to_string()
}

fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt-4".to_string()
}

fn default_temperature() -> f32 {
    1.0
}

fn default_max_tokens() -> u32 {
    1024
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            llm_provider: default_llm_provider(),
            base_url: default_llm_base_url(),
            llm_api_key: String::new(),
            model: default_llm_model(),
            organization_id: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            request_timeout_secs: None,
        }
    }
}

/// Speech-to-text service used by the voice command listener
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ASRConfig {
    #[serde(default = "default_asr_model")]
    pub asr_model: String,

    /// Falls back to the provider's public endpoint when unset
    pub base_url: Option<String>,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_whisper_model")]
    pub model: String,

    pub language: Option<String>,

    pub request_timeout_secs: Option<u64>,
}

fn default_asr_model() -> String {
    "openai_whisper".to_string()
}

fn default_whisper_model() -> String {
    "whisper-1".to_string()
}

impl Default for ASRConfig {
    fn default() -> Self {
        Self {
            asr_model: default_asr_model(),
            base_url: None,
            api_key: String::new(),
            model: default_whisper_model(),
            language: None,
            request_timeout_secs: None,
        }
    }
}

/// Microphone capture and end-of-utterance settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Minimum RMS (16-bit scale) for a block to count as speech
    #[serde(default = "default_energy_threshold")]
    pub energy_threshold: f32,

    /// Seconds of silence that end a phrase
    #[serde(default = "default_pause_threshold")]
    pub pause_threshold: f32,

    /// Minimum seconds of speech before a phrase is accepted
    #[serde(default = "default_phrase_threshold")]
    pub phrase_threshold: f32,

    /// Seconds of non-speech kept on both sides of the phrase
    #[serde(default = "default_non_speaking_duration")]
    pub non_speaking_duration: f32,

    pub phrase_time_limit_secs: Option<f32>,
}

fn default_true() -> bool {
    true
}

fn default_energy_threshold() -> f32 {
    300.0
}

fn default_pause_threshold() -> f32 {
    0.8
}

fn default_phrase_threshold() -> f32 {
    0.3
}

fn default_non_speaking_duration() -> f32 {
    0.5
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            energy_threshold: default_energy_threshold(),
            pause_threshold: default_pause_threshold(),
            phrase_threshold: default_phrase_threshold(),
            non_speaking_duration: default_non_speaking_duration(),
            phrase_time_limit_secs: None,
        }
    }
}

/// Optional error tracking, driven by `SENTRY_ENABLED` / `SENTRY_DSN`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorTrackingConfig {
    pub enabled: bool,
    pub dsn: Option<String>,
}

impl ErrorTrackingConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("SENTRY_ENABLED").ok().as_deref(),
            std::env::var("SENTRY_DSN").ok(),
        )
    }

    pub fn from_values(enabled: Option<&str>, dsn: Option<String>) -> Self {
        Self {
            enabled: enabled
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            dsn: dsn.filter(|d| !d.trim().is_empty()),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        let content = substitute_env_vars(strip_bom(&raw), |name| std::env::var(name).ok());

        let path_lower = path.to_lowercase();
        if path_lower.ends_with(".json") || path_lower.ends_with(".jsonld") {
            Ok(serde_json::from_str(&content)?)
        } else if content.trim().is_empty() {
            Ok(Config::default())
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }

    /// Load the first config file that exists, or fall back to defaults
    pub fn discover(candidates: &[String]) -> Result<(Self, Option<String>)> {
        for path in candidates {
            if Path::new(path).exists() {
                let config = Config::load(path)?;
                return Ok((config, Some(path.clone())));
            }
            tracing::debug!("No config at {}", path);
        }
        Ok((Config::default(), None))
    }
}

/// Config locations, most specific first
pub fn default_config_paths() -> Vec<String> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()));

    vec![
        std::env::var("CONFIG_PATH").ok(),
        Some("conf.yaml".to_string()),
        Some("conf.json".to_string()),
        exe_dir
            .as_ref()
            .and_then(|dir| dir.join("conf.yaml").to_str().map(str::to_string)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

/// Replace `${VAR_NAME}` placeholders; unknown variables are left as-is
pub fn substitute_env_vars<F>(content: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let pattern = Regex::new(r"\$\{(\w+)\}").expect("static pattern");
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
