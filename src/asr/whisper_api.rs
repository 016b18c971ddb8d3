use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::interface::{ASRInterface, CapturedAudio};
use crate::error::RecognitionError;
use crate::utils::wav::encode_wav;

/// Speech recognition over an OpenAI-compatible `/audio/transcriptions` API
/// (OpenAI Whisper, Groq Whisper, local whisper servers)
pub struct WhisperApiASR {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

impl WhisperApiASR {
    pub fn new(
        client: Client,
        base_url: String,
        api_key: String,
        model: String,
        language: Option<String>,
    ) -> Self {
        info!("Initialized WhisperApiASR: model={}, base_url={}", model, base_url);
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            language,
        }
    }
}

/// Empty transcripts mean the service heard nothing it could parse
fn transcript_or_unknown(text: &str) -> Result<String, RecognitionError> {
    let text = text.trim();
    if text.is_empty() {
        Err(RecognitionError::UnknownValue)
    } else {
        Ok(text.to_string())
    }
}

#[async_trait]
impl ASRInterface for WhisperApiASR {
    async fn transcribe(&self, audio: &CapturedAudio) -> Result<String, RecognitionError> {
        let wav = encode_wav(audio).map_err(|e| RecognitionError::Request(e.to_string()))?;
        debug!(
            "Submitting {:.2}s of audio ({} bytes) to {}",
            audio.duration_secs(),
            wav.len(),
            self.base_url
        );

        let file = Part::bytes(wav)
            .file_name("speech.wav")
            .mime_str("audio/wav")?;
        let mut form = Form::new()
            .part("file", file)
            .text("model", self.model.clone())
            .text("response_format", "json");
        if let Some(lang) = &self.language {
            form = form.text("language", lang.clone());
        }

        let url = format!("{}/audio/transcriptions", self.base_url);
        let mut request = self.client.post(&url).multipart(form);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecognitionError::Request(format!("{}: {}", status, body)));
        }

        let parsed: TranscriptionResponse = response.json().await?;
        transcript_or_unknown(&parsed.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_transcript_is_unknown_value() {
        assert!(matches!(
            transcript_or_unknown("  \n"),
            Err(RecognitionError::UnknownValue)
        ));
    }

    #[test]
    fn transcript_is_trimmed() {
        assert_eq!(transcript_or_unknown(" open the door ").unwrap(), "open the door");
    }
}
