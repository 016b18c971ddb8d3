use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use super::source::VoiceSource;
use crate::asr::ASRInterface;
use crate::error::{RecognitionError, VoiceError};

pub const UNKNOWN_VALUE_MESSAGE: &str = "Could not understand audio";
pub const REQUEST_ERROR_MESSAGE: &str = "Could not request results";

/// Outcome of one voice command, as sent to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VoiceResult {
    Command { command: String },
    Error { error: String },
}

impl From<Result<String, RecognitionError>> for VoiceResult {
    fn from(result: Result<String, RecognitionError>) -> Self {
        match result {
            Ok(command) => VoiceResult::Command { command },
            Err(RecognitionError::UnknownValue) => VoiceResult::Error {
                error: UNKNOWN_VALUE_MESSAGE.to_string(),
            },
            Err(RecognitionError::Request(_)) => VoiceResult::Error {
                error: REQUEST_ERROR_MESSAGE.to_string(),
            },
        }
    }
}

#[derive(Clone)]
pub struct VoiceCommandListener {
    source: Arc<dyn VoiceSource>,
    asr: Arc<dyn ASRInterface>,
}

impl VoiceCommandListener {
    pub fn new(source: Arc<dyn VoiceSource>, asr: Arc<dyn ASRInterface>) -> Self {
        Self { source, asr }
    }

    pub fn available(&self) -> bool {
        self.source.available()
    }

    /// Record one utterance and transcribe it.
    ///
    /// Capture problems are errors; recognition problems are reported
    /// in the `VoiceResult`.
    pub async fn listen_for_command(&self) -> Result<VoiceResult, VoiceError> {
        let source = self.source.clone();
        let audio = tokio::task::spawn_blocking(move || source.listen())
            .await
            .map_err(|e| VoiceError::Capture(format!("listen task failed: {}", e)))??;

        let result = self.asr.transcribe(&audio).await;
        match &result {
            Ok(command) => info!("Command Recognized: {}", command),
            Err(RecognitionError::UnknownValue) => info!("Could not understand audio"),
            Err(RecognitionError::Request(e)) => warn!("Could not request results: {}", e),
        }
        Ok(VoiceResult::from(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asr::CapturedAudio;
    use crate::voice::NoInputDevice;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSource;

    impl VoiceSource for FixedSource {
        fn available(&self) -> bool {
            true
        }

        fn listen(&self) -> Result<CapturedAudio, VoiceError> {
            Ok(CapturedAudio {
                samples: vec![0; 160],
                sample_rate: 16000,
            })
        }
    }

    struct CountingASR {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ASRInterface for CountingASR {
        async fn transcribe(&self, _audio: &CapturedAudio) -> Result<String, RecognitionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("lights on".to_string())
        }
    }

    #[test]
    fn results_serialize_to_single_key_objects() {
        let ok = VoiceResult::Command {
            command: "deploy".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            serde_json::json!({"command": "deploy"})
        );

        let err = VoiceResult::from(Err(RecognitionError::Request("dns".into())));
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({"error": "Could not request results"})
        );
    }

    #[tokio::test]
    async fn transcribes_captured_audio() {
        let asr = Arc::new(CountingASR {
            calls: AtomicUsize::new(0),
        });
        let listener = VoiceCommandListener::new(Arc::new(FixedSource), asr.clone());

        let result = listener.listen_for_command().await.unwrap();
        assert_eq!(
            result,
            VoiceResult::Command {
                command: "lights on".to_string()
            }
        );
        assert_eq!(asr.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_device_skips_recognition() {
        let asr = Arc::new(CountingASR {
            calls: AtomicUsize::new(0),
        });
        let listener =
            VoiceCommandListener::new(Arc::new(NoInputDevice::new("test")), asr.clone());

        assert!(!listener.available());
        assert!(matches!(
            listener.listen_for_command().await,
            Err(VoiceError::AudioUnavailable)
        ));
        assert_eq!(asr.calls.load(Ordering::SeqCst), 0);
    }
}
