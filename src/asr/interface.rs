/// ASR interface - audio in, transcript out

use async_trait::async_trait;

use crate::error::RecognitionError;

/// One captured utterance: mono 16-bit PCM
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedAudio {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

impl CapturedAudio {
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

#[async_trait]
pub trait ASRInterface: Send + Sync {
    /// Transcribe one utterance.
    ///
    /// Returns `RecognitionError::UnknownValue` when the service found no
    /// speech, `RecognitionError::Request` when it could not be asked.
    async fn transcribe(&self, audio: &CapturedAudio) -> Result<String, RecognitionError>;
}
