pub mod listener;
#[cfg(feature = "microphone")]
pub mod microphone;
pub mod source;

pub use listener::*;
pub use source::*;

use std::sync::Arc;

use crate::config::VoiceConfig;

/// Pick the voice source once, at startup
pub fn select_voice_source(config: &VoiceConfig) -> Arc<dyn VoiceSource> {
    if !config.enabled {
        return Arc::new(NoInputDevice::new("voice capture disabled in config"));
    }

    #[cfg(feature = "microphone")]
    {
        use crate::vad::UtteranceSettings;
        match microphone::Microphone::probe(UtteranceSettings::from(config)) {
            Ok(mic) => Arc::new(mic),
            Err(e) => Arc::new(NoInputDevice::new(e.to_string())),
        }
    }

    #[cfg(not(feature = "microphone"))]
    {
        Arc::new(NoInputDevice::new("built without the `microphone` feature"))
    }
}
