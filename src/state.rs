use std::sync::Arc;

use crate::agent::{DebugRelay, StatelessLLMFactory, StatelessLLMInterface};
use crate::asr::{ASRFactory, ASRInterface};
use crate::config::Config;
use crate::voice::{select_voice_source, VoiceCommandListener, VoiceSource};

/// Everything the handlers need, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub debug_relay: DebugRelay,
    pub voice_listener: VoiceCommandListener,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let llm = StatelessLLMFactory::create_llm(&config.llm_config)?;
        let asr = ASRFactory::get_asr_system(&config.asr_config)?;
        let voice = select_voice_source(&config.voice_config);

        Ok(Self::from_parts(llm, asr, voice))
    }

    /// Assemble state from already-built services
    pub fn from_parts(
        llm: Arc<dyn StatelessLLMInterface>,
        asr: Arc<dyn ASRInterface>,
        voice: Arc<dyn VoiceSource>,
    ) -> Self {
        Self {
            debug_relay: DebugRelay::new(llm),
            voice_listener: VoiceCommandListener::new(voice, asr),
        }
    }
}
