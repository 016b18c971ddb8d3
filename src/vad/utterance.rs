//! Energy-based end-of-utterance detection.
//!
//! Audio arrives in blocks of mono `f32` samples. A block whose RMS (on the
//! 16-bit scale) exceeds the energy threshold counts as speech. A phrase
//! starts on the first loud block and ends after `pause_threshold` seconds of
//! continuous quiet, provided it held at least `phrase_threshold` seconds of
//! speech; shorter bursts are treated as noise and dropped.

use std::collections::VecDeque;

use crate::config::VoiceConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct UtteranceSettings {
    pub energy_threshold: f32,
    pub pause_threshold: f32,
    pub phrase_threshold: f32,
    pub non_speaking_duration: f32,
    pub phrase_time_limit: Option<f32>,
}

impl From<&VoiceConfig> for UtteranceSettings {
    fn from(config: &VoiceConfig) -> Self {
        Self {
            energy_threshold: config.energy_threshold,
            pause_threshold: config.pause_threshold,
            phrase_threshold: config.phrase_threshold,
            non_speaking_duration: config.non_speaking_duration,
            phrase_time_limit: config.phrase_time_limit_secs,
        }
    }
}

impl Default for UtteranceSettings {
    fn default() -> Self {
        UtteranceSettings::from(&VoiceConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    WaitingForSpeech,
    InPhrase,
    Complete,
}

pub struct UtteranceDetector {
    energy_threshold: f32,
    pause_samples: usize,
    phrase_samples: usize,
    padding_samples: usize,
    limit_samples: Option<usize>,
    state: DetectorState,
    pre_roll: VecDeque<f32>,
    phrase: Vec<f32>,
    // From the first loud block to the last one, gaps included
    speech_len: usize,
    // Consecutive quiet samples at the end of the phrase
    silence_len: usize,
}

fn secs_to_samples(secs: f32, sample_rate: u32) -> usize {
    (secs.max(0.0) * sample_rate as f32).round() as usize
}

/// RMS of a block, scaled to the 16-bit sample range
pub fn block_energy(block: &[f32]) -> f32 {
    if block.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = block.iter().map(|s| s * s).sum();
    (sum_sq / block.len() as f32).sqrt() * 32768.0
}

pub fn to_pcm16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
        .collect()
}

impl UtteranceDetector {
    pub fn new(settings: &UtteranceSettings, sample_rate: u32) -> Self {
        Self {
            energy_threshold: settings.energy_threshold,
            pause_samples: secs_to_samples(settings.pause_threshold, sample_rate),
            phrase_samples: secs_to_samples(settings.phrase_threshold, sample_rate),
            padding_samples: secs_to_samples(settings.non_speaking_duration, sample_rate),
            limit_samples: settings
                .phrase_time_limit
                .map(|secs| secs_to_samples(secs, sample_rate)),
            state: DetectorState::WaitingForSpeech,
            pre_roll: VecDeque::new(),
            phrase: Vec::new(),
            speech_len: 0,
            silence_len: 0,
        }
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    /// Feed one block of mono samples and return the resulting state
    pub fn push(&mut self, block: &[f32]) -> DetectorState {
        if self.state == DetectorState::Complete || block.is_empty() {
            return self.state;
        }

        let loud = block_energy(block) > self.energy_threshold;

        match self.state {
            DetectorState::WaitingForSpeech => {
                if loud {
                    self.phrase.extend(self.pre_roll.drain(..));
                    self.phrase.extend_from_slice(block);
                    self.speech_len = block.len();
                    self.silence_len = 0;
                    self.state = DetectorState::InPhrase;
                } else {
                    self.pre_roll.extend(block.iter().copied());
                    let overflow = self.pre_roll.len().saturating_sub(self.padding_samples);
                    self.pre_roll.drain(..overflow);
                }
            }
            DetectorState::InPhrase => {
                self.phrase.extend_from_slice(block);
                if loud {
                    self.speech_len += self.silence_len + block.len();
                    self.silence_len = 0;
                } else {
                    self.silence_len += block.len();
                }

                if self.silence_len >= self.pause_samples {
                    if self.speech_len >= self.phrase_samples {
                        self.trim_trailing_silence();
                        self.state = DetectorState::Complete;
                    } else {
                        self.discard_noise();
                    }
                }
            }
            DetectorState::Complete => {}
        }

        if self.state == DetectorState::InPhrase {
            if let Some(limit) = self.limit_samples {
                if self.speech_len + self.silence_len >= limit {
                    self.state = DetectorState::Complete;
                }
            }
        }

        self.state
    }

    fn trim_trailing_silence(&mut self) {
        let excess = self.silence_len.saturating_sub(self.padding_samples);
        let keep = self.phrase.len().saturating_sub(excess);
        self.phrase.truncate(keep);
    }

    fn discard_noise(&mut self) {
        let tail_start = self.phrase.len().saturating_sub(self.padding_samples);
        self.pre_roll = self.phrase.drain(tail_start..).collect();
        self.phrase.clear();
        self.speech_len = 0;
        self.silence_len = 0;
        self.state = DetectorState::WaitingForSpeech;
    }

    /// Samples of the detected phrase, padding included
    pub fn into_samples(self) -> Vec<f32> {
        self.phrase
    }
}
