use std::sync::{Mutex, MutexGuard, TryLockError};
use tracing::warn;

use crate::asr::CapturedAudio;
use crate::error::VoiceError;

/// Something that can record one utterance.
///
/// `listen` blocks until the utterance ends; callers on the async runtime
/// should run it on the blocking pool.
pub trait VoiceSource: Send + Sync {
    fn available(&self) -> bool;

    fn listen(&self) -> Result<CapturedAudio, VoiceError>;
}

/// Installed when no input device exists; never touches audio hardware
pub struct NoInputDevice {
    reason: String,
}

impl NoInputDevice {
    pub fn new(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!("No default input device available ({}). Running in non-audio mode.", reason);
        Self { reason }
    }
}

impl VoiceSource for NoInputDevice {
    fn available(&self) -> bool {
        false
    }

    fn listen(&self) -> Result<CapturedAudio, VoiceError> {
        warn!("Voice command refused: {}", self.reason);
        Err(VoiceError::AudioUnavailable)
    }
}

/// Admits one recording at a time.
///
/// A recording lasts until the speaker pauses, with no upper bound unless a
/// phrase time limit is configured, so a second caller is turned away with
/// `VoiceError::Busy` instead of parking a blocking thread behind it.
#[derive(Default)]
pub struct RecordingSlot(Mutex<()>);

impl RecordingSlot {
    pub fn try_acquire(&self) -> Result<MutexGuard<'_, ()>, VoiceError> {
        match self.0.try_lock() {
            Ok(guard) => Ok(guard),
            Err(TryLockError::WouldBlock) => Err(VoiceError::Busy),
            // The guarded value is `()`, so a panicked recording leaves nothing to repair
            Err(TryLockError::Poisoned(poisoned)) => Ok(poisoned.into_inner()),
        }
    }
}
