//! Default input device capture through cpal.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use std::sync::mpsc;
use tracing::{debug, info};

use super::source::{RecordingSlot, VoiceSource};
use crate::asr::CapturedAudio;
use crate::error::VoiceError;
use crate::vad::{to_pcm16, DetectorState, UtteranceDetector, UtteranceSettings};

type Block = Result<Vec<f32>, String>;

pub struct Microphone {
    settings: UtteranceSettings,
    device_name: String,
    recording: RecordingSlot,
}

/// An open, playing input stream. Dropping it releases the device.
struct OpenInput {
    _stream: cpal::Stream,
    device_name: String,
}

impl Drop for OpenInput {
    fn drop(&mut self) {
        debug!("Released audio input device: {}", self.device_name);
    }
}

fn capture_err(err: impl std::fmt::Display) -> VoiceError {
    VoiceError::Capture(err.to_string())
}

impl Microphone {
    /// Check that a default input device exists
    pub fn probe(settings: UtteranceSettings) -> Result<Self, VoiceError> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or(VoiceError::AudioUnavailable)?;
        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());
        info!("Using audio input device: {}", device_name);

        Ok(Self {
            settings,
            device_name,
            recording: RecordingSlot::default(),
        })
    }

    fn open(&self, tx: mpsc::Sender<Block>) -> Result<(OpenInput, u32), VoiceError> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or(VoiceError::AudioUnavailable)?;
        let supported = device.default_input_config().map_err(capture_err)?;
        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels() as usize;
        let format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();

        let stream = match format {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, channels, tx),
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, channels, tx),
            cpal::SampleFormat::I32 => build_stream::<i32>(&device, &config, channels, tx),
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, channels, tx),
            other => Err(VoiceError::Capture(format!(
                "unsupported sample format: {:?}",
                other
            ))),
        }?;
        stream.play().map_err(capture_err)?;

        debug!(
            "Opened {} ({} Hz, {} ch, {:?})",
            self.device_name, sample_rate, channels, format
        );
        Ok((
            OpenInput {
                _stream: stream,
                device_name: self.device_name.clone(),
            },
            sample_rate,
        ))
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    tx: mpsc::Sender<Block>,
) -> Result<cpal::Stream, VoiceError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let err_tx = tx.clone();
    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                let _ = tx.send(Ok(downmix(data, channels)));
            },
            move |err| {
                let _ = err_tx.send(Err(err.to_string()));
            },
            None,
        )
        .map_err(capture_err)
}

/// Average interleaved frames into mono f32
fn downmix<T>(data: &[T], channels: usize) -> Vec<f32>
where
    T: Sample,
    f32: FromSample<T>,
{
    data.chunks(channels.max(1))
        .map(|frame| {
            let sum: f32 = frame.iter().map(|&s| f32::from_sample(s)).sum();
            sum / frame.len() as f32
        })
        .collect()
}

impl VoiceSource for Microphone {
    fn available(&self) -> bool {
        true
    }

    fn listen(&self) -> Result<CapturedAudio, VoiceError> {
        let _recording = self.recording.try_acquire()?;

        let (tx, rx) = mpsc::channel();
        let (input, sample_rate) = self.open(tx)?;
        info!("Listening for voice commands...");

        let mut detector = UtteranceDetector::new(&self.settings, sample_rate);
        loop {
            let block = rx
                .recv()
                .map_err(|_| VoiceError::Capture("input stream closed".to_string()))?
                .map_err(VoiceError::Capture)?;
            if detector.push(&block) == DetectorState::Complete {
                break;
            }
        }
        drop(input);

        Ok(CapturedAudio {
            samples: to_pcm16(&detector.into_samples()),
            sample_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_averages_channels() {
        let stereo = [0.5f32, -0.5, 1.0, 0.0];
        assert_eq!(downmix(&stereo, 2), vec![0.0, 0.5]);
    }

    #[test]
    fn downmix_converts_integer_samples() {
        let mono = [0i16, i16::MIN];
        assert_eq!(downmix(&mono, 1), vec![0.0, -1.0]);
    }
}
