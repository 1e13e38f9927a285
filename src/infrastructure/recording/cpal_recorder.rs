//! Cross-platform microphone recorder using cpal
//!
//! Captures at whatever rate the device offers, mixes down to mono,
//! resamples to 16 kHz, and encodes to FLAC.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Instant;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use rubato::{FftFixedIn, Resampler};
use tokio::time::{interval, Duration as TokioDuration};

use super::flac::{self, CLIP_SAMPLE_RATE};
use crate::application::ports::{AudioRecorder, ProgressCallback, RecordingError};
use crate::domain::audio::{AudioData, AudioMimeType, Duration};

/// Microphone recorder using cpal.
///
/// The stream itself is not thread-safe, so capture runs inside a blocking
/// task for the whole recording window.
pub struct CpalRecorder {
    /// Recorded audio samples (mono, i16, at device sample rate)
    audio_buffer: Arc<StdMutex<Vec<i16>>>,
    /// Recording state
    is_recording: Arc<AtomicBool>,
}

impl CpalRecorder {
    /// Create a new cpal-based recorder
    pub fn new() -> Self {
        Self {
            audio_buffer: Arc::new(StdMutex::new(Vec::new())),
            is_recording: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the default input device
    fn get_input_device() -> Result<cpal::Device, RecordingError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(RecordingError::NoAudioDevice)
    }

    /// Get a suitable input configuration
    fn get_input_config(
        device: &cpal::Device,
    ) -> Result<(StreamConfig, SampleFormat), RecordingError> {
        let supported_configs = device
            .supported_input_configs()
            .map_err(|e| RecordingError::StartFailed(format!("Failed to get configs: {}", e)))?;

        // Prefer mono and a range covering the 16 kHz target
        let mut best_config: Option<cpal::SupportedStreamConfigRange> = None;

        for config in supported_configs {
            if config.sample_format() != SampleFormat::I16
                && config.sample_format() != SampleFormat::F32
            {
                continue;
            }

            let includes_target = config.min_sample_rate().0 <= CLIP_SAMPLE_RATE
                && config.max_sample_rate().0 >= CLIP_SAMPLE_RATE;

            let is_better = match &best_config {
                None => true,
                Some(current) => {
                    let fewer_channels = config.channels() < current.channels();
                    let better_rate =
                        includes_target && current.min_sample_rate().0 > CLIP_SAMPLE_RATE;
                    fewer_channels || better_rate
                }
            };
            if is_better {
                best_config = Some(config);
            }
        }

        let config_range = best_config.ok_or(RecordingError::StartFailed(
            "No suitable input config found".into(),
        ))?;

        let sample_rate = if config_range.min_sample_rate().0 <= CLIP_SAMPLE_RATE
            && config_range.max_sample_rate().0 >= CLIP_SAMPLE_RATE
        {
            SampleRate(CLIP_SAMPLE_RATE)
        } else {
            config_range.min_sample_rate()
        };

        let sample_format = config_range.sample_format();
        let config = StreamConfig {
            channels: config_range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Resample audio from the device rate to 16 kHz if needed
    fn resample_to_target(samples: &[i16], source_rate: u32) -> Result<Vec<i16>, RecordingError> {
        if source_rate == CLIP_SAMPLE_RATE {
            return Ok(samples.to_vec());
        }

        let samples_f32: Vec<f32> = samples.iter().map(|&s| s as f32 / 32768.0).collect();

        let ratio = CLIP_SAMPLE_RATE as f64 / source_rate as f64;
        let output_len = (samples_f32.len() as f64 * ratio).ceil() as usize;

        let mut resampler = FftFixedIn::<f32>::new(
            source_rate as usize,
            CLIP_SAMPLE_RATE as usize,
            1024, // Chunk size
            2,    // Sub-chunks
            1,    // Mono
        )
        .map_err(|e| RecordingError::RecordingFailed(format!("Resampler init failed: {}", e)))?;

        let mut output = Vec::with_capacity(output_len);
        let mut input_pos = 0;

        while input_pos < samples_f32.len() {
            let frames_needed = resampler.input_frames_next();
            let end_pos = (input_pos + frames_needed).min(samples_f32.len());
            let mut chunk = samples_f32[input_pos..end_pos].to_vec();

            // Pad the tail chunk
            if chunk.len() < frames_needed {
                chunk.resize(frames_needed, 0.0);
            }

            let resampled = resampler.process(&[chunk], None).map_err(|e| {
                RecordingError::RecordingFailed(format!("Resampling failed: {}", e))
            })?;

            output.extend(resampled[0].iter().map(|&s| (s * 32767.0) as i16));
            input_pos = end_pos;
        }

        output.truncate(output_len);

        Ok(output)
    }

    /// Mix stereo to mono
    fn stereo_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels == 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|chunk| {
                let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    }

    /// Normalize and encode captured PCM to FLAC
    fn encode_audio(samples: &[i16], sample_rate: u32) -> Result<AudioData, RecordingError> {
        let resampled = Self::resample_to_target(samples, sample_rate)?;

        let flac_data = flac::encode(&resampled)
            .map_err(|e| RecordingError::RecordingFailed(e.to_string()))?;

        if flac_data.is_empty() {
            return Err(RecordingError::EmptyRecording);
        }

        Ok(AudioData::new(flac_data, AudioMimeType::Flac))
    }
}

impl Default for CpalRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioRecorder for CpalRecorder {
    async fn record(
        &self,
        duration: Duration,
        on_progress: Option<ProgressCallback>,
    ) -> Result<AudioData, RecordingError> {
        let duration_ms = duration.as_millis();

        {
            let mut buffer = self.audio_buffer.lock().unwrap();
            buffer.clear();
        }

        self.is_recording.store(true, Ordering::SeqCst);

        let audio_buffer = Arc::clone(&self.audio_buffer);
        let is_recording = Arc::clone(&self.is_recording);

        // Capture on a blocking task (cpal::Stream is not Send)
        let record_handle = tokio::task::spawn_blocking(move || {
            let device = CpalRecorder::get_input_device()?;
            let (config, sample_format) = CpalRecorder::get_input_config(&device)?;
            let sample_rate = config.sample_rate.0;
            let channels = config.channels;

            let audio_buffer_clone = Arc::clone(&audio_buffer);
            let is_recording_clone = Arc::clone(&is_recording);

            let stream = match sample_format {
                SampleFormat::I16 => device
                    .build_input_stream(
                        &config,
                        move |data: &[i16], _: &cpal::InputCallbackInfo| {
                            if is_recording_clone.load(Ordering::SeqCst) {
                                let mono = CpalRecorder::stereo_to_mono(data, channels);
                                if let Ok(mut buffer) = audio_buffer_clone.lock() {
                                    buffer.extend_from_slice(&mono);
                                }
                            }
                        },
                        |err| eprintln!("Audio stream error: {}", err),
                        None,
                    )
                    .map_err(|e| RecordingError::StartFailed(e.to_string()))?,

                SampleFormat::F32 => {
                    let audio_buffer_clone = Arc::clone(&audio_buffer);
                    let is_recording_clone = Arc::clone(&is_recording);

                    device
                        .build_input_stream(
                            &config,
                            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                                if is_recording_clone.load(Ordering::SeqCst) {
                                    let i16_data: Vec<i16> =
                                        data.iter().map(|&s| (s * 32767.0) as i16).collect();
                                    let mono = CpalRecorder::stereo_to_mono(&i16_data, channels);
                                    if let Ok(mut buffer) = audio_buffer_clone.lock() {
                                        buffer.extend_from_slice(&mono);
                                    }
                                }
                            },
                            |err| eprintln!("Audio stream error: {}", err),
                            None,
                        )
                        .map_err(|e| RecordingError::StartFailed(e.to_string()))?
                }

                _ => {
                    return Err(RecordingError::StartFailed(
                        "Unsupported sample format".into(),
                    ))
                }
            };

            stream
                .play()
                .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

            // Capture window
            std::thread::sleep(std::time::Duration::from_millis(duration_ms));

            is_recording.store(false, Ordering::SeqCst);
            drop(stream);

            Ok::<u32, RecordingError>(sample_rate)
        });

        // Report progress while the capture task runs
        if let Some(progress) = on_progress {
            let start = Instant::now();
            let progress_clone = Arc::clone(&progress);
            let is_recording = Arc::clone(&self.is_recording);

            tokio::spawn(async move {
                let mut ticker = interval(TokioDuration::from_millis(100));
                while is_recording.load(Ordering::SeqCst) {
                    ticker.tick().await;
                    let elapsed = start.elapsed().as_millis() as u64;
                    if elapsed >= duration_ms {
                        progress_clone(duration_ms, duration_ms);
                        break;
                    }
                    progress_clone(elapsed, duration_ms);
                }
            });
        }

        let sample_rate = record_handle
            .await
            .map_err(|e| RecordingError::RecordingFailed(format!("Task join error: {}", e)))??;

        let samples = {
            let buffer = self.audio_buffer.lock().unwrap();
            buffer.clone()
        };

        if samples.is_empty() {
            return Err(RecordingError::EmptyRecording);
        }

        // Encode on a blocking task; resample + FLAC are CPU-bound
        let encoded =
            tokio::task::spawn_blocking(move || Self::encode_audio(&samples, sample_rate))
                .await
                .map_err(|e| {
                    RecordingError::RecordingFailed(format!("Encode task error: {}", e))
                })??;

        Ok(encoded)
    }
}
