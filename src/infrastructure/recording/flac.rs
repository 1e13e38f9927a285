//! FLAC encoding for captured clips
//!
//! Stored messages keep their audio losslessly compressed; FLAC is also an
//! input format Gemini accepts directly, so one encode serves both storage
//! and analysis.
//!
//! Settings: 16 kHz sample rate, mono, 16-bit samples.

use flacenc::bitsink::ByteSink;
use flacenc::component::BitRepr;
use flacenc::config;
use flacenc::error::Verify;
use flacenc::source::MemSource;

/// Sample rate captured clips are normalized to
pub const CLIP_SAMPLE_RATE: u32 = 16000;

/// Bits per sample (16-bit audio)
const BITS_PER_SAMPLE: usize = 16;

/// Number of channels (mono)
const CHANNELS: usize = 1;

/// FLAC encoding errors
#[derive(Debug, thiserror::Error)]
pub enum FlacError {
    #[error("FLAC config error: {0}")]
    Config(String),

    #[error("FLAC encoding failed: {0}")]
    Encode(String),

    #[error("FLAC write failed: {0}")]
    Write(String),
}

/// Encode mono 16 kHz PCM samples to FLAC bytes
pub fn encode(pcm_samples: &[i16]) -> Result<Vec<u8>, FlacError> {
    // flacenc works on i32 samples
    let samples_i32: Vec<i32> = pcm_samples.iter().map(|&s| s as i32).collect();

    let config = config::Encoder::default()
        .into_verified()
        .map_err(|(_, e)| FlacError::Config(format!("{:?}", e)))?;

    let source = MemSource::from_samples(
        &samples_i32,
        CHANNELS,
        BITS_PER_SAMPLE,
        CLIP_SAMPLE_RATE as usize,
    );

    let flac_stream = flacenc::encode_with_fixed_block_size(&config, source, config.block_size)
        .map_err(|e| FlacError::Encode(format!("{:?}", e)))?;

    let mut sink = ByteSink::new();
    flac_stream
        .write(&mut sink)
        .map_err(|e| FlacError::Write(e.to_string()))?;

    Ok(sink.into_inner())
}
