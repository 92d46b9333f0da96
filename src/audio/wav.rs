//! WAV output

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use ndarray::Array1;

use crate::error::{MonoError, Result};

pub const BITS_PER_SAMPLE: u16 = 16;

/// Quantises a float sample in [-1.0, 1.0] to signed 16-bit PCM.
pub fn to_i16(sample: f32) -> i16 {
    (sample * 32768.0).round().clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

pub fn mono_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    }
}

pub fn write_mono<P: AsRef<Path>>(path: P, samples: &Array1<f32>, sample_rate: u32) -> Result<()> {
    let path = path.as_ref();

    let file = File::create(path)
        .map_err(|e| MonoError::audio(format!("Cannot create output file {}: {}", path.display(), e)))?;

    let mut writer = WavWriter::new(BufWriter::new(file), mono_spec(sample_rate))
        .map_err(|e| MonoError::audio(format!("Cannot create WAV writer: {}", e)))?;

    for &sample in samples.iter() {
        writer.write_sample(to_i16(sample))
            .map_err(|e| MonoError::audio(format!("Failed to write sample: {}", e)))?;
    }

    writer.finalize()
        .map_err(|e| MonoError::audio(format!("Failed to finalize WAV writing: {}", e)))?;

    Ok(())
}
