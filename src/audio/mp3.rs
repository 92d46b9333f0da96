//! MP3 output
//!
//! Encoding goes through LAME and is only available with the `mp3` feature.
//! Without it, writing an `.mp3` target fails and the file is reported as a
//! failed conversion.

use std::path::Path;

use ndarray::Array1;

use crate::error::{MonoError, Result};

#[cfg(feature = "mp3")]
pub fn write_mono<P: AsRef<Path>>(path: P, samples: &Array1<f32>, sample_rate: u32) -> Result<()> {
    use mp3lame_encoder::{Bitrate, Builder, FlushNoGap, MonoPcm, Quality};
    use crate::audio::wav::to_i16;

    let path = path.as_ref();

    let mut builder = Builder::new().ok_or_else(|| MonoError::audio("Cannot create LAME encoder"))?;
    builder.set_num_channels(1)
        .map_err(|e| MonoError::audio(format!("LAME channels: {:?}", e)))?;
    builder.set_sample_rate(sample_rate)
        .map_err(|e| MonoError::audio(format!("LAME sample rate {}: {:?}", sample_rate, e)))?;
    builder.set_brate(Bitrate::Kbps192)
        .map_err(|e| MonoError::audio(format!("LAME bitrate: {:?}", e)))?;
    builder.set_quality(Quality::Best)
        .map_err(|e| MonoError::audio(format!("LAME quality: {:?}", e)))?;
    let mut encoder = builder.build()
        .map_err(|e| MonoError::audio(format!("Cannot initialize LAME encoder: {:?}", e)))?;

    let pcm: Vec<i16> = samples.iter().map(|&s| to_i16(s)).collect();

    let mut encoded = Vec::with_capacity(mp3lame_encoder::max_required_buffer_size(pcm.len()));
    encoder.encode_to_vec(MonoPcm(&pcm), &mut encoded)
        .map_err(|e| MonoError::audio(format!("MP3 encoding failed: {:?}", e)))?;
    encoder.flush_to_vec::<FlushNoGap>(&mut encoded)
        .map_err(|e| MonoError::audio(format!("MP3 flush failed: {:?}", e)))?;

    std::fs::write(path, &encoded)
        .map_err(|e| MonoError::audio(format!("Cannot write output file {}: {}", path.display(), e)))
}

#[cfg(not(feature = "mp3"))]
pub fn write_mono<P: AsRef<Path>>(path: P, _samples: &Array1<f32>, _sample_rate: u32) -> Result<()> {
    Err(MonoError::audio(format!(
        "MP3 encoding is not enabled in this build, cannot write {}",
        path.as_ref().display()
    )))
}
