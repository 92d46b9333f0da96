//! Stereo to mono conversion for a single file

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::audio::{aiff, decoder, mp3, wav, AudioFormat, SampleBuffer};
use crate::error::{MonoError, Result};

/// Details of one finished conversion.
#[derive(Debug, Clone)]
pub struct ConversionSummary {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub sample_rate: u32,
    pub input_channels: usize,
    pub frames: usize,
    pub processing_time: Duration,
}

pub struct AudioConverter;

impl AudioConverter {
    /// Decodes `input`, averages its channels and writes a mono file to
    /// `output` at the input's sample rate. The encoder is picked from the
    /// output extension.
    pub fn convert(input: &Path, output: &Path) -> Result<ConversionSummary> {
        let start = Instant::now();
        let format = AudioFormat::from_path(output)?;

        let buffer = decoder::decode_file(input)?;
        let input_channels = buffer.channels();
        if input_channels == 1 {
            log::debug!("{} is already mono", input.display());
        } else {
            log::debug!("Mixing {} channels down to mono", input_channels);
        }

        let mono = buffer.into_mono();
        log::debug!(
            "Writing {} ({}, {} Hz, {:.2}s)",
            output.display(), format.name(), mono.sample_rate, mono.duration()
        );
        Self::write(output, format, &mono)?;

        Ok(ConversionSummary {
            input_path: input.to_path_buf(),
            output_path: output.to_path_buf(),
            sample_rate: mono.sample_rate,
            input_channels,
            frames: mono.frames(),
            processing_time: start.elapsed(),
        })
    }

    /// Boolean form used where only success matters. Failures are logged at
    /// debug level and never propagate.
    pub fn convert_to_mono(input: &Path, output: &Path) -> bool {
        match Self::convert(input, output) {
            Ok(_) => true,
            Err(e) => {
                log::debug!("Conversion of {} failed: {}", input.display(), e);
                false
            }
        }
    }

    fn write(path: &Path, format: AudioFormat, buffer: &SampleBuffer) -> Result<()> {
        let samples = buffer
            .mono_samples()
            .ok_or_else(|| MonoError::audio("Buffer was not mixed down"))?;

        match format {
            AudioFormat::Wav => wav::write_mono(path, samples, buffer.sample_rate),
            AudioFormat::Aiff => aiff::write_mono(path, samples, buffer.sample_rate),
            AudioFormat::Mp3 => mp3::write_mono(path, samples, buffer.sample_rate),
        }
    }
}

/// `<stem>_mono<.ext>` inside `output_dir`, keeping the original extension case.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{}_mono.{}", stem, ext.to_string_lossy()),
        None => format!("{}_mono", stem),
    };
    output_dir.join(file_name)
}
