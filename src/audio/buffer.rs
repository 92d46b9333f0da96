//! Decoded sample buffers and channel down-mixing

use ndarray::{Array1, Array2, Axis};
use crate::error::{MonoError, Result};

#[derive(Debug, Clone)]
pub enum AudioData {
    Mono(Array1<f32>),
    /// Shape is (channels, frames).
    Multi(Array2<f32>),
}

impl AudioData {
    /// Builds a buffer from per-channel sample vectors.
    ///
    /// A single channel becomes `Mono`; two or more become `Multi`. All
    /// channels must have the same length.
    pub fn from_channels(channels: Vec<Vec<f32>>) -> Result<Self> {
        match channels.len() {
            0 => Err(MonoError::audio("Audio has no channels")),
            1 => {
                let samples = channels.into_iter().next().unwrap_or_default();
                Ok(AudioData::Mono(Array1::from(samples)))
            }
            n => {
                let frames = channels[0].len();
                if channels.iter().any(|ch| ch.len() != frames) {
                    return Err(MonoError::audio("Channels have different lengths"));
                }
                let planar: Vec<f32> = channels.into_iter().flatten().collect();
                let data = Array2::from_shape_vec((n, frames), planar)
                    .map_err(|e| MonoError::audio(format!("Invalid channel layout: {}", e)))?;
                Ok(AudioData::Multi(data))
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AudioData::Mono(data) => data.len(),
            AudioData::Multi(data) => data.ncols(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn channels(&self) -> usize {
        match self {
            AudioData::Mono(_) => 1,
            AudioData::Multi(data) => data.nrows(),
        }
    }

    /// Arithmetic mean across channels at every frame. Mono data passes through.
    pub fn to_mono(&self) -> Array1<f32> {
        match self {
            AudioData::Mono(data) => data.clone(),
            AudioData::Multi(data) => data
                .mean_axis(Axis(0))
                .unwrap_or_else(|| Array1::zeros(data.ncols())),
        }
    }
}

/// Decoded audio at its native sample rate.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    pub sample_rate: u32,
    pub data: AudioData,
}

impl SampleBuffer {
    pub fn new(sample_rate: u32, data: AudioData) -> Self {
        Self { sample_rate, data }
    }

    pub fn channels(&self) -> usize {
        self.data.channels()
    }

    pub fn frames(&self) -> usize {
        self.data.len()
    }

    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Down-mixes to a single channel, keeping the sample rate.
    pub fn into_mono(self) -> SampleBuffer {
        let mono = match self.data {
            AudioData::Mono(data) => data,
            multi => multi.to_mono(),
        };
        SampleBuffer {
            sample_rate: self.sample_rate,
            data: AudioData::Mono(mono),
        }
    }

    /// Mono samples; only meaningful after `into_mono`.
    pub fn mono_samples(&self) -> Option<&Array1<f32>> {
        match &self.data {
            AudioData::Mono(data) => Some(data),
            AudioData::Multi(_) => None,
        }
    }
}
