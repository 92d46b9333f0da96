//! Audio Module
//!
//! Decoding of MP3, WAV and AIFF input, channel down-mixing, and mono output
//! in the same container format as the input.

pub mod aiff;
pub mod buffer;
pub mod converter;
pub mod decoder;
pub mod format;
pub mod mp3;
pub mod wav;

pub use buffer::{AudioData, SampleBuffer};
pub use converter::{AudioConverter, ConversionSummary, output_path_for};
pub use format::{AudioFormat, SUPPORTED_EXTENSIONS, is_supported};
