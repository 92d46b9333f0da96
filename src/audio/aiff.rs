//! AIFF output
//!
//! Writes uncompressed big-endian 16-bit PCM in a FORM/AIFF container with a
//! COMM and an SSND chunk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ndarray::Array1;

use crate::audio::wav::{to_i16, BITS_PER_SAMPLE};
use crate::error::{MonoError, Result};

const COMM_SIZE: u32 = 18;
const SSND_HEADER_SIZE: u32 = 8;

/// Encodes a sample rate as an IEEE 754 80-bit extended float, big-endian.
pub fn extended_sample_rate(rate: u32) -> [u8; 10] {
    let mut out = [0u8; 10];
    if rate == 0 {
        return out;
    }

    let msb = 31 - rate.leading_zeros();
    let exponent = 16383 + msb as u16;
    let mantissa = (rate as u64) << (63 - msb);

    out[..2].copy_from_slice(&exponent.to_be_bytes());
    out[2..].copy_from_slice(&mantissa.to_be_bytes());
    out
}

pub fn write_mono<P: AsRef<Path>>(path: P, samples: &Array1<f32>, sample_rate: u32) -> Result<()> {
    let pcm: Vec<i16> = samples.iter().map(|&s| to_i16(s)).collect();
    write_pcm(path, 1, &pcm, sample_rate)
}

/// Writes interleaved 16-bit frames with `channels` samples each.
pub(crate) fn write_pcm<P: AsRef<Path>>(path: P, channels: u16, pcm: &[i16], sample_rate: u32) -> Result<()> {
    let path = path.as_ref();
    if channels == 0 {
        return Err(MonoError::audio("AIFF needs at least one channel"));
    }

    let too_large = || MonoError::audio("Too many samples for an AIFF file");
    let frames = u32::try_from(pcm.len() / channels as usize).map_err(|_| too_large())?;
    let data_size = u32::try_from(pcm.len())
        .ok()
        .and_then(|n| n.checked_mul(2))
        .ok_or_else(too_large)?;
    let form_size = 4 + (8 + COMM_SIZE) + (8 + SSND_HEADER_SIZE + data_size);

    let file = File::create(path)
        .map_err(|e| MonoError::audio(format!("Cannot create output file {}: {}", path.display(), e)))?;
    let mut w = BufWriter::new(file);

    w.write_all(b"FORM")?;
    w.write_all(&form_size.to_be_bytes())?;
    w.write_all(b"AIFF")?;

    w.write_all(b"COMM")?;
    w.write_all(&COMM_SIZE.to_be_bytes())?;
    w.write_all(&(channels as i16).to_be_bytes())?;
    w.write_all(&frames.to_be_bytes())?;
    w.write_all(&(BITS_PER_SAMPLE as i16).to_be_bytes())?;
    w.write_all(&extended_sample_rate(sample_rate))?;

    w.write_all(b"SSND")?;
    w.write_all(&(SSND_HEADER_SIZE + data_size).to_be_bytes())?;
    w.write_all(&0u32.to_be_bytes())?;
    w.write_all(&0u32.to_be_bytes())?;
    for &sample in pcm {
        w.write_all(&sample.to_be_bytes())?;
    }

    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_extended_sample_rate() {
        assert_eq!(
            extended_sample_rate(44100),
            [0x40, 0x0E, 0xAC, 0x44, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            extended_sample_rate(48000),
            [0x40, 0x0E, 0xBB, 0x80, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            extended_sample_rate(8000),
            [0x40, 0x0B, 0xFA, 0x00, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(extended_sample_rate(0), [0u8; 10]);
    }

    #[test]
    fn test_write_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.aiff");
        let samples = Array1::from(vec![0.5, -0.5, 0.0]);

        write_mono(&path, &samples, 44100).unwrap();
        let bytes = std::fs::read(&path).unwrap();

        assert_eq!(bytes.len(), 12 + 26 + 16 + 6);
        assert_eq!(&bytes[0..4], b"FORM");
        assert_eq!(u32::from_be_bytes(bytes[4..8].try_into().unwrap()) as usize, bytes.len() - 8);
        assert_eq!(&bytes[8..12], b"AIFF");
        assert_eq!(&bytes[12..16], b"COMM");
        assert_eq!(i16::from_be_bytes([bytes[20], bytes[21]]), 1);
        assert_eq!(u32::from_be_bytes(bytes[22..26].try_into().unwrap()), 3);
        assert_eq!(i16::from_be_bytes([bytes[26], bytes[27]]), 16);
        assert_eq!(&bytes[28..38], &extended_sample_rate(44100));
        assert_eq!(&bytes[38..42], b"SSND");

        let pcm = &bytes[54..];
        assert_eq!(i16::from_be_bytes([pcm[0], pcm[1]]), 16384);
        assert_eq!(i16::from_be_bytes([pcm[2], pcm[3]]), -16384);
        assert_eq!(i16::from_be_bytes([pcm[4], pcm[5]]), 0);
    }

    #[test]
    fn test_written_file_decodes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tone.aif");
        let samples = Array1::from(vec![0.25f32; 4410]);

        write_mono(&path, &samples, 48000).unwrap();
        let decoded = crate::audio::decoder::decode_file(&path).unwrap();

        assert_eq!(decoded.sample_rate, 48000);
        assert_eq!(decoded.channels(), 1);
        assert_eq!(decoded.frames(), 4410);
        let mono = decoded.into_mono();
        let out = mono.mono_samples().unwrap();
        assert!((out[0] - 0.25).abs() < 1e-4);
        assert!(out.iter().all(|&s| (s - 0.25).abs() < 1e-4));
    }

    #[test]
    fn test_stereo_frames_decode_as_two_channels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stereo.aiff");
        let pcm: Vec<i16> = (0..100).flat_map(|_| [16384i16, -8192]).collect();

        write_pcm(&path, 2, &pcm, 22050).unwrap();
        let decoded = crate::audio::decoder::decode_file(&path).unwrap();

        assert_eq!(decoded.sample_rate, 22050);
        assert_eq!(decoded.channels(), 2);
        assert_eq!(decoded.frames(), 100);
    }
}
