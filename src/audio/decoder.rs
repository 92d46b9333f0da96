//! Audio decoding through symphonia
//!
//! Produces planar `f32` channels at the file's native sample rate. No
//! resampling happens here.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::conv::FromSample;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;

use crate::audio::{AudioData, SampleBuffer};
use crate::error::{MonoError, Result};

pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<SampleBuffer> {
    let path = path.as_ref();

    let file = File::open(path)
        .map_err(|e| MonoError::audio(format!("Cannot open audio file {}: {}", path.display(), e)))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(extension) = path.extension() {
        hint.with_extension(&extension.to_string_lossy());
    }

    // Trims encoder delay and padding so MP3 frame counts match the source.
    let format_options = FormatOptions { enable_gapless: true, ..Default::default() };
    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &format_options, &MetadataOptions::default())
        .map_err(|e| MonoError::audio(format!("Unrecognized audio format: {}", e)))?;
    let mut reader = probed.format;

    let track = reader
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| MonoError::audio("No audio track found"))?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;
    let declared_channels = track.codec_params.channels.map(|ch| ch.count());

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| MonoError::audio(format!("Cannot create decoder: {}", e)))?;

    let mut channels: Vec<Vec<f32>> = vec![Vec::new(); declared_channels.unwrap_or(0)];

    loop {
        let packet = match reader.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                if sample_rate.is_none() {
                    sample_rate = Some(decoded.spec().rate);
                }
                append_buffer(&decoded, &mut channels);
            }
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::DecodeError(err)) => {
                log::debug!("Skipping undecodable packet in {}: {}", path.display(), err);
                continue;
            }
            Err(e) => return Err(e.into()),
        }
    }

    let sample_rate = sample_rate
        .filter(|&rate| rate > 0)
        .ok_or_else(|| MonoError::audio("Unknown sample rate"))?;

    let data = AudioData::from_channels(channels)?;
    log::debug!(
        "Decoded {}: {} Hz, {} ch, {} frames",
        path.display(), sample_rate, data.channels(), data.len()
    );

    Ok(SampleBuffer::new(sample_rate, data))
}

fn append_buffer(decoded: &AudioBufferRef<'_>, out: &mut Vec<Vec<f32>>) {
    match decoded {
        AudioBufferRef::U8(buf) => append_planar(buf, out),
        AudioBufferRef::U16(buf) => append_planar(buf, out),
        AudioBufferRef::U24(buf) => append_planar(buf, out),
        AudioBufferRef::U32(buf) => append_planar(buf, out),
        AudioBufferRef::S8(buf) => append_planar(buf, out),
        AudioBufferRef::S16(buf) => append_planar(buf, out),
        AudioBufferRef::S24(buf) => append_planar(buf, out),
        AudioBufferRef::S32(buf) => append_planar(buf, out),
        AudioBufferRef::F32(buf) => append_planar(buf, out),
        AudioBufferRef::F64(buf) => append_planar(buf, out),
    }
}

fn append_planar<S>(buf: &AudioBuffer<S>, out: &mut Vec<Vec<f32>>)
where
    S: Sample,
    f32: FromSample<S>,
{
    let channel_count = buf.spec().channels.count();
    if out.len() < channel_count {
        out.resize(channel_count, Vec::new());
    }

    for (ch, samples) in out.iter_mut().enumerate().take(channel_count) {
        samples.extend(buf.chan(ch).iter().map(|&s| f32::from_sample(s)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};
    use tempfile::TempDir;

    fn write_wav(path: &Path, sample_rate: u32, frames: &[Vec<i16>]) {
        let spec = WavSpec {
            channels: frames[0].len() as u16,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for frame in frames {
            for &s in frame {
                writer.write_sample(s).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_decode_stereo_wav() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stereo.wav");
        let frames: Vec<Vec<i16>> = (0..100).map(|_| vec![16384, -8192]).collect();
        write_wav(&path, 48000, &frames);

        let buffer = decode_file(&path).unwrap();
        assert_eq!(buffer.sample_rate, 48000);
        assert_eq!(buffer.channels(), 2);
        assert_eq!(buffer.frames(), 100);

        match &buffer.data {
            AudioData::Multi(data) => {
                assert!(data.row(0).iter().all(|&s| (s - 0.5).abs() < 1e-4));
                assert!(data.row(1).iter().all(|&s| (s + 0.25).abs() < 1e-4));
            }
            AudioData::Mono(_) => panic!("expected multi-channel data"),
        }
    }

    #[test]
    fn test_decode_mono_wav() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mono.wav");
        let frames: Vec<Vec<i16>> = (0..50).map(|i| vec![i * 100]).collect();
        write_wav(&path, 11025, &frames);

        let buffer = decode_file(&path).unwrap();
        assert_eq!(buffer.sample_rate, 11025);
        assert_eq!(buffer.channels(), 1);
        assert_eq!(buffer.frames(), 50);
    }

    #[test]
    fn test_decode_missing_file() {
        assert!(decode_file("definitely/not/here.wav").is_err());
    }

    #[test]
    fn test_decode_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.wav");
        std::fs::write(&path, b"this is not a riff file at all").unwrap();
        assert!(decode_file(&path).is_err());
    }
}
