//! Hand-rolled RIFF/WAVE codec.
//!
//! Encoding writes the 44-byte canonical header plus interleaved PCM at
//! 16 or 24 bits (the "32-bit float" tier is written as 24-bit PCM — the
//! container has no native float sample type here). Decoding accepts
//! 8/16/24/32-bit PCM and de-interleaves into per-channel buffers. The
//! 3-byte packing is one shared pair of routines so encode and decode
//! stay round-trip symmetric.

use crate::config::BitDepth;
use crate::dsp::{ChannelData, SampleBuffer};
use crate::error::{AudioError, FormatError};

const I16_SCALE: f64 = 32767.0;
const I24_SCALE: f64 = 8388607.0;

/// Serialize a buffer to WAV bytes at the given bit depth. The header's
/// sample rate and channel count come from the buffer itself.
pub fn encode(buffer: &SampleBuffer, bit_depth: BitDepth) -> Vec<u8> {
    let channels = buffer.channel_count();
    let sample_width = bit_depth.sample_width();
    let frames = buffer.frames();
    let data_size = (frames * channels as usize * sample_width as usize) as u32;

    let mut out = Vec::with_capacity(44 + data_size as usize);
    write_header(&mut out, buffer.sample_rate, channels, sample_width, data_size);

    let (left, right) = buffer.channel_slices();
    for i in 0..frames {
        write_sample(&mut out, left[i], bit_depth);
        if channels == 2 {
            write_sample(&mut out, right[i], bit_depth);
        }
    }

    out
}

/// Parse WAV bytes into a float buffer, samples scaled to [-1.0, 1.0].
pub fn decode(bytes: &[u8]) -> Result<SampleBuffer, AudioError> {
    if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return Err(malformed("missing RIFF/WAVE header"));
    }

    let mut fmt: Option<(u16, u16, u32, u16)> = None; // format, channels, rate, bits
    let mut data: Option<&[u8]> = None;

    let mut pos = 12;
    while pos + 8 <= bytes.len() {
        let id = &bytes[pos..pos + 4];
        let size = u32::from_le_bytes([
            bytes[pos + 4],
            bytes[pos + 5],
            bytes[pos + 6],
            bytes[pos + 7],
        ]) as usize;
        let body_end = pos + 8 + size;
        if body_end > bytes.len() {
            return Err(malformed("chunk overruns file"));
        }
        let body = &bytes[pos + 8..body_end];
        match id {
            b"fmt " => {
                if body.len() < 16 {
                    return Err(malformed("fmt chunk too short"));
                }
                fmt = Some((
                    u16::from_le_bytes([body[0], body[1]]),
                    u16::from_le_bytes([body[2], body[3]]),
                    u32::from_le_bytes([body[4], body[5], body[6], body[7]]),
                    u16::from_le_bytes([body[14], body[15]]),
                ));
            }
            b"data" => data = Some(body),
            _ => {}
        }
        // Chunks are word-aligned; odd sizes carry a pad byte.
        pos = body_end + (size & 1);
    }

    let (format, channels, sample_rate, bits) = fmt.ok_or_else(|| malformed("no fmt chunk"))?;
    let data = data.ok_or_else(|| malformed("no data chunk"))?;
    if format != 1 {
        return Err(malformed(&format!("non-PCM format tag {format}")));
    }
    if channels == 0 || channels > 2 {
        return Err(FormatError::ChannelCount { channels }.into());
    }
    let width = match bits {
        8 | 16 | 24 | 32 => (bits / 8) as usize,
        _ => return Err(FormatError::BitDepth { bits }.into()),
    };

    let total = data.len() / width;
    let frames = total / channels as usize;
    let channels = if channels == 2 {
        let mut left = Vec::with_capacity(frames);
        let mut right = Vec::with_capacity(frames);
        for frame in 0..frames {
            let at = frame * 2 * width;
            left.push(read_sample(&data[at..at + width]));
            right.push(read_sample(&data[at + width..at + 2 * width]));
        }
        ChannelData::Stereo { left, right }
    } else {
        let mut mono = Vec::with_capacity(frames);
        for frame in 0..frames {
            let at = frame * width;
            mono.push(read_sample(&data[at..at + width]));
        }
        ChannelData::Mono(mono)
    };
    Ok(SampleBuffer { sample_rate, channels })
}

fn write_header(out: &mut Vec<u8>, sample_rate: u32, channels: u16, sample_width: u16, data_size: u32) {
    let bits_per_sample = sample_width * 8;
    let byte_rate = sample_rate * channels as u32 * sample_width as u32;
    let block_align = channels * sample_width;
    let file_size = 36 + data_size;

    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&bits_per_sample.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());
}

/// Clip to [-1, 1], scale to the integer range, write little-endian.
fn write_sample(out: &mut Vec<u8>, sample: f64, bit_depth: BitDepth) {
    let clipped = sample.clamp(-1.0, 1.0);
    match bit_depth {
        BitDepth::Int16 => {
            let v = (clipped * I16_SCALE).round() as i16;
            out.extend_from_slice(&v.to_le_bytes());
        }
        BitDepth::Int24 | BitDepth::Float32 => {
            let v = (clipped * I24_SCALE).round() as i32;
            write_i24_le(out, v);
        }
    }
}

fn read_sample(bytes: &[u8]) -> f64 {
    match bytes.len() {
        1 => (bytes[0] as f64 - 128.0) / 128.0, // 8-bit WAV is unsigned
        2 => i16::from_le_bytes([bytes[0], bytes[1]]) as f64 / 32768.0,
        3 => read_i24_le([bytes[0], bytes[1], bytes[2]]) as f64 / 8388608.0,
        4 => {
            i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64 / 2147483648.0
        }
        _ => unreachable!("width validated during header parse"),
    }
}

/// Append the low three bytes of a validated 32-bit intermediate.
fn write_i24_le(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_le_bytes()[..3]);
}

/// Sign-extend a little-endian byte triplet into an i32.
fn read_i24_le(bytes: [u8; 3]) -> i32 {
    let raw = (bytes[0] as i32) | (bytes[1] as i32) << 8 | (bytes[2] as i32) << 16;
    (raw << 8) >> 8
}

fn malformed(detail: &str) -> AudioError {
    FormatError::Malformed { detail: detail.to_string() }.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| (i as f64 / n as f64) * 2.0 - 1.0).collect()
    }

    #[test]
    fn header_fields_are_exact() {
        let buf = SampleBuffer::mono(vec![0.0; 100], 44100);
        let wav = encode(&buf, BitDepth::Int16);

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u16::from_le_bytes([wav[20], wav[21]]), 1, "PCM format tag");
        assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 1, "channels");
        assert_eq!(u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]), 44100);
        assert_eq!(u16::from_le_bytes([wav[34], wav[35]]), 16, "bits per sample");
        let data_size = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
        assert_eq!(data_size, 200);
        assert_eq!(wav.len(), 44 + 200);
    }

    #[test]
    fn float_tier_declares_24_bits() {
        let buf = SampleBuffer::mono(vec![0.0; 10], 96000);
        let wav = encode(&buf, BitDepth::Float32);
        assert_eq!(u16::from_le_bytes([wav[34], wav[35]]), 24);
        assert_eq!(u16::from_le_bytes([wav[32], wav[33]]), 3, "block align");
    }

    #[test]
    fn i24_pack_unpack_symmetry() {
        for v in [0, 1, -1, 8388607, -8388608, 123456, -654321] {
            let mut buf = Vec::new();
            write_i24_le(&mut buf, v);
            assert_eq!(read_i24_le([buf[0], buf[1], buf[2]]), v, "value {v}");
        }
    }

    #[test]
    fn round_trip_16_bit_within_quantization_error() {
        let buf = SampleBuffer::mono(ramp(1000), 44100);
        let decoded = decode(&encode(&buf, BitDepth::Int16)).unwrap();
        let (orig, _) = buf.channel_slices();
        let (out, _) = decoded.channel_slices();
        assert_eq!(out.len(), orig.len());
        // One LSB of rounding plus the 32767/32768 scale asymmetry.
        for (a, b) in orig.iter().zip(out) {
            assert!((a - b).abs() <= 2.0 / 32767.0, "{a} vs {b}");
        }
    }

    #[test]
    fn round_trip_24_bit_within_quantization_error() {
        let buf = SampleBuffer::stereo(ramp(500), ramp(500), 48000);
        let decoded = decode(&encode(&buf, BitDepth::Int24)).unwrap();
        assert_eq!(decoded.channel_count(), 2);
        let (orig_l, _) = buf.channel_slices();
        let (out_l, out_r) = decoded.channel_slices();
        for (a, b) in orig_l.iter().zip(out_l) {
            assert!((a - b).abs() <= 2.0 / 8388607.0, "{a} vs {b}");
        }
        assert_eq!(out_l, out_r);
    }

    #[test]
    fn encode_clips_out_of_range_samples() {
        let buf = SampleBuffer::mono(vec![1.5, -2.0], 44100);
        let wav = encode(&buf, BitDepth::Int16);
        let first = i16::from_le_bytes([wav[44], wav[45]]);
        let second = i16::from_le_bytes([wav[46], wav[47]]);
        assert_eq!(first, 32767);
        assert_eq!(second, -32767);
    }

    #[test]
    fn stereo_interleaves_left_then_right() {
        let buf = SampleBuffer::stereo(vec![0.5], vec![-0.5], 44100);
        let wav = encode(&buf, BitDepth::Int16);
        let l = i16::from_le_bytes([wav[44], wav[45]]);
        let r = i16::from_le_bytes([wav[46], wav[47]]);
        assert!(l > 0 && r < 0, "expected L0 then R0, got {l}, {r}");
    }

    #[test]
    fn decode_handles_8_bit_unsigned() {
        // Minimal hand-built 8-bit mono file: silence is 128.
        let mut wav = Vec::new();
        write_header(&mut wav, 8000, 1, 1, 4);
        wav.extend_from_slice(&[128, 255, 0, 128]);
        let buf = decode(&wav).unwrap();
        let (samples, _) = buf.channel_slices();
        assert!(samples[0].abs() < 1e-12);
        assert!((samples[1] - 127.0 / 128.0).abs() < 1e-12);
        assert!((samples[2] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn decode_handles_32_bit_signed() {
        let mut wav = Vec::new();
        write_header(&mut wav, 8000, 1, 4, 8);
        wav.extend_from_slice(&i32::MAX.to_le_bytes());
        wav.extend_from_slice(&(i32::MIN / 2).to_le_bytes());
        let buf = decode(&wav).unwrap();
        let (samples, _) = buf.channel_slices();
        assert!((samples[0] - 1.0).abs() < 1e-9);
        assert!((samples[1] + 0.5).abs() < 1e-9);
    }

    #[test]
    fn garbage_and_unsupported_inputs_fail() {
        assert!(decode(b"not a wav").is_err());

        let mut wav = Vec::new();
        write_header(&mut wav, 8000, 4, 2, 0); // 4 channels
        assert!(matches!(
            decode(&wav).unwrap_err(),
            AudioError::Unsupported(FormatError::ChannelCount { channels: 4 })
        ));

        let mut wav = Vec::new();
        write_header(&mut wav, 8000, 1, 2, 0);
        wav[34] = 12; // 12 bits per sample
        assert!(matches!(
            decode(&wav).unwrap_err(),
            AudioError::Unsupported(FormatError::BitDepth { bits: 12 })
        ));
    }

    #[test]
    fn hound_reads_our_output() {
        let buf = SampleBuffer::stereo(ramp(64), ramp(64), 48000);
        let wav = encode(&buf, BitDepth::Int24);

        let mut reader = hound::WavReader::new(std::io::Cursor::new(wav)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 48000);
        assert_eq!(spec.bits_per_sample, 24);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);

        let samples: Vec<i32> = reader.samples::<i32>().map(|s| s.unwrap()).collect();
        assert_eq!(samples.len(), 128);
        let (left, _) = buf.channel_slices();
        let expected = (left[0].clamp(-1.0, 1.0) * I24_SCALE).round() as i32;
        assert_eq!(samples[0], expected);
    }
}
