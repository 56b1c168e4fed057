//! Compressed-audio decoding for the music-mix path.
//!
//! MP3 input is decoded in-process with minimp3; the rest of the core
//! only ever sees the resulting float buffer. Decoder failures surface
//! as `ExternalDecode` and are never retried — a failing decode is
//! deterministic.

use minimp3::{Decoder, Error, Frame};

use crate::dsp::{ChannelData, SampleBuffer};
use crate::error::{AudioError, FormatError};

/// Decode an MP3 byte stream into a normalized float buffer.
pub fn decode_mp3(bytes: &[u8]) -> Result<SampleBuffer, AudioError> {
    let mut decoder = Decoder::new(bytes);
    let mut pcm: Vec<i16> = Vec::new();
    let mut channels: usize = 0;
    let mut sample_rate: u32 = 0;

    loop {
        match decoder.next_frame() {
            Ok(Frame { data, sample_rate: rate, channels: ch, .. }) => {
                if channels == 0 {
                    channels = ch;
                    sample_rate = rate as u32;
                } else if ch != channels {
                    return Err(AudioError::ExternalDecode {
                        detail: format!("channel count changed mid-stream ({channels} -> {ch})"),
                    });
                }
                pcm.extend_from_slice(&data);
            }
            Err(Error::Eof) => break,
            Err(Error::SkippedData) => continue,
            Err(e) => {
                return Err(AudioError::ExternalDecode { detail: format!("{e:?}") });
            }
        }
    }

    if pcm.is_empty() {
        return Err(AudioError::ExternalDecode { detail: "no audio frames in stream".into() });
    }
    if channels > 2 {
        return Err(FormatError::ChannelCount { channels: channels as u16 }.into());
    }

    let to_float = |s: i16| s as f64 / 32768.0;
    let channel_data = if channels == 2 {
        let frames = pcm.len() / 2;
        let mut left = Vec::with_capacity(frames);
        let mut right = Vec::with_capacity(frames);
        for pair in pcm.chunks_exact(2) {
            left.push(to_float(pair[0]));
            right.push(to_float(pair[1]));
        }
        ChannelData::Stereo { left, right }
    } else {
        ChannelData::Mono(pcm.into_iter().map(to_float).collect())
    };

    Ok(SampleBuffer { sample_rate, channels: channel_data })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_fail_as_external_decode() {
        let err = decode_mp3(&[0u8; 64]).unwrap_err();
        assert!(matches!(err, AudioError::ExternalDecode { .. }));
    }

    #[test]
    fn empty_input_fails() {
        assert!(decode_mp3(&[]).is_err());
    }
}
