//! Decibel-weighted stream mixing with a clip guard.
//!
//! The mixer is the only stage that combines independently-normalized
//! sources, so it owns the final anti-clipping guarantee.

use crate::dsp::normalize::{db_to_amplitude, peak};
use crate::dsp::{ChannelData, SampleBuffer};
use crate::error::{AudioError, require_finite};

/// Peak magnitude above which the mix is rescaled down.
const CLIP_GUARD: f64 = 0.99;

/// Mix an arbitrary set of `(stream, gain_db)` pairs into one stereo
/// buffer. Mono streams are broadcast to both channels; all streams are
/// truncated to the shortest one (no padding, no looping). If the summed
/// peak exceeds 0.99 the whole mix is scaled down by `0.99 / peak`,
/// preserving the balance between streams.
pub fn mix(streams: &[(SampleBuffer, f64)]) -> Result<SampleBuffer, AudioError> {
    if streams.is_empty() {
        return Err(AudioError::InvalidParameter { name: "streams", value: 0.0 });
    }
    for (_, gain_db) in streams {
        require_finite("gain_db", *gain_db)?;
    }
    let sample_rate = streams[0].0.sample_rate;
    for (buffer, _) in streams {
        if buffer.sample_rate != sample_rate {
            // No resampling here; callers generate tones at the music's rate.
            return Err(AudioError::InvalidParameter {
                name: "sample_rate",
                value: buffer.sample_rate as f64,
            });
        }
    }

    let frames = streams.iter().map(|(b, _)| b.frames()).min().unwrap_or(0);
    let mut left = vec![0.0f64; frames];
    let mut right = vec![0.0f64; frames];

    for (buffer, gain_db) in streams {
        let amp = db_to_amplitude(*gain_db);
        let (src_left, src_right) = buffer.channel_slices();
        for i in 0..frames {
            left[i] += amp * src_left[i];
            right[i] += amp * src_right[i];
        }
    }

    let mix_peak = peak(&left).max(peak(&right));
    if mix_peak > CLIP_GUARD {
        let gain = CLIP_GUARD / mix_peak;
        for s in left.iter_mut().chain(right.iter_mut()) {
            *s *= gain;
        }
    }

    Ok(SampleBuffer {
        sample_rate,
        channels: ChannelData::Stereo { left, right },
    })
}
