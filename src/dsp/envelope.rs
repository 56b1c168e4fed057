//! Attack/release fades with a raised-cosine shape — smoother than linear,
//! no clicks at the fade boundaries.

use serde::{Deserialize, Serialize};

use crate::error::AudioError;

/// Fade-in / fade-out durations. Each window is clamped to at most a
/// quarter of the buffer so the two can never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeSpec {
    #[serde(default = "default_fade")]
    pub attack_secs: f64,
    #[serde(default = "default_fade")]
    pub release_secs: f64,
}

fn default_fade() -> f64 {
    2.0
}

impl Default for EnvelopeSpec {
    fn default() -> Self {
        EnvelopeSpec { attack_secs: default_fade(), release_secs: default_fade() }
    }
}

impl EnvelopeSpec {
    pub fn validate(&self) -> Result<(), AudioError> {
        for (name, value) in [("attack_secs", self.attack_secs), ("release_secs", self.release_secs)] {
            if !value.is_finite() || value < 0.0 {
                return Err(AudioError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Apply the fades in place to one channel. Samples outside the attack
/// and release windows are left untouched.
pub fn apply(samples: &mut [f64], spec: &EnvelopeSpec, sample_rate: u32) -> Result<(), AudioError> {
    spec.validate()?;

    let attack = fade_samples(spec.attack_secs, sample_rate, samples.len());
    let release = fade_samples(spec.release_secs, sample_rate, samples.len());

    // Rising half-cosine: 0 at the first sample, 1 at the window's end.
    for i in 0..attack {
        let x = fade_position(i, attack);
        samples[i] *= 0.5 * (1.0 - (std::f64::consts::PI * x).cos());
    }

    // Falling half-cosine: 1 entering the window, 0 at the last sample.
    let start = samples.len() - release;
    for i in 0..release {
        let x = fade_position(i, release);
        samples[start + i] *= 0.5 * (1.0 + (std::f64::consts::PI * x).cos());
    }

    Ok(())
}

/// Window length in samples, clamped to a quarter of the buffer.
fn fade_samples(secs: f64, sample_rate: u32, buffer_len: usize) -> usize {
    let requested = (secs * sample_rate as f64) as usize;
    requested.min(buffer_len / 4)
}

/// Position within the fade in [0, 1], endpoint-inclusive.
fn fade_position(i: usize, len: usize) -> f64 {
    if len <= 1 { 0.0 } else { i as f64 / (len - 1) as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shaped(len: usize, spec: EnvelopeSpec, sample_rate: u32) -> Vec<f64> {
        let mut samples = vec![1.0; len];
        apply(&mut samples, &spec, sample_rate).unwrap();
        samples
    }

    #[test]
    fn endpoints_fade_to_zero() {
        let out = shaped(44100, EnvelopeSpec { attack_secs: 0.1, release_secs: 0.1 }, 44100);
        assert!(out[0].abs() < 1e-12, "first sample should be silent");
        assert!(out[out.len() - 1].abs() < 1e-12, "last sample should be silent");
    }

    #[test]
    fn middle_is_untouched() {
        let out = shaped(44100, EnvelopeSpec { attack_secs: 0.1, release_secs: 0.1 }, 44100);
        let attack = 4410;
        let release = 4410;
        for (i, &s) in out[attack..out.len() - release].iter().enumerate() {
            assert_eq!(s, 1.0, "sample {} inside the flat region changed", attack + i);
        }
    }

    #[test]
    fn fade_is_monotonic_and_smooth() {
        let out = shaped(44100, EnvelopeSpec { attack_secs: 0.1, release_secs: 0.1 }, 44100);
        for w in out[..4410].windows(2) {
            assert!(w[1] >= w[0], "attack must be non-decreasing");
        }
        // Raised cosine passes through 0.5 at the midpoint of the window.
        assert!((out[2205] - 0.5).abs() < 0.01);
    }

    #[test]
    fn long_fades_clamp_to_quarter_buffer() {
        // 10 s fades on a 1 s buffer clamp to len/4 each; the middle half
        // must stay flat.
        let out = shaped(44100, EnvelopeSpec { attack_secs: 10.0, release_secs: 10.0 }, 44100);
        let quarter = 44100 / 4;
        assert!(out[..quarter].iter().any(|&s| s < 1.0));
        assert!(out[quarter..3 * quarter].iter().all(|&s| s == 1.0));
        assert!(out[3 * quarter..].iter().any(|&s| s < 1.0));
    }

    #[test]
    fn zero_length_fades_are_noops() {
        let out = shaped(1000, EnvelopeSpec { attack_secs: 0.0, release_secs: 0.0 }, 44100);
        assert!(out.iter().all(|&s| s == 1.0));
    }

    #[test]
    fn negative_fade_is_rejected() {
        let mut samples = vec![1.0; 100];
        let err = apply(
            &mut samples,
            &EnvelopeSpec { attack_secs: -1.0, release_secs: 0.0 },
            44100,
        )
        .unwrap_err();
        assert!(matches!(err, AudioError::InvalidParameter { name: "attack_secs", .. }));
    }
}
