//! Waveform synthesis — pure tones, harmonic stacks, colored noise, and
//! isochronic pulses.
//!
//! Every generator samples the half-open interval `[0, duration)` at
//! `t = i / sample_rate`, so consecutive renders concatenate without a
//! duplicated boundary sample.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{AudioError, require_positive};

/// Hard cap on mono samples per render. Stands in for allocation failure,
/// which Rust would otherwise turn into an abort.
pub const MAX_RENDER_SAMPLES: usize = 1 << 30;

/// Harmonic overtone profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarmonicProfile {
    /// Even harmonics (2nd, 4th, 6th) — warm, musical.
    Warm,
    /// Odd harmonics (3rd, 5th, 7th) — brighter, more present.
    Bright,
    /// Harmonics 2..=8 with 1/n^1.5 rolloff, like acoustic instruments.
    Natural,
}

impl HarmonicProfile {
    /// `(harmonic number, weight)` pairs added on top of the fundamental.
    fn weights(self) -> Vec<(u32, f64)> {
        match self {
            HarmonicProfile::Warm => vec![(2, 0.5), (4, 0.25), (6, 0.125)],
            HarmonicProfile::Bright => vec![(3, 0.33), (5, 0.2), (7, 0.14)],
            HarmonicProfile::Natural => {
                (2..=8).map(|n| (n, 1.0 / f64::from(n).powf(1.5))).collect()
            }
        }
    }
}

/// What to synthesize. A closed set: every kind carries exactly the
/// parameters it needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum WaveformKind {
    Sine {
        frequency_hz: f64,
    },
    Harmonic {
        frequency_hz: f64,
        profile: HarmonicProfile,
    },
    /// First-order leaky-integrator pink noise. Approximates a 1/f
    /// spectrum cheaply; not Voss-McCartney-accurate.
    PinkNoise {
        #[serde(default)]
        seed: u64,
    },
    /// Random-walk (integrated white) noise, peak-rescaled.
    BrownNoise {
        #[serde(default)]
        seed: u64,
    },
    /// Carrier sine amplitude-modulated by a raised-cosine pulse train.
    Isochronic {
        frequency_hz: f64,
        pulse_hz: f64,
    },
}

/// A complete synthesis request: kind plus duration. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveformSpec {
    #[serde(flatten)]
    pub kind: WaveformKind,
    pub duration_secs: f64,
}

/// Synthesize a mono buffer. Sample count is `round(sample_rate * duration)`.
/// All parameters are validated before any allocation.
pub fn synthesize(spec: &WaveformSpec, sample_rate: u32) -> Result<Vec<f64>, AudioError> {
    match spec.kind {
        WaveformKind::Sine { frequency_hz } | WaveformKind::Harmonic { frequency_hz, .. } => {
            require_positive("frequency_hz", frequency_hz)?;
        }
        WaveformKind::Isochronic { frequency_hz, pulse_hz } => {
            require_positive("frequency_hz", frequency_hz)?;
            require_positive("pulse_hz", pulse_hz)?;
        }
        WaveformKind::PinkNoise { .. } | WaveformKind::BrownNoise { .. } => {}
    }
    let n = sample_count(spec.duration_secs, sample_rate)?;

    Ok(match spec.kind {
        WaveformKind::Sine { frequency_hz } => sine(frequency_hz, n, sample_rate),
        WaveformKind::Harmonic { frequency_hz, profile } => {
            harmonic(frequency_hz, profile, n, sample_rate)
        }
        WaveformKind::PinkNoise { seed } => pink_noise(seed, n),
        WaveformKind::BrownNoise { seed } => brown_noise(seed, n),
        WaveformKind::Isochronic { frequency_hz, pulse_hz } => {
            isochronic(frequency_hz, pulse_hz, n, sample_rate)
        }
    })
}

/// Validate duration/sample rate and convert to a sample count.
pub fn sample_count(duration_secs: f64, sample_rate: u32) -> Result<usize, AudioError> {
    require_positive("duration_secs", duration_secs)?;
    if sample_rate == 0 {
        return Err(AudioError::InvalidParameter { name: "sample_rate", value: 0.0 });
    }
    let n = (sample_rate as f64 * duration_secs).round() as usize;
    if n > MAX_RENDER_SAMPLES {
        return Err(AudioError::ResourceExhausted { requested_samples: n });
    }
    Ok(n)
}

fn sine(frequency_hz: f64, n: usize, sample_rate: u32) -> Vec<f64> {
    let omega = 2.0 * PI * frequency_hz / sample_rate as f64;
    (0..n).map(|i| (omega * i as f64).sin()).collect()
}

/// Fundamental plus profile-weighted overtones. The sum is returned
/// unnormalized — peaks above 1.0 are expected and resolved downstream.
fn harmonic(frequency_hz: f64, profile: HarmonicProfile, n: usize, sample_rate: u32) -> Vec<f64> {
    let weights = profile.weights();
    let omega = 2.0 * PI * frequency_hz / sample_rate as f64;
    (0..n)
        .map(|i| {
            let phase = omega * i as f64;
            let mut sample = phase.sin();
            for &(harmonic_n, weight) in &weights {
                sample += weight * (phase * f64::from(harmonic_n)).sin();
            }
            sample
        })
        .collect()
}

/// Seeded white noise, uniform in [-1, 1).
fn white_noise(seed: u64, n: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

fn pink_noise(seed: u64, n: usize) -> Vec<f64> {
    let white = white_noise(seed, n);
    let mut pink = Vec::with_capacity(n);
    let mut prev = 0.0;
    for (i, &w) in white.iter().enumerate() {
        let value = if i == 0 { w } else { 0.99 * prev + w };
        pink.push(value);
        prev = value;
    }
    rescale_to_unit_peak(&mut pink);
    pink
}

fn brown_noise(seed: u64, n: usize) -> Vec<f64> {
    let white = white_noise(seed, n);
    let mut brown = Vec::with_capacity(n);
    let mut sum = 0.0;
    for w in white {
        sum += w;
        brown.push(sum);
    }
    rescale_to_unit_peak(&mut brown);
    brown
}

fn isochronic(frequency_hz: f64, pulse_hz: f64, n: usize, sample_rate: u32) -> Vec<f64> {
    let carrier_omega = 2.0 * PI * frequency_hz / sample_rate as f64;
    let pulse_omega = 2.0 * PI * pulse_hz / sample_rate as f64;
    (0..n)
        .map(|i| {
            let t = i as f64;
            let carrier = (carrier_omega * t).sin();
            // Raised-cosine pulse: smooth on/off without harsh edges.
            let pulse = 0.5 * (1.0 + (pulse_omega * t).cos());
            carrier * pulse
        })
        .collect()
}

fn rescale_to_unit_peak(samples: &mut [f64]) {
    let peak = crate::dsp::normalize::peak(samples);
    if peak > 0.0 {
        for s in samples.iter_mut() {
            *s /= peak;
        }
    }
}
