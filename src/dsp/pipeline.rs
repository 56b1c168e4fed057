//! Render pipeline — synthesis, shaping, normalization, optional mixing,
//! and encoding, in that fixed order. Every path either returns complete
//! WAV bytes or fails before producing anything.

use serde::{Deserialize, Serialize};

use crate::config::AudioConfig;
use crate::dsp::envelope::{self, EnvelopeSpec};
use crate::dsp::synth::{self, HarmonicProfile, WaveformKind, WaveformSpec};
use crate::dsp::{ChannelData, SampleBuffer, binaural, mixer, normalize};
use crate::error::AudioError;
use crate::presets::MixLevel;
use crate::wav;

/// Gains for the layered source: base tone on top, binaural underneath.
const LAYER_BASE_GAIN: f64 = 0.6;
const LAYER_BEAT_GAIN: f64 = 0.4;

/// What the pipeline synthesizes before shaping and encoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ToneSource {
    /// A single mono waveform.
    Tone { kind: WaveformKind },
    /// Stereo binaural pair: left at the carrier, right offset by the beat.
    Binaural {
        carrier_hz: f64,
        beat_hz: f64,
        #[serde(default)]
        harmonics: bool,
    },
    /// A base tone layered over a binaural pair on both channels.
    Layered {
        base_hz: f64,
        #[serde(default)]
        harmonics: bool,
        carrier_hz: f64,
        beat_hz: f64,
    },
}

/// Background noise color for the tone-only path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseKind {
    Pink,
    Brown,
}

/// A noise bed blended under the tone at a linear level in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseLayer {
    pub kind: NoiseKind,
    #[serde(default = "default_noise_level")]
    pub level: f64,
    #[serde(default)]
    pub seed: u64,
}

fn default_noise_level() -> f64 {
    0.1
}

/// A complete tone-only render request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderJob {
    pub source: ToneSource,
    pub duration_secs: f64,
    #[serde(default)]
    pub envelope: EnvelopeSpec,
    #[serde(default)]
    pub noise: Option<NoiseLayer>,
}

/// The orchestrator. Holds the immutable encoding configuration; every
/// render owns its buffers end-to-end and leaves no state behind.
#[derive(Debug, Clone)]
pub struct TonePipeline {
    config: AudioConfig,
}

impl TonePipeline {
    pub fn new(config: AudioConfig) -> Result<Self, AudioError> {
        config.validate()?;
        Ok(TonePipeline { config })
    }

    pub fn config(&self) -> &AudioConfig {
        &self.config
    }

    /// Tone-only path: synthesize, blend optional noise, fade, normalize
    /// to the configured peak, encode at the configured tier.
    pub fn render(&self, job: &RenderJob) -> Result<Vec<u8>, AudioError> {
        let sample_rate = self.config.sample_rate;
        let mut buffer = self.synthesize_source(&job.source, job.duration_secs, sample_rate)?;

        if let Some(noise) = &job.noise {
            blend_noise(&mut buffer, noise)?;
        }

        shape(&mut buffer, &job.envelope, sample_rate)?;
        buffer.for_each_channel(|ch| normalize::normalize(ch, self.config.target_db));

        Ok(wav::encode(&buffer, self.config.bit_depth))
    }

    /// Music-mix path: the tone follows the music's duration and sample
    /// rate, the dB-weighted mix is faded, and the mixer's clip guard —
    /// not peak normalization — owns the final level.
    pub fn render_with_music(
        &self,
        music: SampleBuffer,
        source: &ToneSource,
        level: MixLevel,
    ) -> Result<Vec<u8>, AudioError> {
        if music.frames() == 0 {
            return Err(AudioError::InvalidParameter { name: "music_frames", value: 0.0 });
        }
        let sample_rate = music.sample_rate;
        let duration_secs = music.duration_secs();
        let tone = self.synthesize_source(source, duration_secs, sample_rate)?;

        let mut mixed = mixer::mix(&[(music, level.music_db), (tone, level.tone_db)])?;
        shape(&mut mixed, &EnvelopeSpec::default(), sample_rate)?;

        Ok(wav::encode(&mixed, self.config.bit_depth))
    }

    /// Sequence path: consecutive sine segments, each faded, concatenated
    /// into one mono stream. The half-open time base keeps segment seams
    /// free of duplicated boundary samples.
    pub fn render_sequence(
        &self,
        segments: &[(f64, f64)],
        fade_secs: f64,
    ) -> Result<Vec<u8>, AudioError> {
        if segments.is_empty() {
            return Err(AudioError::InvalidParameter { name: "segments", value: 0.0 });
        }
        let fade = EnvelopeSpec { attack_secs: fade_secs, release_secs: fade_secs };
        fade.validate()?;

        let sample_rate = self.config.sample_rate;
        let mut all = Vec::new();
        for &(frequency_hz, duration_secs) in segments {
            let mut segment = synth::synthesize(
                &WaveformSpec { kind: WaveformKind::Sine { frequency_hz }, duration_secs },
                sample_rate,
            )?;
            envelope::apply(&mut segment, &fade, sample_rate)?;
            if all.len() + segment.len() > synth::MAX_RENDER_SAMPLES {
                return Err(AudioError::ResourceExhausted {
                    requested_samples: all.len() + segment.len(),
                });
            }
            all.extend_from_slice(&segment);
        }

        normalize::normalize(&mut all, self.config.target_db);
        Ok(wav::encode(&SampleBuffer::mono(all, sample_rate), self.config.bit_depth))
    }

    /// Root-to-crown chakra meditation: the full solfeggio chakra ladder
    /// at equal durations with 3-second fades.
    pub fn render_chakra_meditation(&self, secs_per_chakra: f64) -> Result<Vec<u8>, AudioError> {
        let segments: Vec<(f64, f64)> = crate::presets::CHAKRA_SEQUENCE
            .iter()
            .map(|&f| (f, secs_per_chakra))
            .collect();
        self.render_sequence(&segments, 3.0)
    }

    fn synthesize_source(
        &self,
        source: &ToneSource,
        duration_secs: f64,
        sample_rate: u32,
    ) -> Result<SampleBuffer, AudioError> {
        match *source {
            ToneSource::Tone { kind } => {
                let samples =
                    synth::synthesize(&WaveformSpec { kind, duration_secs }, sample_rate)?;
                Ok(SampleBuffer::mono(samples, sample_rate))
            }
            ToneSource::Binaural { carrier_hz, beat_hz, harmonics } => {
                let (left, right) =
                    binaural::generate(carrier_hz, beat_hz, duration_secs, sample_rate, harmonics)?;
                Ok(SampleBuffer::stereo(left, right, sample_rate))
            }
            ToneSource::Layered { base_hz, harmonics, carrier_hz, beat_hz } => {
                let base_kind = if harmonics {
                    WaveformKind::Harmonic { frequency_hz: base_hz, profile: HarmonicProfile::Warm }
                } else {
                    WaveformKind::Sine { frequency_hz: base_hz }
                };
                let base = synth::synthesize(
                    &WaveformSpec { kind: base_kind, duration_secs },
                    sample_rate,
                )?;
                let (beat_left, beat_right) =
                    binaural::generate(carrier_hz, beat_hz, duration_secs, sample_rate, false)?;

                let layer = |beat: &[f64]| -> Vec<f64> {
                    base.iter()
                        .zip(beat)
                        .map(|(b, t)| LAYER_BASE_GAIN * b + LAYER_BEAT_GAIN * t)
                        .collect()
                };
                Ok(SampleBuffer::stereo(layer(&beat_left), layer(&beat_right), sample_rate))
            }
        }
    }
}

/// Apply the fades channel by channel.
fn shape(buffer: &mut SampleBuffer, spec: &EnvelopeSpec, sample_rate: u32) -> Result<(), AudioError> {
    match &mut buffer.channels {
        ChannelData::Mono(samples) => envelope::apply(samples, spec, sample_rate),
        ChannelData::Stereo { left, right } => {
            envelope::apply(left, spec, sample_rate)?;
            envelope::apply(right, spec, sample_rate)
        }
    }
}

/// Blend a noise bed under every channel:
/// `sample = (1 - level) * sample + level * noise`. The same noise run
/// feeds both stereo channels, so the bed stays centered.
fn blend_noise(buffer: &mut SampleBuffer, layer: &NoiseLayer) -> Result<(), AudioError> {
    if !layer.level.is_finite() || !(0.0..=1.0).contains(&layer.level) {
        return Err(AudioError::InvalidParameter { name: "noise_level", value: layer.level });
    }

    let kind = match layer.kind {
        NoiseKind::Pink => WaveformKind::PinkNoise { seed: layer.seed },
        NoiseKind::Brown => WaveformKind::BrownNoise { seed: layer.seed },
    };
    // Reconstruct the exact frame count from the buffer's own duration.
    let duration_secs = buffer.frames() as f64 / buffer.sample_rate as f64;
    let noise = synth::synthesize(&WaveformSpec { kind, duration_secs }, buffer.sample_rate)?;
    debug_assert_eq!(noise.len(), buffer.frames());

    let level = layer.level;
    buffer.for_each_channel(|ch| {
        for (s, n) in ch.iter_mut().zip(&noise) {
            *s = (1.0 - level) * *s + level * n;
        }
    });
    Ok(())
}
