//! DSP core — waveform synthesis, shaping, mixing, and the render pipeline.
//!
//! All DSP runs on `f64` buffers for deterministic, cross-platform output.
//! The same code powers the WASM surface and offline WAV rendering.

pub mod binaural;
pub mod envelope;
pub mod mixer;
pub mod normalize;
pub mod pipeline;
pub mod synth;

/// Per-channel sample storage. Stereo is kept as two paired mono
/// channels; interleaving only happens at the codec edge.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelData {
    Mono(Vec<f64>),
    Stereo { left: Vec<f64>, right: Vec<f64> },
}

/// An owned buffer of float samples in [-1.0, 1.0] (values may exceed
/// the range transiently before normalization or the mixer's clip guard),
/// tagged with its sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    pub sample_rate: u32,
    pub channels: ChannelData,
}

impl SampleBuffer {
    pub fn mono(samples: Vec<f64>, sample_rate: u32) -> Self {
        SampleBuffer {
            sample_rate,
            channels: ChannelData::Mono(samples),
        }
    }

    /// Both channels must be the same length.
    pub fn stereo(left: Vec<f64>, right: Vec<f64>, sample_rate: u32) -> Self {
        debug_assert_eq!(left.len(), right.len());
        SampleBuffer {
            sample_rate,
            channels: ChannelData::Stereo { left, right },
        }
    }

    pub fn channel_count(&self) -> u16 {
        match &self.channels {
            ChannelData::Mono(_) => 1,
            ChannelData::Stereo { .. } => 2,
        }
    }

    /// Number of sample frames (per-channel samples).
    pub fn frames(&self) -> usize {
        match &self.channels {
            ChannelData::Mono(s) => s.len(),
            ChannelData::Stereo { left, .. } => left.len(),
        }
    }

    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Peak absolute sample value across all channels.
    pub fn peak(&self) -> f64 {
        match &self.channels {
            ChannelData::Mono(s) => normalize::peak(s),
            ChannelData::Stereo { left, right } => {
                normalize::peak(left).max(normalize::peak(right))
            }
        }
    }

    /// Run a transformation over each channel independently.
    pub fn for_each_channel<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut [f64]),
    {
        match &mut self.channels {
            ChannelData::Mono(s) => f(s),
            ChannelData::Stereo { left, right } => {
                f(left);
                f(right);
            }
        }
    }

    /// Read-only view of the channels: `(left, right)`, with mono
    /// broadcast to both sides.
    pub fn channel_slices(&self) -> (&[f64], &[f64]) {
        match &self.channels {
            ChannelData::Mono(s) => (s, s),
            ChannelData::Stereo { left, right } => (left, right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_metadata() {
        let buf = SampleBuffer::mono(vec![0.0; 44100], 44100);
        assert_eq!(buf.channel_count(), 1);
        assert_eq!(buf.frames(), 44100);
        assert!((buf.duration_secs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn stereo_peak_covers_both_channels() {
        let buf = SampleBuffer::stereo(vec![0.1, -0.2], vec![0.0, 0.7], 48000);
        assert_eq!(buf.channel_count(), 2);
        assert_eq!(buf.peak(), 0.7);
    }

    #[test]
    fn mono_broadcasts_to_both_slices() {
        let buf = SampleBuffer::mono(vec![0.5], 44100);
        let (l, r) = buf.channel_slices();
        assert_eq!(l, r);
    }

    #[test]
    fn for_each_channel_visits_both() {
        let mut buf = SampleBuffer::stereo(vec![1.0; 4], vec![1.0; 4], 44100);
        buf.for_each_channel(|ch| {
            for s in ch.iter_mut() {
                *s *= 0.5;
            }
        });
        assert_eq!(buf.peak(), 0.5);
    }
}
