//! Binaural beat pairs — left ear at the carrier, right ear offset by the
//! beat frequency. The channels never interact; the "beat" only exists in
//! the listener's head.

use crate::dsp::synth::{self, HarmonicProfile, WaveformKind, WaveformSpec};
use crate::error::{AudioError, require_positive};

/// Generate a `(left, right)` pair of equal length. `harmonics` switches
/// both channels from pure sine to the warm harmonic stack.
pub fn generate(
    carrier_hz: f64,
    beat_hz: f64,
    duration_secs: f64,
    sample_rate: u32,
    harmonics: bool,
) -> Result<(Vec<f64>, Vec<f64>), AudioError> {
    require_positive("beat_hz", beat_hz)?;

    let kind = |frequency_hz| {
        if harmonics {
            WaveformKind::Harmonic { frequency_hz, profile: HarmonicProfile::Warm }
        } else {
            WaveformKind::Sine { frequency_hz }
        }
    };

    let left = synth::synthesize(&WaveformSpec { kind: kind(carrier_hz), duration_secs }, sample_rate)?;
    let right = synth::synthesize(
        &WaveformSpec { kind: kind(carrier_hz + beat_hz), duration_secs },
        sample_rate,
    )?;
    Ok((left, right))
}
