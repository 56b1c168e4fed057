//! Peak normalization to a dBFS target.

/// Convert decibels (relative to full scale) to a linear amplitude.
pub fn db_to_amplitude(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

/// Peak absolute sample value. Zero for an empty buffer.
pub fn peak(samples: &[f64]) -> f64 {
    samples.iter().fold(0.0f64, |m, s| m.max(s.abs()))
}

/// Rescale so the peak lands at `target_db` dBFS. A silent buffer is
/// left unchanged — that is not an error. Must run after envelope
/// shaping, since fades move the peak.
pub fn normalize(samples: &mut [f64], target_db: f64) {
    let current = peak(samples);
    if current > 0.0 {
        let gain = db_to_amplitude(target_db) / current;
        for s in samples.iter_mut() {
            *s *= gain;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_conversion_reference_points() {
        assert!((db_to_amplitude(0.0) - 1.0).abs() < 1e-12);
        assert!((db_to_amplitude(-6.0) - 0.501187).abs() < 1e-6);
        assert!((db_to_amplitude(-20.0) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn normalizes_to_target_peak() {
        for target_db in [-0.1, -1.0, -6.0, -24.0] {
            let mut samples = vec![0.0, 0.25, -0.6, 0.3];
            normalize(&mut samples, target_db);
            let expected = db_to_amplitude(target_db);
            assert!(
                (peak(&samples) - expected).abs() < 1e-12,
                "target {target_db} dB: peak {} vs {expected}",
                peak(&samples)
            );
        }
    }

    #[test]
    fn amplifies_quiet_buffers_too() {
        let mut samples = vec![0.001, -0.0005];
        normalize(&mut samples, -1.0);
        assert!((peak(&samples) - db_to_amplitude(-1.0)).abs() < 1e-12);
    }

    #[test]
    fn silent_buffer_is_unchanged() {
        let mut samples = vec![0.0; 64];
        normalize(&mut samples, -1.0);
        assert!(samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn relative_balance_is_preserved() {
        let mut samples = vec![0.5, -0.25];
        normalize(&mut samples, 0.0);
        assert!((samples[0] - 1.0).abs() < 1e-12);
        assert!((samples[1] + 0.5).abs() < 1e-12);
    }
}
