pub mod config;
pub mod dsp;
pub mod error;
#[cfg(feature = "media")]
pub mod media;
pub mod presets;
pub mod wav;

use crate::config::AudioQuality;
use crate::dsp::pipeline::{RenderJob, TonePipeline};
use crate::error::AudioError;
use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// Render a tone job to WAV bytes at the given quality tier.
pub fn render_tone(job: &RenderJob, quality: AudioQuality) -> Result<Vec<u8>, AudioError> {
    TonePipeline::new(quality.config())?.render(job)
}

/// Render a tone job described as JSON. Convenience surface for CLI and
/// scripting callers.
pub fn render_tone_json(job_json: &str, quality: AudioQuality) -> Result<Vec<u8>, String> {
    let job: RenderJob = serde_json::from_str(job_json).map_err(|e| format!("{e}"))?;
    render_tone(&job, quality).map_err(|e| format!("{e}"))
}

/// WASM-exposed: render a tone job (as a JS object) to a WAV byte array.
#[wasm_bindgen]
pub fn render_tone_wav(job: JsValue, quality: &str) -> Result<Vec<u8>, JsValue> {
    let quality = AudioQuality::from_name(quality)
        .ok_or_else(|| JsValue::from_str(&format!("unknown quality tier: {quality}")))?;
    let job: RenderJob =
        serde_wasm_bindgen::from_value(job).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    render_tone(&job, quality).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: render a curated session preset to a WAV byte array.
/// `duration_secs <= 0` falls back to the preset's own duration.
#[wasm_bindgen]
pub fn render_session_wav(name: &str, quality: &str, duration_secs: f64) -> Result<Vec<u8>, JsValue> {
    let quality = AudioQuality::from_name(quality)
        .ok_or_else(|| JsValue::from_str(&format!("unknown quality tier: {quality}")))?;
    let preset = presets::session(name)
        .ok_or_else(|| JsValue::from_str(&format!("unknown session preset: {name}")))?;
    let job = RenderJob {
        source: preset.source,
        duration_secs: if duration_secs > 0.0 { duration_secs } else { preset.duration_secs },
        envelope: Default::default(),
        noise: None,
    };
    render_tone(&job, quality).map_err(|e| JsValue::from_str(&format!("{e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_surface_renders_a_valid_file() {
        let wav = render_tone_json(
            r#"{
                "source": {"type": "tone", "kind": {"kind": "sine", "frequency_hz": 528.0}},
                "duration_secs": 0.5
            }"#,
            AudioQuality::Standard,
        )
        .unwrap();
        assert_eq!(&wav[0..4], b"RIFF");
        let decoded = wav::decode(&wav).unwrap();
        assert_eq!(decoded.frames(), 22050);
    }

    #[test]
    fn json_surface_reports_bad_jobs() {
        let err = render_tone_json(
            r#"{"source": {"type": "tone", "kind": {"kind": "sine", "frequency_hz": -1.0}},
                "duration_secs": 0.5}"#,
            AudioQuality::Standard,
        )
        .unwrap_err();
        assert!(err.contains("frequency_hz"), "got: {err}");
    }
}
