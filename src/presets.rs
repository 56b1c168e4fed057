//! Frequency, brainwave, session, and mix-level lookup tables.
//!
//! These are the parameter sources the pipeline is driven from. Closed
//! static tables, so an unknown preset is a `None` at the lookup, never
//! a failure deep inside the render.

use serde::{Deserialize, Serialize};

use crate::dsp::pipeline::ToneSource;

// ── Solfeggio & single frequencies ──────────────────────────

/// A solfeggio frequency with its traditional attribution and the state
/// of the evidence behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolfeggioTone {
    pub frequency_hz: f64,
    pub name: &'static str,
    pub effect: &'static str,
    pub evidence: &'static str,
}

pub const SOLFEGGIO: &[SolfeggioTone] = &[
    SolfeggioTone { frequency_hz: 174.0, name: "Foundation", effect: "Pain reduction, security", evidence: "Anecdotal" },
    SolfeggioTone { frequency_hz: 285.0, name: "Quantum", effect: "Tissue healing, safety", evidence: "Anecdotal" },
    SolfeggioTone { frequency_hz: 396.0, name: "Liberation", effect: "Release fear and guilt", evidence: "Anecdotal" },
    SolfeggioTone { frequency_hz: 417.0, name: "Change", effect: "Facilitate change, clear trauma", evidence: "Anecdotal" },
    SolfeggioTone { frequency_hz: 528.0, name: "Love/Miracle", effect: "DNA repair, stress reduction", evidence: "Preliminary studies (SCIRP 87146)" },
    SolfeggioTone { frequency_hz: 639.0, name: "Connection", effect: "Relationships, communication", evidence: "Anecdotal" },
    SolfeggioTone { frequency_hz: 741.0, name: "Awakening", effect: "Intuition, expression", evidence: "Anecdotal" },
    SolfeggioTone { frequency_hz: 852.0, name: "Intuition", effect: "Spiritual order", evidence: "Anecdotal" },
    SolfeggioTone { frequency_hz: 963.0, name: "Divine", effect: "Pineal activation, oneness", evidence: "Anecdotal" },
];

pub fn solfeggio(frequency_hz: f64) -> Option<&'static SolfeggioTone> {
    SOLFEGGIO.iter().find(|t| t.frequency_hz == frequency_hz)
}

/// A frequency with published research behind it, as opposed to the
/// traditional solfeggio attributions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvidenceBasedTone {
    pub frequency_hz: f64,
    pub name: &'static str,
    pub effect: &'static str,
    pub evidence: &'static str,
    pub quality: &'static str,
}

pub const EVIDENCE_BASED: &[EvidenceBasedTone] = &[
    EvidenceBasedTone {
        frequency_hz: 432.0,
        name: "Verdi A / Universal",
        effect: "Reduced heart rate, lower blood pressure, improved sleep",
        evidence: "Multiple RCTs (PubMed 31031095, 35545982)",
        quality: "Strong preliminary evidence",
    },
    EvidenceBasedTone {
        frequency_hz: 528.0,
        name: "Love Frequency",
        effect: "Cortisol reduction, oxytocin increase, anxiety reduction",
        evidence: "Japanese study 2018, SCIRP 87146",
        quality: "Moderate preliminary evidence",
    },
    EvidenceBasedTone {
        frequency_hz: 40.0,
        name: "Gamma entrainment",
        effect: "Improved attention, cognitive performance",
        evidence: "Scientific Reports 2025, PMC11799511",
        quality: "Strong evidence for brain entrainment",
    },
];

pub fn evidence_based(frequency_hz: f64) -> Option<&'static EvidenceBasedTone> {
    EVIDENCE_BASED.iter().find(|t| t.frequency_hz == frequency_hz)
}

/// Named healing frequencies (Schumann resonance, Om, chakra tones).
pub const HEALING_FREQUENCIES: &[(&str, f64)] = &[
    ("earth", 7.83),
    ("om", 136.1),
    ("love", 528.0),
    ("universal", 432.0),
    ("crown", 963.0),
    ("third_eye", 852.0),
    ("throat", 741.0),
    ("heart", 639.0),
    ("solar", 528.0),
    ("sacral", 417.0),
    ("root", 396.0),
];

pub fn healing_frequency(name: &str) -> Option<f64> {
    HEALING_FREQUENCIES.iter().find(|(n, _)| *n == name).map(|&(_, f)| f)
}

/// Root-to-crown chakra tone sequence, used by the sequence renderer.
pub const CHAKRA_SEQUENCE: [f64; 7] = [396.0, 417.0, 528.0, 639.0, 741.0, 852.0, 963.0];

// ── Brainwave entrainment ───────────────────────────────────

/// A brainwave band with its research-optimal beat and carrier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrainwavePreset {
    pub name: &'static str,
    /// Band limits in Hz.
    pub range_hz: (f64, f64),
    /// Optimal beat frequency within the band.
    pub beat_hz: f64,
    pub carrier_hz: f64,
    pub effect: &'static str,
}

pub const BRAINWAVE_PRESETS: &[BrainwavePreset] = &[
    BrainwavePreset { name: "delta", range_hz: (0.5, 4.0), beat_hz: 2.0, carrier_hz: 200.0, effect: "Deep sleep, healing, regeneration" },
    BrainwavePreset { name: "theta", range_hz: (4.0, 8.0), beat_hz: 6.0, carrier_hz: 300.0, effect: "Meditation, creativity, REM sleep" },
    BrainwavePreset { name: "alpha", range_hz: (8.0, 13.0), beat_hz: 10.0, carrier_hz: 400.0, effect: "Relaxation, calm focus, stress relief" },
    BrainwavePreset { name: "beta", range_hz: (13.0, 30.0), beat_hz: 18.0, carrier_hz: 400.0, effect: "Focus, alertness, concentration" },
    BrainwavePreset { name: "gamma", range_hz: (30.0, 100.0), beat_hz: 40.0, carrier_hz: 300.0, effect: "Peak cognition, insight, memory" },
    BrainwavePreset { name: "schumann", range_hz: (4.0, 8.0), beat_hz: 7.83, carrier_hz: 432.0, effect: "Earth grounding, theta state" },
];

pub fn brainwave(name: &str) -> Option<&'static BrainwavePreset> {
    BRAINWAVE_PRESETS.iter().find(|p| p.name == name)
}

impl BrainwavePreset {
    /// Binaural tone source at this band's optimal parameters.
    pub fn source(&self, harmonics: bool) -> ToneSource {
        ToneSource::Binaural {
            carrier_hz: self.carrier_hz,
            beat_hz: self.beat_hz,
            harmonics,
        }
    }
}

// ── Mix levels ──────────────────────────────────────────────

/// Gains for mixing music against a generated tone, in dBFS.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixLevel {
    pub music_db: f64,
    pub tone_db: f64,
}

/// A named mixing level with its listening rationale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedMixLevel {
    pub name: &'static str,
    pub level: MixLevel,
    pub description: &'static str,
}

pub const MIX_LEVELS: &[NamedMixLevel] = &[
    NamedMixLevel {
        name: "dominant",
        level: MixLevel { music_db: -6.0, tone_db: -3.0 },
        description: "Frequency is clearly audible, leads the mix",
    },
    NamedMixLevel {
        name: "balanced",
        level: MixLevel { music_db: -3.0, tone_db: -6.0 },
        description: "Equal presence of music and frequency",
    },
    NamedMixLevel {
        name: "subtle",
        level: MixLevel { music_db: 0.0, tone_db: -12.0 },
        description: "Music leads, frequency adds texture",
    },
    NamedMixLevel {
        name: "subliminal",
        level: MixLevel { music_db: 0.0, tone_db: -24.0 },
        description: "Frequency below conscious hearing",
    },
    NamedMixLevel {
        name: "binaural-optimal",
        level: MixLevel { music_db: -3.0, tone_db: -9.0 },
        description: "Research-optimal level for binaural entrainment",
    },
];

pub fn mix_level(name: &str) -> Option<MixLevel> {
    MIX_LEVELS.iter().find(|l| l.name == name).map(|l| l.level)
}

// ── Curated sessions ────────────────────────────────────────

/// A ready-to-render session: tone source plus intended duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionPreset {
    pub name: &'static str,
    pub description: &'static str,
    pub source: ToneSource,
    pub duration_secs: f64,
}

pub const SESSION_PRESETS: &[SessionPreset] = &[
    SessionPreset {
        name: "morning-focus",
        description: "Alpha-beta transition for morning alertness",
        source: ToneSource::Binaural { carrier_hz: 432.0, beat_hz: 12.0, harmonics: true },
        duration_secs: 900.0,
    },
    SessionPreset {
        name: "deep-meditation",
        description: "Theta state for deep meditation",
        source: ToneSource::Binaural { carrier_hz: 432.0, beat_hz: 6.0, harmonics: true },
        duration_secs: 1200.0,
    },
    SessionPreset {
        name: "sleep-induction",
        description: "Delta waves for sleep onset",
        source: ToneSource::Binaural { carrier_hz: 200.0, beat_hz: 2.0, harmonics: false },
        duration_secs: 1800.0,
    },
    SessionPreset {
        name: "stress-relief",
        description: "528 Hz with alpha binaural for anxiety reduction",
        source: ToneSource::Layered { base_hz: 528.0, harmonics: true, carrier_hz: 432.0, beat_hz: 10.0 },
        duration_secs: 600.0,
    },
    SessionPreset {
        name: "creativity-boost",
        description: "Theta-alpha border for creative flow",
        source: ToneSource::Binaural { carrier_hz: 432.0, beat_hz: 7.83, harmonics: true },
        duration_secs: 900.0,
    },
    SessionPreset {
        name: "heart-coherence",
        description: "639 Hz heart chakra with alpha",
        source: ToneSource::Layered { base_hz: 639.0, harmonics: true, carrier_hz: 432.0, beat_hz: 10.0 },
        duration_secs: 600.0,
    },
];

pub fn session(name: &str) -> Option<&'static SessionPreset> {
    SESSION_PRESETS.iter().find(|p| p.name == name)
}
