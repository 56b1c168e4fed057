//! Output quality tiers and the encoding configuration they expand to.
//!
//! The tier table is an explicit immutable value handed to the pipeline —
//! there are no process-wide defaults.

use serde::{Deserialize, Serialize};

use crate::error::AudioError;

/// Named output quality tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioQuality {
    /// 16-bit / 44100 Hz.
    Standard,
    /// 24-bit / 48000 Hz.
    High,
    /// "32-bit float" / 96000 Hz. See [`BitDepth::Float32`].
    Pro,
}

/// Sample width of the encoded PCM stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BitDepth {
    Int16,
    Int24,
    /// The float tier is written as 24-bit PCM: the container has no
    /// native float sample type, so float quality collapses to Int24 on
    /// disk. Kept as a distinct variant for tier reporting.
    Float32,
}

impl BitDepth {
    /// Bytes per encoded sample.
    pub fn sample_width(self) -> u16 {
        match self {
            BitDepth::Int16 => 2,
            BitDepth::Int24 | BitDepth::Float32 => 3,
        }
    }

    /// Bits declared in the container header.
    pub fn header_bits(self) -> u16 {
        self.sample_width() * 8
    }
}

/// Encoding configuration for one output file: sample rate, bit depth,
/// and the peak level the normalizer aims for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    pub sample_rate: u32,
    pub bit_depth: BitDepth,
    /// Target peak level in dBFS; must be <= 0.
    pub target_db: f64,
}

impl AudioQuality {
    /// Expand a tier into its concrete configuration.
    pub fn config(self) -> AudioConfig {
        match self {
            AudioQuality::Standard => AudioConfig {
                sample_rate: 44100,
                bit_depth: BitDepth::Int16,
                target_db: -1.0,
            },
            AudioQuality::High => AudioConfig {
                sample_rate: 48000,
                bit_depth: BitDepth::Int24,
                target_db: -0.3,
            },
            AudioQuality::Pro => AudioConfig {
                sample_rate: 96000,
                bit_depth: BitDepth::Float32,
                target_db: -0.1,
            },
        }
    }

    /// Parse a tier name as used on the job surface ("standard" | "high" | "pro").
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(AudioQuality::Standard),
            "high" => Some(AudioQuality::High),
            "pro" => Some(AudioQuality::Pro),
            _ => None,
        }
    }
}

impl AudioConfig {
    pub fn validate(&self) -> Result<(), AudioError> {
        if self.sample_rate == 0 {
            return Err(AudioError::InvalidParameter { name: "sample_rate", value: 0.0 });
        }
        if !self.target_db.is_finite() || self.target_db > 0.0 {
            return Err(AudioError::InvalidParameter {
                name: "target_db",
                value: self.target_db,
            });
        }
        Ok(())
    }
}
