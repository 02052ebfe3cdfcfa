//! Sampler configuration (sampler.toml)
//!
//! The frame rate is an explicit setting rather than shared state: every
//! [`Action`](crate::Action) receives it at construction and refuses to be
//! built while it is unset.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::host::SceneHost;

/// Tolerance used when checking that a bone carries no scaling
pub const DEFAULT_SCALE_TOLERANCE: f32 = 1.0e-4;

/// Tolerance used when checking that a location sample is zero
pub const DEFAULT_LOCATION_TOLERANCE: f32 = 1.0e-4;

/// Tolerance on quaternion x/y/z when checking for the identity rotation
pub const DEFAULT_ROTATION_TOLERANCE: f32 = 1.0e-6;

/// Settings shared by every action sampled in one export run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Frames per second of the authoring scene. Must be set before sampling.
    pub frame_rate: Option<f32>,
    /// Maximum deviation of any scale component from 1
    pub scale_tolerance: f32,
    /// Maximum magnitude of a location component still treated as zero
    pub location_tolerance: f32,
    /// Maximum magnitude of quaternion x/y/z still treated as no rotation
    pub rotation_tolerance: f32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            frame_rate: None,
            scale_tolerance: DEFAULT_SCALE_TOLERANCE,
            location_tolerance: DEFAULT_LOCATION_TOLERANCE,
            rotation_tolerance: DEFAULT_ROTATION_TOLERANCE,
        }
    }
}

impl SamplerConfig {
    /// Config with the given frame rate and default tolerances
    pub fn with_frame_rate(frame_rate: f32) -> Self {
        Self {
            frame_rate: Some(frame_rate),
            ..Self::default()
        }
    }

    /// Parse a config from TOML text
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse sampler config")
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sampler config: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid sampler config: {}", path.display()))
    }

    /// Take the frame rate from the host's render settings
    pub fn update_frame_rate(&mut self, host: &impl SceneHost) {
        self.frame_rate = Some(host.frames_per_second());
    }

    /// The frame rate if it is set and usable
    pub fn valid_frame_rate(&self) -> Option<f32> {
        self.frame_rate.filter(|fps| fps.is_finite() && *fps > 0.0)
    }
}
