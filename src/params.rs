use std::{
    fs::File,
    io::BufReader,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context as _;

use crate::error::{GlitchError, GlitchResult};

pub const MIN_INTENSITY: f32 = 0.1;
pub const MAX_INTENSITY: f32 = 9.0;

/// Optional effects; the random wrap-shift always runs and has no toggle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EffectToggles {
    pub scan_lines: bool,
    pub pixel_sort: bool,
    pub color_offset: bool,
}

impl EffectToggles {
    pub fn all() -> Self {
        Self {
            scan_lines: true,
            pixel_sort: true,
            color_offset: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EffectParameters {
    pub intensity: f32,
    pub cycles: u32,
    /// Only consulted by the frame sequencer.
    pub step: u32,
    pub effects: EffectToggles,
}

impl Default for EffectParameters {
    fn default() -> Self {
        Self {
            intensity: 5.0,
            cycles: 1,
            step: 1,
            effects: EffectToggles::default(),
        }
    }
}

impl EffectParameters {
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_cycles(mut self, cycles: u32) -> Self {
        self.cycles = cycles;
        self
    }

    pub fn with_step(mut self, step: u32) -> Self {
        self.step = step;
        self
    }

    pub fn with_effects(mut self, effects: EffectToggles) -> Self {
        self.effects = effects;
        self
    }

    pub fn validate(&self) -> GlitchResult<()> {
        if !self.intensity.is_finite()
            || self.intensity < MIN_INTENSITY
            || self.intensity > MAX_INTENSITY
        {
            return Err(GlitchError::invalid_parameter(format!(
                "intensity must be between {MIN_INTENSITY} and {MAX_INTENSITY} (got {})",
                self.intensity
            )));
        }
        if self.cycles == 0 {
            return Err(GlitchError::invalid_parameter("cycle count must be > 0"));
        }
        if self.step == 0 {
            return Err(GlitchError::invalid_parameter("step must be > 0"));
        }
        Ok(())
    }

    /// Load a JSON preset. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> GlitchResult<Self> {
        let f = File::open(path).with_context(|| format!("open preset '{}'", path.display()))?;
        let params: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse preset JSON '{}'", path.display()))?;
        params.validate()?;
        Ok(params)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SequenceParameters {
    pub frames: u32,
    /// Per-frame delay in hundredths of a second.
    pub delay: u16,
}

impl Default for SequenceParameters {
    fn default() -> Self {
        Self {
            frames: 10,
            delay: 10,
        }
    }
}

impl SequenceParameters {
    pub fn validate(&self) -> GlitchResult<()> {
        if self.frames == 0 {
            return Err(GlitchError::invalid_parameter("frame count must be > 0"));
        }
        Ok(())
    }
}

/// Seed derived from the wall clock, for runs where the caller did not pick one.
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
