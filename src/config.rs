//! Galaxy configuration.
//!
//! Every tunable constant of the view lives here with its default. A config
//! file is JSON; missing fields fall back to the defaults.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GalaxyError;
use crate::galaxy::color::parse_hex_color;
use crate::galaxy::encoder::EmphasisTable;
use crate::math::Vec3;

/// What happens to a selection when a filter change hides the selected entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterChangePolicy {
    /// Selection stays on the hidden entry; it is simply not rendered.
    #[default]
    KeepSelection,
    /// Selection is cleared when the selected entry leaves the filtered set.
    Deselect,
}

/// Orbit camera defaults for the viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance from the camera to the galaxy center
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Vertical field of view in degrees
    pub fov_deg: f32,
    /// Tilt of the whole galaxy around the view axis (radians)
    pub galaxy_tilt: f32,
    /// Auto-rotation speed (rad/s) while nothing is selected
    pub auto_rotate_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 18.0,
            min_distance: 5.0,
            max_distance: 40.0,
            fov_deg: 50.0,
            galaxy_tilt: std::f32::consts::FRAC_PI_4,
            auto_rotate_speed: 0.08,
        }
    }
}

/// Configuration for the galaxy view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyConfig {
    /// Radius of the layout sphere
    pub sphere_radius: f32,
    /// Where a selected entry is pulled to, in front of the sphere
    pub presentation_slot: Vec3,
    /// Factor applied to sphere positions of dimmed entries (0..1 recedes)
    pub recede_factor: f32,
    /// Exponential smoothing rate in 1/s
    pub smoothing_rate: f32,
    /// Distance below which an animated value snaps onto its target
    pub snap_epsilon: f32,
    /// Longest frame the scheduler integrates at once (seconds)
    pub max_frame_dt: f32,
    pub emphasis: EmphasisTable,
    /// Mood → hex color, overriding or extending the built-in palette
    pub palette: BTreeMap<String, String>,
    pub filter_change_policy: FilterChangePolicy,
    pub camera: CameraConfig,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            sphere_radius: 8.0,
            presentation_slot: Vec3::new(0.0, 0.0, 10.0),
            recede_factor: 0.6,
            smoothing_rate: 12.0,
            snap_epsilon: 1e-4,
            max_frame_dt: 0.1,
            emphasis: EmphasisTable::default(),
            palette: BTreeMap::new(),
            filter_change_policy: FilterChangePolicy::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl GalaxyConfig {
    pub fn from_json_str(json: &str) -> Result<Self, GalaxyError> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| GalaxyError::config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, GalaxyError> {
        let text = std::fs::read_to_string(path)?;
        let cfg = Self::from_json_str(&text)?;
        log::info!("loaded galaxy config from {}", path.display());
        Ok(cfg)
    }

    pub fn with_policy(mut self, policy: FilterChangePolicy) -> Self {
        self.filter_change_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), GalaxyError> {
        if !(self.sphere_radius.is_finite() && self.sphere_radius > 0.0) {
            return Err(GalaxyError::config("sphere_radius must be a positive number"));
        }
        if !self.presentation_slot.is_finite() {
            return Err(GalaxyError::config("presentation_slot must be finite"));
        }
        if !(0.0..=1.0).contains(&self.recede_factor) {
            return Err(GalaxyError::config("recede_factor must be within [0, 1]"));
        }
        if !(self.smoothing_rate.is_finite() && self.smoothing_rate > 0.0) {
            return Err(GalaxyError::config("smoothing_rate must be a positive number"));
        }
        if !(self.snap_epsilon.is_finite() && self.snap_epsilon >= 0.0) {
            return Err(GalaxyError::config("snap_epsilon must be non-negative"));
        }
        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            return Err(GalaxyError::config("max_frame_dt must be a positive number"));
        }
        self.emphasis.validate()?;
        for (mood, hex) in &self.palette {
            if parse_hex_color(hex).is_none() {
                return Err(GalaxyError::config(format!(
                    "palette color for {mood:?} is not a hex color: {hex:?}"
                )));
            }
        }
        let cam = &self.camera;
        if !(cam.min_distance > 0.0 && cam.min_distance <= cam.max_distance) {
            return Err(GalaxyError::config("camera distance bounds are inverted"));
        }
        Ok(())
    }
}
