//! Visual encoding: mood → color, interaction role → emphasis.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::GalaxyConfig;
use crate::error::GalaxyError;
use crate::galaxy::color::{palette_color, parse_hex_color, Rgba, FALLBACK_COLOR};

/// How an entry currently participates in the interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Nothing is selected and the pointer is elsewhere
    Neutral,
    /// Nothing is selected and the pointer is over this entry
    Hovered,
    /// This entry is the selection
    Selected,
    /// Another entry is the selection
    Dimmed,
}

/// Visual weight multipliers for one role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Emphasis {
    /// 0 = invisible, 1 = nominal, >1 = emphasized
    pub brightness: f32,
    pub opacity: f32,
    pub scale: f32,
}

impl Emphasis {
    pub const fn new(brightness: f32, opacity: f32, scale: f32) -> Self {
        Self {
            brightness,
            opacity,
            scale,
        }
    }
}

/// Emphasis per role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmphasisTable {
    pub neutral: Emphasis,
    pub hovered: Emphasis,
    pub selected: Emphasis,
    pub dimmed: Emphasis,
}

impl Default for EmphasisTable {
    fn default() -> Self {
        Self {
            neutral: Emphasis::new(1.0, 1.0, 1.0),
            hovered: Emphasis::new(2.0, 1.0, 1.5),
            selected: Emphasis::new(3.0, 1.0, 1.3),
            dimmed: Emphasis::new(0.2, 0.25, 0.6),
        }
    }
}

impl EmphasisTable {
    pub fn get(&self, role: Role) -> Emphasis {
        match role {
            Role::Neutral => self.neutral,
            Role::Hovered => self.hovered,
            Role::Selected => self.selected,
            Role::Dimmed => self.dimmed,
        }
    }

    pub fn validate(&self) -> Result<(), GalaxyError> {
        for (name, e) in [
            ("neutral", self.neutral),
            ("hovered", self.hovered),
            ("selected", self.selected),
            ("dimmed", self.dimmed),
        ] {
            let ok = e.brightness.is_finite()
                && e.brightness >= 0.0
                && (0.0..=1.0).contains(&e.opacity)
                && e.scale.is_finite()
                && e.scale > 0.0;
            if !ok {
                return Err(GalaxyError::config(format!("emphasis.{name} is out of range")));
            }
        }
        // A dimmed entry stays faintly visible
        if self.dimmed.opacity <= 0.0 {
            return Err(GalaxyError::config("emphasis.dimmed.opacity must be above zero"));
        }
        Ok(())
    }
}

/// Maps moods and roles to visual parameters.
#[derive(Debug, Clone, Default)]
pub struct VisualEncoder {
    overrides: HashMap<String, Rgba>,
    table: EmphasisTable,
}

impl VisualEncoder {
    /// Build from a config. Invalid palette entries are skipped with a warning;
    /// [`GalaxyConfig::validate`] rejects them up front.
    pub fn from_config(cfg: &GalaxyConfig) -> Self {
        let mut overrides = HashMap::with_capacity(cfg.palette.len());
        for (mood, hex) in &cfg.palette {
            match parse_hex_color(hex) {
                Some(c) => {
                    overrides.insert(mood.clone(), c);
                }
                None => log::warn!("ignoring palette color {hex:?} for mood {mood:?}"),
            }
        }
        Self {
            overrides,
            table: cfg.emphasis,
        }
    }

    /// Color of a mood. Total: unknown, custom and empty moods get the fallback.
    pub fn color_for(&self, mood: &str) -> Rgba {
        if mood.is_empty() {
            return FALLBACK_COLOR;
        }
        self.overrides
            .get(mood)
            .copied()
            .or_else(|| palette_color(mood))
            .unwrap_or(FALLBACK_COLOR)
    }

    pub fn emphasis_for(&self, role: Role) -> Emphasis {
        self.table.get(role)
    }

    /// Light color of the whole scene: the filtered mood's color, white when unfiltered.
    pub fn accent_color(&self, filter: Option<&str>) -> Rgba {
        filter.map_or(FALLBACK_COLOR, |m| self.color_for(m))
    }
}

const PULSE_BASE_SCALE: f32 = 1.2;
const PULSE_AMPLITUDE: f32 = 0.15;

/// FNV-1a over the id bytes.
fn id_hash(id: &str) -> u32 {
    let mut h: u32 = 0x811c_9dc5;
    for &b in id.as_bytes() {
        h ^= b as u32;
        h = h.wrapping_mul(0x0100_0193);
    }
    h
}

/// Draw-time "breathing" multiplier for an entry at time `t` (seconds).
///
/// Speed and phase are derived from the id, so every entry breathes at its
/// own pace but identically across runs. The result oscillates within
/// `1 ± 0.125`. It is applied on top of the live scale by the renderer and
/// never fed back into the animation targets.
pub fn pulse(entry_id: &str, t: f32) -> f32 {
    let h = id_hash(entry_id);
    let speed = 0.5 + ((h & 0xFFFF) as f32 / 65535.0) * 1.5;
    let offset = ((h >> 16) as f32 / 65535.0) * 100.0;
    let breathe = (t * speed + offset).sin() * PULSE_AMPLITUDE;
    1.0 + breathe / PULSE_BASE_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_moods_use_palette() {
        let enc = VisualEncoder::default();
        assert_eq!(enc.color_for("Joy"), Rgba::rgb(0xFF, 0xD7, 0x00));
        assert_eq!(enc.color_for("Calm"), Rgba::rgb(0x00, 0xFF, 0xCC));
        assert_eq!(enc.color_for("Love"), Rgba::rgb(0xFF, 0x69, 0xB4));
    }

    #[test]
    fn unknown_and_empty_moods_fall_back() {
        let enc = VisualEncoder::default();
        assert_eq!(enc.color_for("Grateful"), FALLBACK_COLOR);
        assert_eq!(enc.color_for("joy"), FALLBACK_COLOR);
        assert_eq!(enc.color_for(""), FALLBACK_COLOR);
        assert_eq!(enc.color_for("🌈"), FALLBACK_COLOR);
    }

    #[test]
    fn overrides_take_precedence() {
        let mut cfg = GalaxyConfig::default();
        cfg.palette.insert("Joy".into(), "#010203".into());
        cfg.palette.insert("Grateful".into(), "#0F0".into());
        let enc = VisualEncoder::from_config(&cfg);
        assert_eq!(enc.color_for("Joy"), Rgba::rgb(1, 2, 3));
        assert_eq!(enc.color_for("Grateful"), Rgba::rgb(0, 255, 0));
        assert_eq!(enc.color_for("Calm"), Rgba::rgb(0x00, 0xFF, 0xCC));
    }

    #[test]
    fn emphasis_ordering() {
        let enc = VisualEncoder::default();
        let n = enc.emphasis_for(Role::Neutral);
        let h = enc.emphasis_for(Role::Hovered);
        let s = enc.emphasis_for(Role::Selected);
        let d = enc.emphasis_for(Role::Dimmed);

        assert_eq!(n, Emphasis::new(1.0, 1.0, 1.0));
        assert!(h.brightness > n.brightness && h.scale > n.scale && h.opacity == 1.0);
        assert!(s.brightness > h.brightness && s.scale > n.scale && s.opacity == 1.0);
        assert!(d.brightness < n.brightness && d.scale < n.scale);
        assert!(d.opacity > 0.0 && d.opacity < 0.5);
    }

    #[test]
    fn accent_follows_filter() {
        let enc = VisualEncoder::default();
        assert_eq!(enc.accent_color(None), Rgba::WHITE);
        assert_eq!(enc.accent_color(Some("Angry")), Rgba::rgb(255, 0, 0));
        assert_eq!(enc.accent_color(Some("Whatever")), Rgba::WHITE);
    }

    #[test]
    fn invisible_dimming_is_rejected() {
        let mut table = EmphasisTable::default();
        table.dimmed.opacity = 0.0;
        assert!(table.validate().is_err());
    }

    #[test]
    fn pulse_is_deterministic_and_bounded() {
        for t in [0.0_f32, 0.5, 3.3, 120.0] {
            let a = pulse("entry-42", t);
            assert_eq!(a, pulse("entry-42", t));
            assert!((a - 1.0).abs() <= PULSE_AMPLITUDE / PULSE_BASE_SCALE + 1e-6);
        }
        let varies = (0..50).any(|i| pulse("a", i as f32 * 0.1) != pulse("b", i as f32 * 0.1));
        assert!(varies);
    }
}
