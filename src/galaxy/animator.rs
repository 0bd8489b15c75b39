//! Per-frame animation of the galaxy's live visuals.
//!
//! Every channel (position, scale, brightness, opacity) eases toward its target
//! by exponential smoothing: `current += (target - current) * k` with
//! `k = 1 - e^(-rate * dt)`. The factor depends on elapsed time, so the motion
//! looks the same at 30 Hz and 144 Hz. `k < 1` means a channel never passes its
//! target; once within `snap_epsilon` it lands on it exactly.
//!
//! Visuals exist only for entries in the current filtered set. When an entry
//! leaves, its last state is remembered; if it comes back in the same session
//! it resumes from there instead of re-spawning.

use std::collections::HashMap;

use crate::entry::EntryId;
use crate::galaxy::encoder::Emphasis;
use crate::galaxy::sphere::LayoutPoint;
use crate::math::{lerp, smoothing_factor, Vec3};

/// Animated visual state of one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveVisual {
    pub entry_id: EntryId,
    pub position: Vec3,
    pub target_position: Vec3,
    pub scale: f32,
    pub target_scale: f32,
    pub brightness: f32,
    pub target_brightness: f32,
    pub opacity: f32,
    pub target_opacity: f32,
}

impl LiveVisual {
    /// A fresh visual at `position`, fully shrunk and transparent.
    pub fn spawn(entry_id: EntryId, position: Vec3) -> Self {
        Self {
            entry_id,
            position,
            target_position: position,
            scale: 0.0,
            target_scale: 0.0,
            brightness: 0.0,
            target_brightness: 0.0,
            opacity: 0.0,
            target_opacity: 0.0,
        }
    }

    pub fn set_target(&mut self, position: Vec3, emphasis: Emphasis) {
        self.target_position = position;
        self.target_scale = emphasis.scale;
        self.target_brightness = emphasis.brightness;
        self.target_opacity = emphasis.opacity;
    }

    pub fn at_rest(&self) -> bool {
        self.position == self.target_position
            && self.scale == self.target_scale
            && self.brightness == self.target_brightness
            && self.opacity == self.target_opacity
    }

    fn step(&mut self, k: f32, eps: f32) {
        self.position = Vec3::new(
            approach(self.position.x, self.target_position.x, k, eps),
            approach(self.position.y, self.target_position.y, k, eps),
            approach(self.position.z, self.target_position.z, k, eps),
        );
        self.scale = approach(self.scale, self.target_scale, k, eps);
        self.brightness = approach(self.brightness, self.target_brightness, k, eps);
        self.opacity = approach(self.opacity, self.target_opacity, k, eps);
    }
}

/// One smoothing step of a scalar channel.
#[inline(always)]
fn approach(current: f32, target: f32, k: f32, eps: f32) -> f32 {
    if !current.is_finite() {
        return target;
    }
    let next = lerp(current, target, k);
    if (target - next).abs() <= eps {
        target
    } else {
        next
    }
}

/// Smoothing parameters.
#[derive(Debug, Clone, Copy)]
pub struct Smoothing {
    /// Decay rate in 1/s
    pub rate: f32,
    pub snap_epsilon: f32,
    /// Longer frames (stalls, breakpoints) are integrated as this many seconds
    pub max_frame_dt: f32,
}

impl Default for Smoothing {
    fn default() -> Self {
        Self {
            rate: 12.0,
            snap_epsilon: 1e-4,
            max_frame_dt: 0.1,
        }
    }
}

/// Owns the live visuals and advances them each frame.
#[derive(Debug, Clone, Default)]
pub struct AnimationScheduler {
    smoothing: Smoothing,
    /// Visuals in filtered order
    visuals: Vec<LiveVisual>,
    index: HashMap<EntryId, usize>,
    /// Last known state of entries that left the filtered set
    retired: HashMap<EntryId, LiveVisual>,
}

impl AnimationScheduler {
    pub fn new(smoothing: Smoothing) -> Self {
        Self {
            smoothing,
            ..Self::default()
        }
    }

    /// Make the visual set match `points` (membership and order).
    ///
    /// Kept entries keep their current values, returning entries resume from
    /// their last known values, new entries spawn at their layout position.
    pub fn sync(&mut self, points: &[LayoutPoint]) {
        let mut previous: HashMap<EntryId, LiveVisual> = self
            .visuals
            .drain(..)
            .map(|v| (v.entry_id.clone(), v))
            .collect();
        self.index.clear();

        let mut spawned = 0usize;
        let mut resumed = 0usize;
        for p in points {
            if self.index.contains_key(&p.entry_id) {
                log::warn!("duplicate entry id {:?} in layout; keeping the first", p.entry_id);
                continue;
            }
            let visual = match previous.remove(&p.entry_id) {
                Some(v) => v,
                None => match self.retired.remove(&p.entry_id) {
                    Some(v) => {
                        resumed += 1;
                        v
                    }
                    None => {
                        spawned += 1;
                        LiveVisual::spawn(p.entry_id.clone(), p.target_position)
                    }
                },
            };
            self.index.insert(p.entry_id.clone(), self.visuals.len());
            self.visuals.push(visual);
        }

        let retired_now = previous.len();
        self.retired.extend(previous);
        log::debug!(
            "scheduler sync: {} live ({spawned} new, {resumed} resumed, {retired_now} retired)",
            self.visuals.len()
        );
    }

    /// Set the target of a live visual. Unknown ids are ignored.
    pub fn set_target(&mut self, id: &str, position: Vec3, emphasis: Emphasis) -> bool {
        match self.get_mut(id) {
            Some(v) => {
                v.set_target(position, emphasis);
                true
            }
            None => false,
        }
    }

    /// Advance all visuals by `dt` seconds. Never blocks; non-positive or
    /// non-finite `dt` leaves everything unchanged.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.min(self.smoothing.max_frame_dt) } else { 0.0 };
        let k = smoothing_factor(self.smoothing.rate, dt);
        if k <= 0.0 {
            return;
        }
        let eps = self.smoothing.snap_epsilon;
        for v in &mut self.visuals {
            v.step(k, eps);
        }
    }

    pub fn get(&self, id: &str) -> Option<&LiveVisual> {
        self.index.get(id).map(|&i| &self.visuals[i])
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut LiveVisual> {
        match self.index.get(id) {
            Some(&i) => self.visuals.get_mut(i),
            None => None,
        }
    }

    /// Live visuals in filtered order.
    pub fn visuals(&self) -> &[LiveVisual] {
        &self.visuals
    }

    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    /// Whether any visual is still moving toward its target.
    pub fn is_animating(&self) -> bool {
        self.visuals.iter().any(|v| !v.at_rest())
    }
}
