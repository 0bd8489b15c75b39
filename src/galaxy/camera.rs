//! Orbit camera and screen projection.
//!
//! Render surfaces use this to turn the scene's galaxy-space positions into
//! screen coordinates and to map a pointer position back to an entry.
//! The camera sits on +Z looking at the origin; the presentation slot
//! `(0, 0, z)` is therefore straight ahead whenever the orbit angles are zero.

use crate::config::CameraConfig;
use crate::entry::EntryId;
use crate::galaxy::scene::FrameSnapshot;
use crate::math::{smoothing_factor, Vec3};

/// Camera parameters for interactive 3D navigation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    /// Horizontal orbit angle in radians (0 = front)
    pub azimuth: f32,
    /// Vertical orbit angle in radians (0 = level, positive = looking down)
    pub elevation: f32,
    /// Distance from the camera to the galaxy center
    pub distance: f32,
}

/// A projected point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f32,
    pub y: f32,
    /// Distance in front of the camera (larger = farther)
    pub depth: f32,
    /// Screen pixels per galaxy unit at this depth
    pub pixels_per_unit: f32,
}

const NEAR_PLANE: f32 = 0.1;
const ELEVATION_LIMIT: f32 = 1.4;
/// How fast the camera swings back to the front view while an entry is focused
const RECENTER_RATE: f32 = 4.0;
/// Preferred depth of the presentation slot while focused
pub const FOCUS_CLEARANCE: f32 = 4.0;
/// Smallest depth the presentation slot is ever allowed
const FOCUS_FLOOR: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub params: CameraParams,
    fov_deg: f32,
    tilt: f32,
    min_distance: f32,
    max_distance: f32,
    auto_rotate_speed: f32,
}

impl OrbitCamera {
    pub fn from_config(cfg: &CameraConfig) -> Self {
        Self {
            params: CameraParams {
                azimuth: 0.0,
                elevation: 0.0,
                distance: cfg.distance.clamp(cfg.min_distance, cfg.max_distance),
            },
            fov_deg: cfg.fov_deg,
            tilt: cfg.galaxy_tilt,
            min_distance: cfg.min_distance,
            max_distance: cfg.max_distance,
            auto_rotate_speed: cfg.auto_rotate_speed,
        }
    }

    /// Drag to orbit (radians).
    pub fn orbit(&mut self, d_azimuth: f32, d_elevation: f32) {
        self.params.azimuth += d_azimuth;
        self.params.elevation =
            (self.params.elevation + d_elevation).clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT);
    }

    /// Multiply the distance by `factor`, within the configured bounds.
    pub fn zoom(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.params.distance =
                (self.params.distance * factor).clamp(self.min_distance, self.max_distance);
        }
    }

    /// Per-frame camera motion: slow auto-rotation in overview; while an entry
    /// is focused at `focus_slot`, swing back to the front view and back off
    /// until the slot sits [`FOCUS_CLEARANCE`] in front of the camera.
    ///
    /// Returns whether the camera is still moving.
    pub fn update(&mut self, dt: f32, focus_slot: Option<Vec3>) -> bool {
        let step = dt.is_finite() && dt > 0.0;
        let Some(slot) = focus_slot else {
            if step {
                self.params.azimuth += self.auto_rotate_speed * dt;
            }
            return self.auto_rotate_speed != 0.0;
        };

        if step {
            let k = smoothing_factor(RECENTER_RATE, dt);
            // Take the short way around
            let az = self.params.azimuth.rem_euclid(std::f32::consts::TAU);
            let az = if az > std::f32::consts::PI { az - std::f32::consts::TAU } else { az };
            self.params.azimuth = az * (1.0 - k);
            self.params.elevation *= 1.0 - k;

            let wanted = self.focus_distance(slot);
            if self.params.distance < wanted {
                self.params.distance += (wanted - self.params.distance) * k;
            }
        }

        // The focused entry must never fall behind the near plane
        let floor = self.to_view(slot).z + FOCUS_FLOOR;
        if self.params.distance < floor {
            self.params.distance = floor;
        }

        !self.is_centered() || self.params.distance < self.focus_distance(slot) - 1e-3
    }

    /// Camera distance that keeps `slot` comfortably in front of the lens.
    fn focus_distance(&self, slot: Vec3) -> f32 {
        (self.to_view(slot).z + FOCUS_CLEARANCE).min(self.max_distance)
    }

    fn is_centered(&self) -> bool {
        let az = self.params.azimuth.rem_euclid(std::f32::consts::TAU);
        let az_off = az.min(std::f32::consts::TAU - az);
        az_off < 1e-3 && self.params.elevation.abs() < 1e-3
    }

    /// Galaxy space → view space (camera at `(0, 0, distance)` looking at -Z).
    pub fn to_view(&self, p: Vec3) -> Vec3 {
        p.rotate_z(self.tilt)
            .rotate_y(-self.params.azimuth)
            .rotate_x(self.params.elevation)
    }

    /// Project `p` onto a `width` × `height` viewport. `None` behind the camera.
    pub fn project(&self, p: Vec3, width: f32, height: f32) -> Option<Projected> {
        let v = self.to_view(p);
        let depth = self.params.distance - v.z;
        if depth <= NEAR_PLANE {
            return None;
        }
        let focal = (height * 0.5) / (self.fov_deg.to_radians() * 0.5).tan();
        let ppu = focal / depth;
        Some(Projected {
            x: width * 0.5 + v.x * ppu,
            y: height * 0.5 - v.y * ppu,
            depth,
            pixels_per_unit: ppu,
        })
    }

    /// Entry under the pointer at `(px, py)`, nearest to the camera first.
    ///
    /// `base_radius` is the on-sphere radius of a star at scale 1.0.
    pub fn pick(
        &self,
        frame: &FrameSnapshot,
        px: f32,
        py: f32,
        width: f32,
        height: f32,
        base_radius: f32,
    ) -> Option<EntryId> {
        frame
            .visuals
            .iter()
            .filter(|v| v.opacity > 0.0 && v.scale > 0.0)
            .filter_map(|v| {
                let p = self.project(v.position, width, height)?;
                let r = (base_radius * v.scale * p.pixels_per_unit).max(4.0);
                let (dx, dy) = (px - p.x, py - p.y);
                (dx * dx + dy * dy <= r * r).then_some((p.depth, &v.entry_id))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, id)| id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::color::Rgba;
    use crate::galaxy::encoder::Role;
    use crate::galaxy::scene::VisualSnapshot;
    use crate::galaxy::ViewMode;

    fn camera() -> OrbitCamera {
        OrbitCamera::from_config(&CameraConfig::default())
    }

    fn star(id: &str, p: Vec3) -> VisualSnapshot {
        VisualSnapshot {
            entry_id: id.to_string(),
            position: p,
            scale: 1.0,
            brightness: 1.0,
            opacity: 1.0,
            color: Rgba::WHITE,
            role: Role::Neutral,
        }
    }

    #[test]
    fn origin_projects_to_center() {
        let p = camera().project(Vec3::ZERO, 800.0, 600.0).unwrap();
        assert!((p.x - 400.0).abs() < 1e-3 && (p.y - 300.0).abs() < 1e-3);
        assert!((p.depth - 18.0).abs() < 1e-4);
    }

    #[test]
    fn presentation_slot_is_in_front_and_larger() {
        let cam = camera();
        let slot = cam.project(Vec3::new(0.0, 0.0, 10.0), 800.0, 600.0).unwrap();
        let center = cam.project(Vec3::ZERO, 800.0, 600.0).unwrap();
        assert!(slot.depth < center.depth);
        assert!(slot.pixels_per_unit > center.pixels_per_unit);
        assert!((slot.x - 400.0).abs() < 1e-3);
    }

    #[test]
    fn behind_camera_is_culled() {
        assert!(camera().project(Vec3::new(0.0, 0.0, 30.0), 800.0, 600.0).is_none());
    }

    #[test]
    fn zoom_respects_bounds() {
        let mut cam = camera();
        cam.zoom(100.0);
        assert_eq!(cam.params.distance, 40.0);
        cam.zoom(0.0001);
        assert_eq!(cam.params.distance, 5.0);
        cam.zoom(f32::NAN);
        assert_eq!(cam.params.distance, 5.0);
    }

    #[test]
    fn focus_recenters_and_overview_rotates() {
        let mut cam = camera();
        let slot = Some(Vec3::new(0.0, 0.0, 10.0));
        cam.orbit(3.0, 0.8);
        for _ in 0..600 {
            cam.update(1.0 / 60.0, slot);
        }
        assert!(cam.params.azimuth.abs() < 1e-3);
        assert!(cam.params.elevation.abs() < 1e-3);
        assert!(!cam.update(1.0 / 60.0, slot), "settled focus camera keeps moving");
        assert_eq!(cam.params.distance, 18.0);

        assert!(cam.update(1.0, None));
        assert!(cam.params.azimuth > 0.0);
    }

    #[test]
    fn zoomed_in_focus_keeps_slot_in_front() {
        let mut cam = camera();
        let slot = Vec3::new(0.0, 0.0, 10.0);
        cam.zoom(0.01);
        assert_eq!(cam.params.distance, 5.0);

        // Visible from the very first focused frame
        cam.update(1.0 / 60.0, Some(slot));
        let first = cam.project(slot, 800.0, 600.0).unwrap();
        assert!(first.depth >= FOCUS_FLOOR - 1e-4);

        for _ in 0..600 {
            cam.update(1.0 / 60.0, Some(slot));
        }
        let settled = cam.project(slot, 800.0, 600.0).unwrap();
        assert!((settled.depth - FOCUS_CLEARANCE).abs() < 1e-2, "depth {}", settled.depth);
        assert!((settled.x - 400.0).abs() < 1e-2);

        // Zooming in again while focused is undone on the next frame
        cam.zoom(0.01);
        cam.update(1.0 / 60.0, Some(slot));
        assert!(cam.project(slot, 800.0, 600.0).is_some());
    }

    #[test]
    fn pick_prefers_nearest() {
        let cam = camera();
        let frame = FrameSnapshot {
            visuals: vec![star("far", Vec3::ZERO), star("near", Vec3::new(0.0, 0.0, 10.0))],
            accent: Rgba::WHITE,
            view_mode: ViewMode::Overview,
        };
        assert_eq!(cam.pick(&frame, 400.0, 300.0, 800.0, 600.0, 0.4).as_deref(), Some("near"));
        assert_eq!(cam.pick(&frame, 10.0, 10.0, 800.0, 600.0, 0.4), None);
    }
}
