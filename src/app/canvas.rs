//! The galaxy viewport for `GalaxyApp`.
//!
//! Each frame: advance the scene, project the live visuals through the orbit
//! camera, draw back to front, then turn pointer input into scene events.

use eframe::egui;

use mood_galaxy::galaxy::color::Rgba;
use mood_galaxy::galaxy::encoder::{pulse, Role};
use mood_galaxy::galaxy::FrameSnapshot;
use mood_galaxy::{InteractionEvent, Mood};

use super::GalaxyApp;

pub const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(6, 6, 14);
/// Star radius in galaxy units at scale 1.0
const STAR_RADIUS: f32 = 0.22;
/// Radians of orbit per dragged pixel
const DRAG_SPEED: f32 = 0.005;
const ZOOM_SPEED: f32 = 0.002;

pub fn to_color32(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

impl GalaxyApp {
    /// Render the galaxy and handle pointer interaction.
    pub fn draw_galaxy(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let now = std::time::Instant::now();
        let dt = (now - self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        self.scene.tick(dt);
        let focus_slot = self
            .scene
            .focus()
            .selected()
            .map(|_| self.scene.config().presentation_slot);
        self.camera_moving = self
            .camera
            .update(dt.min(self.scene.config().max_frame_dt), focus_slot);

        let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        let painter = ui.painter_at(rect);
        let frame = self.scene.snapshot();

        self.paint_backdrop(&painter, rect, frame.accent);
        self.paint_stars(&painter, rect, &frame);

        if self.loading {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Gathering memories\u{2026}",
                egui::FontId::proportional(18.0),
                egui::Color32::from_gray(180),
            );
        } else if frame.is_empty() {
            let msg = if self.scene.filter().is_some() {
                "No memories with this mood yet"
            } else {
                "No memories yet"
            };
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                msg,
                egui::FontId::proportional(18.0),
                egui::Color32::from_gray(140),
            );
        }

        // Drag to orbit, scroll to zoom
        if response.dragged() {
            let delta = response.drag_delta();
            self.camera.orbit(-delta.x * DRAG_SPEED, delta.y * DRAG_SPEED);
        }
        if response.hovered() {
            let scroll = ctx.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.camera.zoom((-scroll * ZOOM_SPEED).exp());
            }
        }

        // Picking
        let picked = response.hover_pos().and_then(|pos| {
            let local = pos - rect.min;
            self.camera
                .pick(&frame, local.x, local.y, rect.width(), rect.height(), STAR_RADIUS)
        });
        if picked != self.hovered {
            if let Some(old) = self.hovered.take() {
                self.scene.enqueue(InteractionEvent::PointerLeave(old));
            }
            if let Some(id) = &picked {
                self.scene.enqueue(InteractionEvent::PointerEnter(id.clone()));
            }
            self.hovered = picked.clone();
        }
        if picked.is_some() {
            ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        if response.clicked() {
            match picked {
                Some(id) => self.scene.enqueue(InteractionEvent::PointerClick(id)),
                None => self.scene.enqueue(InteractionEvent::PointerClickBackground),
            }
        }
    }

    /// Faint glow of the scene light behind the sphere.
    fn paint_backdrop(&self, painter: &egui::Painter, rect: egui::Rect, accent: Rgba) {
        let center = rect.center();
        let base = rect.width().min(rect.height()) * 0.45;
        for (i, alpha) in [6u8, 10, 14].iter().enumerate() {
            let glow = Rgba { a: *alpha, ..accent };
            painter.circle_filled(center, base * (1.0 - i as f32 * 0.25), to_color32(glow));
        }
    }

    fn paint_stars(&self, painter: &egui::Painter, rect: egui::Rect, frame: &FrameSnapshot) {
        let (w, h) = (rect.width(), rect.height());
        let t = self.scene.elapsed();

        let mut projected: Vec<_> = frame
            .visuals
            .iter()
            .filter(|v| v.opacity > 0.0 && v.scale > 0.0)
            .filter_map(|v| Some((self.camera.project(v.position, w, h)?, v)))
            .collect();
        // Far to near
        projected.sort_by(|a, b| b.0.depth.total_cmp(&a.0.depth));

        for (p, v) in projected {
            let center = rect.min + egui::vec2(p.x, p.y);
            let radius = STAR_RADIUS * v.scale * pulse(&v.entry_id, t) * p.pixels_per_unit;
            let core = v.color.shade(v.brightness, v.opacity);
            let halo = Rgba {
                a: (core.a as f32 * 0.18).round() as u8,
                ..core
            };

            painter.circle_filled(center, radius * 2.4, to_color32(halo));
            painter.circle_filled(center, radius.max(1.0), to_color32(core));

            if v.role == Role::Hovered {
                let label = self
                    .scene
                    .entries()
                    .iter()
                    .find(|e| e.id == v.entry_id)
                    .map(|e| match Mood::from_label(&e.mood) {
                        Some(m) => format!("{} {}", m.emoji(), m.label()),
                        None => e.mood.clone(),
                    })
                    .unwrap_or_default();
                if !label.is_empty() {
                    painter.text(
                        center + egui::vec2(radius + 6.0, -radius - 6.0),
                        egui::Align2::LEFT_BOTTOM,
                        label,
                        egui::FontId::proportional(14.0),
                        egui::Color32::WHITE,
                    );
                }
            }
        }
    }
}
