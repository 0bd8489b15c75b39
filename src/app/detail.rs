//! Detail panel for the selected entry.

use eframe::egui;

use mood_galaxy::source::image::PhotoStatus;
use mood_galaxy::{InteractionEvent, Mood};

use super::canvas::to_color32;
use super::GalaxyApp;

impl GalaxyApp {
    pub fn draw_detail(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let Some(entry) = self.scene.selected_entry().cloned() else {
            return;
        };
        let color = to_color32(self.scene.encoder().color_for(&entry.mood));

        ui.horizontal(|ui| {
            let mood = match Mood::from_label(&entry.mood) {
                Some(m) => format!("{} {}", m.emoji(), m.label()),
                None if entry.mood.is_empty() => "\u{2728}".to_string(),
                None => format!("\u{2728} {}", entry.mood),
            };
            ui.heading(egui::RichText::new(mood).color(color).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("\u{2715}").on_hover_text("Close").clicked() {
                    self.scene.enqueue(InteractionEvent::PointerClickBackground);
                }
            });
        });

        let local = entry.created_at.with_timezone(&chrono::Local);
        ui.label(
            egui::RichText::new(local.format("%Y-%m-%d  %H:%M").to_string())
                .monospace()
                .color(egui::Color32::GRAY),
        );
        if let Some(meal) = &entry.meal_type {
            ui.label(egui::RichText::new(format!("\u{1F37D} {meal}")).italics());
        }
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            if let Some(url) = &entry.image_url {
                self.image_loader.request(url);
                match self.image_loader.status(url) {
                    PhotoStatus::Ready => {
                        if !self.image_textures.contains_key(url) {
                            if let Some(data) = self.image_loader.get(url) {
                                let image = egui::ColorImage::from_rgba_unmultiplied(
                                    [data.width as usize, data.height as usize],
                                    &data.rgba,
                                );
                                let tex = ctx.load_texture(
                                    format!("photo_{}", url),
                                    image,
                                    egui::TextureOptions::LINEAR,
                                );
                                self.image_textures.insert(url.clone(), tex);
                            }
                        }
                        if let Some(tex) = self.image_textures.get(url) {
                            let size = tex.size_vec2();
                            let scale = (ui.available_width() / size.x).min(1.0);
                            ui.image((tex.id(), size * scale));
                        }
                    }
                    PhotoStatus::Pending | PhotoStatus::Unknown => {
                        ui.spinner();
                    }
                    PhotoStatus::Failed => {
                        ui.colored_label(egui::Color32::GRAY, "Photo unavailable");
                    }
                }
                ui.add_space(8.0);
            }

            if entry.content.is_empty() {
                ui.label(egui::RichText::new("(no text)").italics().color(egui::Color32::GRAY));
            } else {
                ui.label(egui::RichText::new(&entry.content).size(15.0));
            }
        });
    }
}
