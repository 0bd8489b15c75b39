//! Toolbar rendering for `GalaxyApp`.
//!
//! Draws the view title, the mood filter bar and the reload button.

use eframe::egui;

use mood_galaxy::galaxy::filter::{mood_counts, toggle_filter};
use mood_galaxy::{InteractionEvent, Mood};

use super::canvas::to_color32;
use super::GalaxyApp;

impl GalaxyApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let accent = to_color32(self.scene.accent_color());

        ui.horizontal(|ui| {
            ui.add_space(4.0);
            ui.heading(egui::RichText::new(self.scene.title()).color(accent).strong());
            let label = count_label(
                self.scene.entries().len(),
                self.scene.layout().len(),
                self.scene.filter().is_some(),
            );
            ui.label(egui::RichText::new(label).color(egui::Color32::GRAY));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(!self.loading, egui::Button::new("\u{21BB} Reload"))
                    .clicked()
                {
                    self.start_loading(ctx);
                }
                if self.loading {
                    ui.spinner();
                }
                if let Some(err) = &self.error {
                    ui.colored_label(egui::Color32::from_rgb(255, 80, 80), err);
                }
            });
        });

        ui.add_space(2.0);
        self.draw_filter_bar(ui);
        ui.add_space(4.0);
    }

    /// "All Stars" plus one chip per mood present in the snapshot (known
    /// moods first, in composer order, then custom labels).
    fn draw_filter_bar(&mut self, ui: &mut egui::Ui) {
        let counts = mood_counts(self.scene.entries());
        let current = self.scene.filter().map(str::to_string);

        let mut chips: Vec<(String, String, usize)> = Mood::ALL
            .iter()
            .filter_map(|m| {
                let n = counts.iter().find(|(label, _)| label == m.label())?.1;
                Some((m.label().to_string(), format!("{} {}", m.emoji(), m.label()), n))
            })
            .collect();
        chips.extend(
            counts
                .iter()
                .filter(|(label, _)| !label.is_empty() && Mood::from_label(label).is_none())
                .map(|(label, n)| (label.clone(), format!("\u{2728} {label}"), *n)),
        );

        let mut clicked: Option<Option<String>> = None;
        ui.horizontal_wrapped(|ui| {
            ui.add_space(4.0);
            if ui.selectable_label(current.is_none(), "All Stars").clicked() {
                clicked = Some(None);
            }
            for (label, text, n) in &chips {
                let active = current.as_deref() == Some(label.as_str());
                let color = to_color32(self.scene.encoder().color_for(label));
                let chip = egui::RichText::new(format!("{text} ({n})")).color(color);
                if ui.selectable_label(active, chip).clicked() {
                    clicked = Some(toggle_filter(current.as_deref(), label));
                }
            }
        });

        if let Some(next) = clicked {
            self.scene.enqueue(InteractionEvent::SetFilter(next));
        }
    }
}

/// "N Memories Found" for the whole snapshot, plus the visible star count
/// while a filter is active.
fn count_label(total: usize, visible: usize, filtered: bool) -> String {
    if filtered {
        format!("{total} Memories Found \u{00B7} {visible} shown")
    } else {
        format!("{total} Memories Found")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{TimeZone, Utc};
    use mood_galaxy::{Entry, GalaxyConfig, GalaxyScene};

    fn label_for(scene: &GalaxyScene) -> String {
        count_label(scene.entries().len(), scene.layout().len(), scene.filter().is_some())
    }

    #[test]
    fn counts_whole_snapshot() {
        let t0 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let snapshot = vec![
            Entry::new("a", "Joy", t0),
            Entry::new("b", "Calm", t0),
            Entry::new("c", "Joy", t0),
        ];
        let mut scene = GalaxyScene::new(GalaxyConfig::default(), snapshot);
        assert_eq!(label_for(&scene), "3 Memories Found");

        scene.set_filter(Some("Joy"));
        assert_eq!(label_for(&scene), "3 Memories Found \u{00B7} 2 shown");
    }

    #[test]
    fn duplicate_ids_are_shown_once() {
        let t0 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let snapshot = vec![Entry::new("a", "Joy", t0), Entry::new("a", "Joy", t0)];
        let mut scene = GalaxyScene::new(GalaxyConfig::default(), snapshot);
        scene.set_filter(Some("Joy"));
        assert_eq!(label_for(&scene), "2 Memories Found \u{00B7} 1 shown");
    }
}
